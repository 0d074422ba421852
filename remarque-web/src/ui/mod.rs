mod app;
pub use app::{App, AppMsg};

mod comment_composer;
pub use comment_composer::CommentComposer;

mod comment_list;
pub use comment_list::CommentList;

mod comment_list_item;
pub use comment_list_item::CommentListItem;

mod error_banner;
pub use error_banner::ErrorBanner;

mod backend;
pub use backend::{CommentEndpoint, ListFetcher, Prompt, RemoteStore};

mod cache;
pub use cache::{Cache, Fetcher, Snapshot};

mod config;
pub use config::{Config, InsertRoute};

mod error;
pub use error::Error;

mod http;
pub use http::{HttpEndpoint, HttpStore};

mod order;
pub use order::sort_by_creation;

mod session;
pub use session::{Session, MSG_CONFIRM_DELETE, MSG_DELETED, MSG_POSTED, MSG_UPDATED};

mod view;
pub use view::{CommentMode, CommentView, Composer, EditState, Page, RenderedComment};

pub mod api {
    pub use remarque_api::*;
}

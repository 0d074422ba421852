use chrono::Utc;

pub type Time = chrono::DateTime<Utc>;

mod comment;
pub use comment::{Comment, CommentId};

mod error;
pub use error::Error;

mod mutation;
pub use mutation::{DeleteQuery, EditComment, MutationOutcome, NewComment, StoreError};

/// Path of the comment endpoint, relative to the page origin
pub const COMMENTS_PATH: &str = "/api/comments";

/// Path of the store's comments table, relative to the store base url
pub const STORE_COMMENTS_PATH: &str = "/rest/v1/comments";

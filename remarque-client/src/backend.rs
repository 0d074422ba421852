use async_trait::async_trait;

use crate::{
    api::{Comment, CommentId, EditComment, MutationOutcome, NewComment},
    Error, Fetcher,
};

/// The HTTP handler serving the comment list and its mutations
#[async_trait(?Send)]
pub trait CommentEndpoint {
    async fn list(&self) -> Result<Vec<Comment>, Error>;
    async fn create(&self, comment: &NewComment) -> Result<Vec<Comment>, Error>;
    async fn edit(&self, edit: &EditComment) -> Result<MutationOutcome, Error>;
    async fn delete(&self, id: &CommentId) -> Result<MutationOutcome, Error>;
}

/// Direct write access to the comments table
#[async_trait(?Send)]
pub trait RemoteStore {
    async fn insert(&self, comment: &NewComment) -> Result<Vec<Comment>, Error>;
}

/// Blocking user interaction
pub trait Prompt {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// Feeds the cache from an endpoint's comment list
pub struct ListFetcher<E>(pub E);

#[async_trait(?Send)]
impl<E: CommentEndpoint> Fetcher for ListFetcher<E> {
    type Value = Vec<Comment>;

    async fn fetch(&self, key: &str) -> Result<Vec<Comment>, Error> {
        tracing::debug!(key, "fetching comment list");
        self.0.list().await
    }
}

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use chrono::Utc;
use remarque_api::{Comment, CommentId, EditComment, Error, NewComment, StoreError, Time};
use serde_json::json;
use tokio::sync::Mutex;
use uuid::Uuid;

mod error;
pub use error::ServerError;

mod handlers;
pub use handlers::app;

pub type SharedServer = Arc<Mutex<MockServer>>;

/// In-memory stand-in for the comments table, the comment endpoint and the
/// store's insert route
#[derive(Debug, Default)]
pub struct MockServer {
    comments: Vec<Comment>,
    last_stamp: Option<Time>,

    /// if true, edits and deletes are silently dropped and answered with no row
    pub ignore_mutations: bool,

    /// if set, store inserts are refused with this message
    pub refuse_inserts: Option<String>,

    /// if true, listing the comments fails
    pub fail_listing: bool,

    pub store_inserts: usize,
    pub endpoint_creates: usize,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::default()
    }

    pub fn with_comments(comments: Vec<Comment>) -> MockServer {
        let last_stamp = comments.iter().map(|c| c.updated_at).max();
        MockServer {
            comments,
            last_stamp,
            ..MockServer::default()
        }
    }

    pub fn shared(self) -> SharedServer {
        Arc::new(Mutex::new(self))
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Strictly increasing timestamps, so that ordering is deterministic
    fn now(&mut self) -> Time {
        let mut now = Utc::now();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }

    pub fn list(&self) -> Result<Vec<Comment>, Error> {
        if self.fail_listing {
            return Err(Error::Unknown(String::from("listing is disabled")));
        }
        Ok(self.comments.clone())
    }

    fn create(&mut self, row: NewComment) -> Result<Vec<Comment>, Error> {
        row.validate()?;
        let now = self.now();
        let c = Comment {
            id: CommentId(Uuid::new_v4().to_string()),
            created_at: now,
            updated_at: now,
            username: row.username,
            payload: row.payload,
            reply_of: row.reply_of,
        };
        tracing::debug!(id = %c.id, "inserted comment");
        self.comments.push(c.clone());
        Ok(vec![c])
    }

    pub fn store_insert(&mut self, row: NewComment) -> Result<Vec<Comment>, StoreError> {
        if let Some(msg) = &self.refuse_inserts {
            return Err(StoreError {
                code: Some(String::from("42501")),
                ..StoreError::new(msg.clone())
            });
        }
        let rows = self
            .create(row)
            .map_err(|e| StoreError::new(e.to_string()))?;
        self.store_inserts += 1;
        Ok(rows)
    }

    pub fn endpoint_create(&mut self, row: NewComment) -> Result<Vec<Comment>, Error> {
        let rows = self.create(row)?;
        self.endpoint_creates += 1;
        Ok(rows)
    }

    /// Applies an edit and returns the affected rows, as the endpoint would
    pub fn edit(&mut self, edit: EditComment) -> Result<serde_json::Value, Error> {
        edit.validate()?;
        if self.ignore_mutations {
            tracing::debug!(id = %edit.comment_id, "ignoring edit");
            return Ok(json!([]));
        }
        let now = self.now();
        match self.comments.iter_mut().find(|c| c.id == edit.comment_id) {
            None => Ok(json!([])),
            Some(c) => {
                c.payload = edit.payload;
                c.updated_at = now;
                Ok(json!([c]))
            }
        }
    }

    pub fn delete(&mut self, id: &CommentId) -> Result<serde_json::Value, Error> {
        if self.ignore_mutations {
            tracing::debug!(%id, "ignoring delete");
            return Ok(json!([]));
        }
        match self.comments.iter().position(|c| c.id == *id) {
            None => Ok(json!([])),
            Some(i) => Ok(json!([self.comments.remove(i)])),
        }
    }
}

pub fn load_seed(contents: &str) -> anyhow::Result<Vec<Comment>> {
    serde_json::from_str(contents).context("parsing seed comments")
}

/// Serves `server` on an ephemeral local port from the current tokio runtime
pub fn spawn(server: SharedServer) -> anyhow::Result<SocketAddr> {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").context("binding mock server socket")?;
    let addr = listener.local_addr().context("reading mock server address")?;
    let srv = axum::Server::from_tcp(listener)
        .context("starting mock server")?
        .serve(app(server).into_make_service());
    tokio::spawn(async move {
        if let Err(err) = srv.await {
            tracing::error!(?err, "mock server stopped");
        }
    });
    tracing::info!("mock server listening on {}", addr);
    Ok(addr)
}

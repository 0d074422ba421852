use crate::{Comment, CommentId, Error};

/// Row sent to create a comment, either to the store or to the endpoint
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub username: String,
    pub payload: String,
    pub reply_of: Option<CommentId>,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        if self.payload.trim().is_empty() {
            return Err(Error::EmptyPayload);
        }
        for s in [&self.username, &self.payload] {
            if s.contains('\0') {
                return Err(Error::NullByteInString(s.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EditComment {
    pub payload: String,
    #[serde(rename = "commentId")]
    pub comment_id: CommentId,
}

impl EditComment {
    pub fn validate(&self) -> Result<(), Error> {
        if self.payload.contains('\0') {
            return Err(Error::NullByteInString(self.payload.clone()));
        }
        Ok(())
    }
}

/// Query string of a delete request
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DeleteQuery {
    pub comment_id: CommentId,
}

/// Result of an edit or a delete on the comment endpoint
///
/// The endpoint answers with the affected rows. The mutation only counts as
/// done when the first row carries a `created_at` stamp.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationOutcome {
    Acknowledged(Vec<Comment>),
    Unacknowledged(serde_json::Value),
}

impl MutationOutcome {
    pub fn from_body(body: serde_json::Value) -> MutationOutcome {
        let stamped = body
            .get(0)
            .and_then(|row| row.get("created_at"))
            .map_or(false, |t| match t {
                serde_json::Value::Null => false,
                serde_json::Value::String(s) => !s.is_empty(),
                serde_json::Value::Number(n) => n.as_f64() != Some(0.0),
                serde_json::Value::Bool(b) => *b,
                _ => true,
            });
        if !stamped {
            return MutationOutcome::Unacknowledged(body);
        }
        let rows = match &body {
            serde_json::Value::Array(rows) => rows
                .iter()
                .filter_map(|r| serde_json::from_value(r.clone()).ok())
                .collect(),
            _ => Vec::new(),
        };
        MutationOutcome::Acknowledged(rows)
    }

    pub fn is_acknowledged(&self) -> bool {
        matches!(self, MutationOutcome::Acknowledged(_))
    }
}

/// Error body returned by the store when it refuses a write
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct StoreError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> StoreError {
        StoreError {
            message: message.into(),
            code: None,
            details: None,
            hint: None,
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Error {
        Error::Store(e.message)
    }
}

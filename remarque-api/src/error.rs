use anyhow::{anyhow, Context};
use serde_json::json;

use crate::CommentId;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Comment not found {0}")]
    CommentNotFound(CommentId),

    #[error("Comment is empty")]
    EmptyPayload,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("{0}")]
    Store(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Error::EmptyPayload => StatusCode::BAD_REQUEST,
            Error::NullByteInString(_) => StatusCode::BAD_REQUEST,
            Error::Store(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::CommentNotFound(id) => json!({
                "message": "comment not found",
                "type": "not-found",
                "id": id,
            }),
            Error::EmptyPayload => json!({
                "message": "comment is empty",
                "type": "empty-payload",
            }),
            Error::NullByteInString(s) => json!({
                "message": "there was a null byte in argument string",
                "type": "null-byte",
                "string": s,
            }),
            Error::Store(msg) => json!({
                "message": msg,
                "type": "store",
            }),
        })
        .expect("serializing error")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let message = || {
            String::from(
                data.get("message")
                    .and_then(|msg| msg.as_str())
                    .unwrap_or(""),
            )
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(message()),
                "not-found" => Error::CommentNotFound(
                    data.get("id")
                        .and_then(|id| id.as_str())
                        .map(CommentId::from)
                        .ok_or_else(|| anyhow!("error is a not-found without an id"))?,
                ),
                "empty-payload" => Error::EmptyPayload,
                "null-byte" => Error::NullByteInString(String::from(
                    data.get("string").and_then(|s| s.as_str()).ok_or_else(|| {
                        anyhow!("error is a null-byte-in-string without a string")
                    })?,
                )),
                "store" => Error::Store(message()),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}

use std::fmt;

use crate::Time;

/// Server-assigned comment identifier
///
/// Identity columns hand out numbers while other stores hand out strings, so
/// both are accepted on the wire and kept as their string form.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> CommentId {
        CommentId(String::from(s))
    }
}

impl<'de> serde::Deserialize<'de> for CommentId {
    fn deserialize<D>(deserializer: D) -> Result<CommentId, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(CommentId(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub created_at: Time,
    pub updated_at: Time,
    pub username: String,
    pub payload: String,

    /// Comment this one answers to, if any
    ///
    /// Not guaranteed to point to an existing comment.
    #[serde(default)]
    pub reply_of: Option<CommentId>,
}

impl Comment {
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }

    pub fn find_in<'a>(comments: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
        comments.iter().find(|c| c.id == *id)
    }
}

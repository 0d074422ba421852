use crate::api;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] api::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl Error {
    /// Text shown to the user when an operation fails
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(api::Error::Store(msg)) => msg.clone(),
            e => e.to_string(),
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The caller supplied something that cannot be turned into a request
    /// (e.g. an unknown content key or an invalid header value).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the backend failed or the response body could not be
    /// read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-OK status and no usable envelope.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The backend answered `401`. For an authenticated call this means the
    /// stored session is no longer valid.
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("the session has expired or was revoked"))]
    Unauthorized { message: Option<String> },
    /// The envelope carried `success: false`.
    #[error("Rejected by backend: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
    /// The envelope was successful but its payload did not have the expected
    /// shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Reading or writing the persisted session failed.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// The text to show a user for this failure. Rejections carry the
    /// backend's own message when it sent one; everything else falls back to
    /// the generic text.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
            }
            | Self::Unauthorized {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

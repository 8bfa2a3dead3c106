use portfolio_client::{ClientError, ResourceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
    /// The form failed client-side checks; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No entity with id {0} is loaded")]
    NotFound(ResourceId),
    /// The view that issued the operation went away before it finished.
    #[error("The view was unmounted")]
    Unmounted,
}

impl AdminError {
    /// Text for the notice shown when this error ends an operation.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Client(error) => error.user_message(fallback),
            Self::Validation(message) => message.clone(),
            Self::NotFound(_) | Self::Unmounted => fallback.to_string(),
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

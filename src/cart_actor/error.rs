use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),
    #[error("Cart validation error: {0}")]
    ValidationError(String),
    #[error("Cart collection is corrupted: {0}")]
    DecodeError(String),
    #[error("Cart storage failure: {0}")]
    IoFailure(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// Status a request boundary reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CartError::NotFound(_) => 404,
            CartError::ValidationError(_) => 400,
            CartError::DecodeError(_) | CartError::IoFailure(_) | CartError::ActorCommunicationError(_) => 500,
        }
    }
}

impl From<FrameworkError> for CartError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            FrameworkError::Validation(msg) => CartError::ValidationError(msg),
            FrameworkError::Decode(msg) => CartError::DecodeError(msg),
            FrameworkError::Io(msg) => CartError::IoFailure(msg),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                CartError::ActorCommunicationError(err.to_string())
            }
        }
    }
}

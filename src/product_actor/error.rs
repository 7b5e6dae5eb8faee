use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Product catalog is corrupted: {0}")]
    DecodeError(String),
    #[error("Product storage failure: {0}")]
    IoFailure(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Status a request boundary reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ProductError::NotFound(_) => 404,
            ProductError::ValidationError(_) => 400,
            ProductError::DecodeError(_)
            | ProductError::IoFailure(_)
            | ProductError::ActorCommunicationError(_) => 500,
        }
    }
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Validation(msg) => ProductError::ValidationError(msg),
            FrameworkError::Decode(msg) => ProductError::DecodeError(msg),
            FrameworkError::Io(msg) => ProductError::IoFailure(msg),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ProductError::ActorCommunicationError(err.to_string())
            }
        }
    }
}

use crate::actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during vendor operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VendorError {
    #[error("Vendor not found: {0}")]
    NotFound(String),
    #[error("Invalid vendor transition: {0}")]
    InvalidTransition(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for VendorError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => VendorError::NotFound(id),
            FrameworkError::Rejected(msg) => VendorError::InvalidTransition(msg),
            other => VendorError::ActorCommunicationError(other.to_string()),
        }
    }
}

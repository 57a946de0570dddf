use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(String),
    #[error("Category validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CategoryError>> for CategoryError {
    fn from(e: FrameworkError<CategoryError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => CategoryError::NotFound(id),
            FrameworkError::Entity(inner) => inner,
            other => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}

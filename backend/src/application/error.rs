use thiserror::Error;

use crate::application::ports::StoreError;

/// Every failure a use case can report. The HTTP adapter maps each variant to
/// a status code; messages are written for the end user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyAllotted(String),

    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(what) => AppError::Conflict(format!("{what} already exists")),
            StoreError::Backend(cause) => AppError::Internal(cause),
        }
    }
}

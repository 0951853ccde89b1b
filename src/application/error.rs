//! Application error taxonomy shared by services and the HTTP layer.

use thiserror::Error;

use crate::application::repos::RepoError;
use crate::infra::error::InfraError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected input: the request is malformed or misses required fields.
    /// No partial mutation has occurred.
    #[error("validation error: {0}")]
    Validation(String),

    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound(entity)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

impl From<InfraError> for AppError {
    fn from(error: InfraError) -> Self {
        Self::Unexpected(error.to_string())
    }
}

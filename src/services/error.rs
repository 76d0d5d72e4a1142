//! Service layer errors

use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("mail could not be delivered: {0}")]
    MailingFailed(String),

    #[error("database is not reachable")]
    NoConnection(#[source] sqlx::Error),

    #[error("unexpected failure: {0}")]
    Unexpected(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("Record"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::NoConnection(err)
            }
            other => Self::Unexpected(other.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for ServiceError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

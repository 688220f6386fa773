use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors reported by persistence gateways.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The targeted row does not exist.
    #[error("record not found")]
    NotFound,
    /// A unique index rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    /// A stored value could not be turned into a domain type.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("database error: {0}")]
    Database(DieselError),
}

impl From<DieselError> for RepositoryError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

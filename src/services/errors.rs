use thiserror::Error;

use crate::domain::types::{HiveCode, HiveId, HiveSectionCode, HiveSectionId, HiveStatus};
use crate::repository::RepositoryError;

/// A requested mutation would break a uniqueness or lifecycle rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HiveConflict {
    /// Another live hive already holds the code. `holder` is `None` when only
    /// the store's unique index noticed the collision.
    #[error("hive code `{code}` is already used by another hive")]
    CodeTaken {
        code: HiveCode,
        holder: Option<HiveId>,
    },
    /// Deletion was requested for a hive that was not deactivated first.
    #[error("hive {id} is {status}; it must be pending deletion before it can be deleted")]
    NotPendingDeletion { id: HiveId, status: HiveStatus },
    /// The requested status cannot be reached through a status change.
    #[error("hive {id} cannot be moved to {status}")]
    InvalidTransition { id: HiveId, status: HiveStatus },
    /// Another live section of the same hive already holds the code.
    #[error("section code `{code}` is already used in hive {hive_id}")]
    SectionCodeTaken {
        hive_id: HiveId,
        code: HiveSectionCode,
        holder: Option<HiveSectionId>,
    },
    #[error(
        "hive section {id} is {status}; it must be pending deletion before it can be deleted"
    )]
    SectionNotPendingDeletion {
        id: HiveSectionId,
        status: HiveStatus,
    },
    #[error("hive section {id} cannot be moved to {status}")]
    SectionInvalidTransition {
        id: HiveSectionId,
        status: HiveStatus,
    },
}

/// Error type used by service layer functions.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No live hive has the requested identifier.
    #[error("hive {0} not found")]
    NotFound(HiveId),
    #[error("hive section {0} not found")]
    SectionNotFound(HiveSectionId),
    #[error("conflict: {0}")]
    Conflict(#[from] HiveConflict),
    /// A value could not be turned into a domain type.
    #[error("invalid data: {0}")]
    TypeConstraint(String),
    /// A request form failed validation.
    #[error("{0}")]
    Form(String),
    /// The persistence gateway failed; passed through untouched.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::SectionNotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

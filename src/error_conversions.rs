//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` implementations bridging them live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::hive_sections::UpdateHiveSectionFormError;
use crate::forms::hives::{SetHiveStatusFormError, UpdateHiveFormError};
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<UpdateHiveFormError> for ServiceError {
    fn from(val: UpdateHiveFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<SetHiveStatusFormError> for ServiceError {
    fn from(val: SetHiveStatusFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateHiveSectionFormError> for ServiceError {
    fn from(val: UpdateHiveSectionFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

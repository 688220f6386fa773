use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::hive::{HiveUpdate, NewHive};
use crate::domain::types::{
    HiveCode, HiveName, HiveStatus, TypeConstraintError, UserId, ensure_max_chars,
};

pub const HIVE_NAME_MAX_CHARS: usize = 60;
pub const HIVE_CODE_MAX_CHARS: usize = 5;

/// Body of both the create and the update request.
///
/// Name and code are trimmed before they are stored. The length limits apply
/// to the trimmed values.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHiveForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHivePayload {
    pub name: HiveName,
    pub code: HiveCode,
}

impl UpdateHivePayload {
    /// Build an active hive created by `user` and stamped with the current
    /// time.
    pub fn into_new_hive(self, user: UserId) -> NewHive {
        let now = Utc::now().naive_utc();
        NewHive {
            name: self.name,
            code: self.code,
            status: HiveStatus::Active,
            created_by: user,
            last_updated_by: user,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_update(self, user: UserId) -> HiveUpdate {
        HiveUpdate {
            name: self.name,
            code: self.code,
            last_updated_by: user,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateHiveFormError {
    #[error("Hive form validation failed: {0}")]
    Validation(String),
    #[error("Hive form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateHiveFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateHiveFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateHiveForm> for UpdateHivePayload {
    type Error = UpdateHiveFormError;

    fn try_from(value: UpdateHiveForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = HiveName::new(value.name)?;
        ensure_max_chars(&name, HIVE_NAME_MAX_CHARS, "hive name")?;
        let code = HiveCode::new(value.code)?;
        ensure_max_chars(&code, HIVE_CODE_MAX_CHARS, "hive code")?;
        Ok(Self { name, code })
    }
}

/// Body of the status change request: `active` or `pending_deletion`.
#[derive(Debug, Deserialize, Validate)]
pub struct SetHiveStatusForm {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetHiveStatusPayload {
    pub status: HiveStatus,
}

#[derive(Debug, Error)]
pub enum SetHiveStatusFormError {
    #[error("Hive status form validation failed: {0}")]
    Validation(String),
    #[error("Hive status form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SetHiveStatusFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SetHiveStatusFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SetHiveStatusForm> for SetHiveStatusPayload {
    type Error = SetHiveStatusFormError;

    fn try_from(value: SetHiveStatusForm) -> Result<Self, Self::Error> {
        value.validate()?;
        // Deletion has its own operation with its own precondition.
        let status = match HiveStatus::try_from(value.status)? {
            HiveStatus::Deleted => {
                return Err(TypeConstraintError::InvalidValue(
                    "hive status: use the delete operation to delete a hive".to_string(),
                )
                .into());
            }
            status => status,
        };
        Ok(Self { status })
    }
}

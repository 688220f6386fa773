use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::hive_section::{HiveSectionUpdate, NewHiveSection};
use crate::domain::types::{
    HiveId, HiveSectionCode, HiveSectionName, HiveStatus, TypeConstraintError, UserId,
    ensure_max_chars,
};

pub const HIVE_SECTION_NAME_MAX_CHARS: usize = 60;
pub const HIVE_SECTION_CODE_MAX_CHARS: usize = 5;

/// Body of both the create and the update section request. Values are trimmed
/// like hive names and codes.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHiveSectionForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHiveSectionPayload {
    pub name: HiveSectionName,
    pub code: HiveSectionCode,
}

impl UpdateHiveSectionPayload {
    /// Build an active section of `hive_id` created by `user`.
    pub fn into_new_hive_section(self, hive_id: HiveId, user: UserId) -> NewHiveSection {
        let now = Utc::now().naive_utc();
        NewHiveSection {
            hive_id,
            name: self.name,
            code: self.code,
            status: HiveStatus::Active,
            created_by: user,
            last_updated_by: user,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_update(self, user: UserId) -> HiveSectionUpdate {
        HiveSectionUpdate {
            name: self.name,
            code: self.code,
            last_updated_by: user,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateHiveSectionFormError {
    #[error("Hive section form validation failed: {0}")]
    Validation(String),
    #[error("Hive section form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateHiveSectionFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateHiveSectionFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateHiveSectionForm> for UpdateHiveSectionPayload {
    type Error = UpdateHiveSectionFormError;

    fn try_from(value: UpdateHiveSectionForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = HiveSectionName::new(value.name)?;
        ensure_max_chars(&name, HIVE_SECTION_NAME_MAX_CHARS, "hive section name")?;
        let code = HiveSectionCode::new(value.code)?;
        ensure_max_chars(&code, HIVE_SECTION_CODE_MAX_CHARS, "hive section code")?;
        Ok(Self { name, code })
    }
}

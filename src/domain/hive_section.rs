use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    HiveId, HiveSectionCode, HiveSectionId, HiveSectionName, HiveStatus, UserId,
};

/// A named part of a hive, such as a shelf row or a bay.
///
/// Sections follow the same lifecycle as hives. Their codes are unique among
/// the live sections of the same hive only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HiveSection {
    pub id: HiveSectionId,
    pub hive_id: HiveId,
    pub name: HiveSectionName,
    pub code: HiveSectionCode,
    pub status: HiveStatus,
    pub created_by: UserId,
    pub last_updated_by: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl HiveSection {
    /// Whether `code` is held by this section while it is still live.
    pub fn holds_code(&self, code: &HiveSectionCode) -> bool {
        self.status.is_live() && &self.code == code
    }
}

/// Data required to insert a new [`HiveSection`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHiveSection {
    pub hive_id: HiveId,
    pub name: HiveSectionName,
    pub code: HiveSectionCode,
    pub status: HiveStatus,
    pub created_by: UserId,
    pub last_updated_by: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Mutable fields written when updating a [`HiveSection`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HiveSectionUpdate {
    pub name: HiveSectionName,
    pub code: HiveSectionCode,
    pub last_updated_by: UserId,
    pub updated_at: NaiveDateTime,
}

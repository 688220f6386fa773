use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{HiveCode, HiveId, HiveName, HiveStatus, UserId};

/// Persisted physical storage section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hive {
    pub id: HiveId,
    pub name: HiveName,
    pub code: HiveCode,
    pub status: HiveStatus,
    pub created_by: UserId,
    pub last_updated_by: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Hive {
    /// Whether `code` is held by this hive while it is still live.
    pub fn holds_code(&self, code: &HiveCode) -> bool {
        self.status.is_live() && &self.code == code
    }
}

/// Data required to insert a new [`Hive`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHive {
    pub name: HiveName,
    pub code: HiveCode,
    pub status: HiveStatus,
    pub created_by: UserId,
    pub last_updated_by: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Mutable fields written when updating a [`Hive`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HiveUpdate {
    pub name: HiveName,
    pub code: HiveCode,
    pub last_updated_by: UserId,
    pub updated_at: NaiveDateTime,
}

/// Lifecycle move of a hive or hive section, attributed to a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatusChange {
    pub status: HiveStatus,
    pub last_updated_by: UserId,
    pub updated_at: NaiveDateTime,
}

impl StatusChange {
    /// Stamp a move to `status` by `user` with the current time.
    pub fn now(status: HiveStatus, user: UserId) -> Self {
        Self {
            status,
            last_updated_by: user,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

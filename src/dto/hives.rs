use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::hive::Hive;

/// Caller-facing representation of a hive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiveDto {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_by: i32,
    pub last_updated_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Hive> for HiveDto {
    fn from(value: Hive) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            code: value.code.into_inner(),
            status: value.status.into(),
            is_deleted: value.status.is_deleted(),
            created_by: value.created_by.get(),
            last_updated_by: value.last_updated_by.get(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

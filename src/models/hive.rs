use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::hive::{Hive as DomainHive, NewHive as DomainNewHive};
use crate::domain::types::{HiveCode, HiveName, HiveStatus, TypeConstraintError, UserId};

/// Diesel model representing the `hives` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::hives)]
pub struct Hive {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub status: String,
    pub created_by: i32,
    pub last_updated_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Hive`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::hives)]
pub struct NewHive {
    pub name: String,
    pub code: String,
    pub status: String,
    pub created_by: i32,
    pub last_updated_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Hive> for DomainHive {
    type Error = TypeConstraintError;

    fn try_from(hive: Hive) -> Result<Self, Self::Error> {
        Ok(Self {
            id: hive.id.try_into()?,
            name: HiveName::new(hive.name)?,
            code: HiveCode::new(hive.code)?,
            status: HiveStatus::try_from(hive.status)?,
            created_by: UserId::new(hive.created_by)?,
            last_updated_by: UserId::new(hive.last_updated_by)?,
            created_at: hive.created_at,
            updated_at: hive.updated_at,
        })
    }
}

impl From<DomainNewHive> for NewHive {
    fn from(hive: DomainNewHive) -> Self {
        Self {
            name: hive.name.into_inner(),
            code: hive.code.into_inner(),
            status: hive.status.into(),
            created_by: hive.created_by.get(),
            last_updated_by: hive.last_updated_by.get(),
            created_at: hive.created_at,
            updated_at: hive.updated_at,
        }
    }
}

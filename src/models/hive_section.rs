use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::hive_section::{
    HiveSection as DomainHiveSection, NewHiveSection as DomainNewHiveSection,
};
use crate::domain::types::{
    HiveSectionCode, HiveSectionName, HiveStatus, TypeConstraintError, UserId,
};

/// Diesel model representing the `hive_sections` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::hive_sections)]
pub struct HiveSection {
    pub id: i32,
    pub hive_id: i32,
    pub name: String,
    pub code: String,
    pub status: String,
    pub created_by: i32,
    pub last_updated_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`HiveSection`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::hive_sections)]
pub struct NewHiveSection {
    pub hive_id: i32,
    pub name: String,
    pub code: String,
    pub status: String,
    pub created_by: i32,
    pub last_updated_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<HiveSection> for DomainHiveSection {
    type Error = TypeConstraintError;

    fn try_from(section: HiveSection) -> Result<Self, Self::Error> {
        Ok(Self {
            id: section.id.try_into()?,
            hive_id: section.hive_id.try_into()?,
            name: HiveSectionName::new(section.name)?,
            code: HiveSectionCode::new(section.code)?,
            status: HiveStatus::try_from(section.status)?,
            created_by: UserId::new(section.created_by)?,
            last_updated_by: UserId::new(section.last_updated_by)?,
            created_at: section.created_at,
            updated_at: section.updated_at,
        })
    }
}

impl From<DomainNewHiveSection> for NewHiveSection {
    fn from(section: DomainNewHiveSection) -> Self {
        Self {
            hive_id: section.hive_id.get(),
            name: section.name.into_inner(),
            code: section.code.into_inner(),
            status: section.status.into(),
            created_by: section.created_by.get(),
            last_updated_by: section.last_updated_by.get(),
            created_at: section.created_at,
            updated_at: section.updated_at,
        }
    }
}

use diesel::prelude::*;

use crate::domain::hive::StatusChange;
use crate::domain::hive_section::{HiveSection, HiveSectionUpdate, NewHiveSection};
use crate::domain::types::{HiveId, HiveSectionCode, HiveSectionId};
use crate::models::hive_section::{
    HiveSection as DbHiveSection, NewHiveSection as DbNewHiveSection,
};
use crate::repository::{
    DieselRepository, HiveSectionListQuery, HiveSectionReader, HiveSectionWriter,
    RepositoryResult,
};

impl HiveSectionReader for DieselRepository {
    fn list_hive_sections(
        &self,
        query: HiveSectionListQuery,
    ) -> RepositoryResult<Vec<HiveSection>> {
        use crate::schema::hive_sections;

        let mut conn = self.conn()?;

        let mut items = hive_sections::table
            .filter(hive_sections::hive_id.eq(query.hive_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(status) = query.status {
            items = items.filter(hive_sections::status.eq(status.as_str()));
        }

        let items = items
            .order(hive_sections::id.asc())
            .load::<DbHiveSection>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<HiveSection>, _>>()?;

        Ok(items)
    }

    fn get_hive_section_by_id(&self, id: HiveSectionId) -> RepositoryResult<Option<HiveSection>> {
        use crate::schema::hive_sections;

        let mut conn = self.conn()?;

        let section = hive_sections::table
            .filter(hive_sections::id.eq(id.get()))
            .first::<DbHiveSection>(&mut conn)
            .optional()?;

        let section = section.map(TryInto::try_into).transpose()?;
        Ok(section)
    }

    fn find_hive_sections_by_code(
        &self,
        hive_id: HiveId,
        code: &HiveSectionCode,
    ) -> RepositoryResult<Vec<HiveSection>> {
        use crate::schema::hive_sections;

        let mut conn = self.conn()?;

        let items = hive_sections::table
            .filter(hive_sections::hive_id.eq(hive_id.get()))
            .filter(hive_sections::code.eq(code.as_str()))
            .order(hive_sections::id.asc())
            .load::<DbHiveSection>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<HiveSection>, _>>()?;

        Ok(items)
    }
}

impl HiveSectionWriter for DieselRepository {
    fn create_hive_section(&self, section: &NewHiveSection) -> RepositoryResult<HiveSection> {
        use crate::schema::hive_sections;

        let mut conn = self.conn()?;
        let db_section: DbNewHiveSection = section.clone().into();

        let created = diesel::insert_into(hive_sections::table)
            .values(db_section)
            .get_result::<DbHiveSection>(&mut conn)?;

        let created: HiveSection = created.try_into()?;
        Ok(created)
    }

    fn update_hive_section(
        &self,
        id: HiveSectionId,
        update: &HiveSectionUpdate,
    ) -> RepositoryResult<HiveSection> {
        use crate::schema::hive_sections;

        let mut conn = self.conn()?;

        let updated = diesel::update(hive_sections::table.filter(hive_sections::id.eq(id.get())))
            .set((
                hive_sections::name.eq(update.name.as_str()),
                hive_sections::code.eq(update.code.as_str()),
                hive_sections::last_updated_by.eq(update.last_updated_by.get()),
                hive_sections::updated_at.eq(update.updated_at),
            ))
            .get_result::<DbHiveSection>(&mut conn)?;

        let updated: HiveSection = updated.try_into()?;
        Ok(updated)
    }

    fn set_hive_section_status(
        &self,
        id: HiveSectionId,
        change: &StatusChange,
    ) -> RepositoryResult<HiveSection> {
        use crate::schema::hive_sections;

        let mut conn = self.conn()?;

        let updated = diesel::update(hive_sections::table.filter(hive_sections::id.eq(id.get())))
            .set((
                hive_sections::status.eq(change.status.as_str()),
                hive_sections::last_updated_by.eq(change.last_updated_by.get()),
                hive_sections::updated_at.eq(change.updated_at),
            ))
            .get_result::<DbHiveSection>(&mut conn)?;

        let updated: HiveSection = updated.try_into()?;
        Ok(updated)
    }
}

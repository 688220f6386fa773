use diesel::prelude::*;

use crate::domain::hive::{Hive, HiveUpdate, NewHive, StatusChange};
use crate::domain::types::{HiveCode, HiveId};
use crate::models::hive::{Hive as DbHive, NewHive as DbNewHive};
use crate::repository::{DieselRepository, HiveListQuery, HiveReader, HiveWriter, RepositoryResult};

impl HiveReader for DieselRepository {
    fn list_hives(&self, query: HiveListQuery) -> RepositoryResult<Vec<Hive>> {
        use crate::schema::hives;

        let mut conn = self.conn()?;

        let mut items = hives::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(status) = query.status {
            items = items.filter(hives::status.eq(status.as_str()));
        }

        let items = items
            .order(hives::id.asc())
            .load::<DbHive>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Hive>, _>>()?;

        Ok(items)
    }

    fn get_hive_by_id(&self, id: HiveId) -> RepositoryResult<Option<Hive>> {
        use crate::schema::hives;

        let mut conn = self.conn()?;

        let hive = hives::table
            .filter(hives::id.eq(id.get()))
            .first::<DbHive>(&mut conn)
            .optional()?;

        let hive = hive.map(TryInto::try_into).transpose()?;
        Ok(hive)
    }

    fn find_hives_by_code(&self, code: &HiveCode) -> RepositoryResult<Vec<Hive>> {
        use crate::schema::hives;

        let mut conn = self.conn()?;

        let items = hives::table
            .filter(hives::code.eq(code.as_str()))
            .order(hives::id.asc())
            .load::<DbHive>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Hive>, _>>()?;

        Ok(items)
    }
}

impl HiveWriter for DieselRepository {
    fn create_hive(&self, hive: &NewHive) -> RepositoryResult<Hive> {
        use crate::schema::hives;

        let mut conn = self.conn()?;
        let db_hive: DbNewHive = hive.clone().into();

        let created = diesel::insert_into(hives::table)
            .values(db_hive)
            .get_result::<DbHive>(&mut conn)?;

        let created: Hive = created.try_into()?;
        Ok(created)
    }

    fn update_hive(&self, id: HiveId, update: &HiveUpdate) -> RepositoryResult<Hive> {
        use crate::schema::hives;

        let mut conn = self.conn()?;

        let updated = diesel::update(hives::table.filter(hives::id.eq(id.get())))
            .set((
                hives::name.eq(update.name.as_str()),
                hives::code.eq(update.code.as_str()),
                hives::last_updated_by.eq(update.last_updated_by.get()),
                hives::updated_at.eq(update.updated_at),
            ))
            .get_result::<DbHive>(&mut conn)?;

        let updated: Hive = updated.try_into()?;
        Ok(updated)
    }

    fn set_hive_status(&self, id: HiveId, change: &StatusChange) -> RepositoryResult<Hive> {
        use crate::schema::hives;

        let mut conn = self.conn()?;

        let updated = diesel::update(hives::table.filter(hives::id.eq(id.get())))
            .set((
                hives::status.eq(change.status.as_str()),
                hives::last_updated_by.eq(change.last_updated_by.get()),
                hives::updated_at.eq(change.updated_at),
            ))
            .get_result::<DbHive>(&mut conn)?;

        let updated: Hive = updated.try_into()?;
        Ok(updated)
    }
}

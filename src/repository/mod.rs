use crate::db::{DbConnection, DbPool};
use crate::domain::hive::{Hive, HiveUpdate, NewHive, StatusChange};
use crate::domain::hive_section::{HiveSection, HiveSectionUpdate, NewHiveSection};
use crate::domain::types::{HiveCode, HiveId, HiveSectionCode, HiveSectionId, HiveStatus};

pub mod errors;
pub mod hive;
pub mod hive_section;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing hives.
#[derive(Debug, Clone, Default)]
pub struct HiveListQuery {
    /// Only return hives in this lifecycle state.
    pub status: Option<HiveStatus>,
}

impl HiveListQuery {
    pub fn status(mut self, status: HiveStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Query parameters used when listing the sections of one hive.
#[derive(Debug, Clone)]
pub struct HiveSectionListQuery {
    pub hive_id: HiveId,
    pub status: Option<HiveStatus>,
}

impl HiveSectionListQuery {
    pub fn new(hive_id: HiveId) -> Self {
        Self {
            hive_id,
            status: None,
        }
    }

    pub fn status(mut self, status: HiveStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Read-only operations for hive entities.
pub trait HiveReader {
    /// List hives ordered by identifier.
    fn list_hives(&self, query: HiveListQuery) -> RepositoryResult<Vec<Hive>>;
    /// Retrieve a hive by its identifier, whatever its status.
    fn get_hive_by_id(&self, id: HiveId) -> RepositoryResult<Option<Hive>>;
    /// Find every hive whose code equals `code`, whatever its status.
    fn find_hives_by_code(&self, code: &HiveCode) -> RepositoryResult<Vec<Hive>>;
}

/// Write operations for hive entities.
pub trait HiveWriter {
    /// Persist a new hive and return it with its assigned identifier.
    fn create_hive(&self, hive: &NewHive) -> RepositoryResult<Hive>;
    /// Overwrite the name and code of an existing hive.
    fn update_hive(&self, id: HiveId, update: &HiveUpdate) -> RepositoryResult<Hive>;
    /// Move an existing hive to a new lifecycle state.
    fn set_hive_status(&self, id: HiveId, change: &StatusChange) -> RepositoryResult<Hive>;
}

/// Read-only operations for hive sections.
pub trait HiveSectionReader {
    /// List the sections of one hive ordered by identifier.
    fn list_hive_sections(&self, query: HiveSectionListQuery)
    -> RepositoryResult<Vec<HiveSection>>;
    /// Retrieve a section by its identifier, whatever its status.
    fn get_hive_section_by_id(&self, id: HiveSectionId) -> RepositoryResult<Option<HiveSection>>;
    /// Find every section of `hive_id` whose code equals `code`.
    fn find_hive_sections_by_code(
        &self,
        hive_id: HiveId,
        code: &HiveSectionCode,
    ) -> RepositoryResult<Vec<HiveSection>>;
}

/// Write operations for hive sections.
pub trait HiveSectionWriter {
    fn create_hive_section(&self, section: &NewHiveSection) -> RepositoryResult<HiveSection>;
    fn update_hive_section(
        &self,
        id: HiveSectionId,
        update: &HiveSectionUpdate,
    ) -> RepositoryResult<HiveSection>;
    fn set_hive_section_status(
        &self,
        id: HiveSectionId,
        change: &StatusChange,
    ) -> RepositoryResult<HiveSection>;
}

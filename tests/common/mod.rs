//! Helpers for integration tests.

use chrono::Utc;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use hive_management::db::{DbPool, establish_connection_pool};
use hive_management::domain::hive::NewHive;
use hive_management::domain::hive_section::NewHiveSection;
use hive_management::domain::types::{
    HiveCode, HiveId, HiveName, HiveSectionCode, HiveSectionName, HiveStatus, UserId,
};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

#[allow(dead_code)]
pub fn new_hive(name: &str, code: &str) -> NewHive {
    let now = Utc::now().naive_utc();
    NewHive {
        name: HiveName::new(name).expect("valid hive name"),
        code: HiveCode::new(code).expect("valid hive code"),
        status: HiveStatus::Active,
        created_by: user_id(),
        last_updated_by: user_id(),
        created_at: now,
        updated_at: now,
    }
}

#[allow(dead_code)]
pub fn user_id() -> UserId {
    UserId::new(1).expect("valid user id")
}

#[allow(dead_code)]
pub fn new_hive_section(hive_id: HiveId, name: &str, code: &str) -> NewHiveSection {
    let now = Utc::now().naive_utc();
    NewHiveSection {
        hive_id,
        name: HiveSectionName::new(name).expect("valid section name"),
        code: HiveSectionCode::new(code).expect("valid section code"),
        status: HiveStatus::Active,
        created_by: user_id(),
        last_updated_by: user_id(),
        created_at: now,
        updated_at: now,
    }
}

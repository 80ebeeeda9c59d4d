//! Helpers shared by the integration tests.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use ping_crm::db::{DbPool, establish_connection_pool};
use ping_crm::domain::account::{Account, NewAccount};
use ping_crm::domain::types::AccountName;
use ping_crm::repository::{AccountWriter, DieselRepository};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// SQLite database living in a temporary directory with every migration applied.
///
/// The directory, and the database with it, is removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        TestDb { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn create_account(repo: &DieselRepository, name: &str) -> Account {
    repo.create_account(&NewAccount::new(AccountName::new(name).expect("valid name")))
        .expect("create account")
}

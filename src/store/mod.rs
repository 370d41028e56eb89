use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::{Error, Result};
use crate::models::{Assessment, Candidate, CandidateResponse, Job, Timeline};

pub mod table;

use table::Table;

/// Handle to the embedded database. Owns the connection pool with an
/// explicit open/close lifecycle and is injected into whatever needs
/// durable state; nothing reads it through a global.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn open(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(Error::Store)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// In-memory database for tests. A single connection, otherwise each
    /// pooled connection would see its own empty database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Store(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    pub fn jobs(&self) -> Table<Job> {
        Table::new(self.pool.clone())
    }

    pub fn candidates(&self) -> Table<Candidate> {
        Table::new(self.pool.clone())
    }

    pub fn assessments(&self) -> Table<Assessment> {
        Table::new(self.pool.clone())
    }

    pub fn timelines(&self) -> Table<Timeline> {
        Table::new(self.pool.clone())
    }

    pub fn responses(&self) -> Table<CandidateResponse> {
        Table::new(self.pool.clone())
    }

    /// True once a full seed run has finished all five tables.
    pub async fn seed_complete(&self) -> Result<bool> {
        let row = sqlx::query("SELECT key FROM seed_state WHERE key = 'complete'")
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn mark_seed_complete(&self) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO seed_state (key, completed_at) VALUES ('complete', ?1)")
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear_seed_marker(&self) -> Result<()> {
        sqlx::query("DELETE FROM seed_state")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// SQLite storage layer with sqlx
//
// One repository per entity; each owns its own pool handle and is
// constructed once at process start and passed explicitly.

pub mod models;
pub mod repositories;

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub use models::*;
pub use repositories::{EventRepo, IncomeRepo, OutcomeRepo};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("an event is already booked for {0}")]
    DateTaken(NaiveDate),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Shared database handle; repositories clone the pool out of it.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url` and apply pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        MIGRATOR.run(&pool).await?;
        tracing::debug!("database migrations applied");
        Ok(Self { pool })
    }

    /// Open a private in-memory database. A single-connection pool keeps
    /// every query on the same in-memory instance.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn events(&self) -> EventRepo {
        EventRepo::new(self.pool.clone())
    }

    pub fn income(&self) -> IncomeRepo {
        IncomeRepo::new(self.pool.clone())
    }

    pub fn outcome(&self) -> OutcomeRepo {
        OutcomeRepo::new(self.pool.clone())
    }
}

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    Pool, Sqlite,
};
use std::str::FromStr;
use tokio::time::Duration;
use tracing::{info, instrument};

use crate::TARGET_DB;

/// SQLite-backed catalog store.
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Get access to the database pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

impl Database {
    /// Open (creating if needed) the database file at `database_path`.
    #[instrument(target = "db_query", level = "info")]
    pub async fn new(database_path: &str) -> Result<Self, sqlx::Error> {
        info!(target: TARGET_DB, "Creating database pool for: {}", database_path);

        let connect_options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", database_path))?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        info!(target: TARGET_DB, "Database pool created");

        let db = Database { pool };
        db.initialize_schema().await?;

        Ok(db)
    }

    /// A private in-memory database. Every connection to `:memory:` sees its
    /// own empty database, so the pool is pinned to one connection that is
    /// never recycled.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await?;

        let db = Database { pool };
        db.initialize_schema().await?;

        Ok(db)
    }
}

use tracing::info;

use super::core::Database;
use crate::TARGET_DB;

impl Database {
    /// Alias-capable tables store their aliases as a JSON array of strings, or
    /// NULL when the record has none. Rows are read back in `rowid` order.
    pub(crate) async fn initialize_schema(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool().acquire().await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS labels (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                aliases TEXT
            );

            CREATE TABLE IF NOT EXISTS actors (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                aliases TEXT
            );

            CREATE TABLE IF NOT EXISTS studios (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                aliases TEXT
            );

            CREATE TABLE IF NOT EXISTS scenes (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS movies (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS custom_fields (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL
            );
            "#,
        )
        .execute(&mut *conn)
        .await?;

        info!(target: TARGET_DB, "Catalog schema initialized");

        Ok(())
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Executor, Row, Sqlite};
use tracing::{debug, info, instrument};

use super::core::Database;
use crate::catalog::{Catalog, InMemoryCatalog};
use crate::extract::{MatchableKind, MatchableRecord, NamedKind, NamedRecord};
use crate::TARGET_DB;

impl Database {
    /// All records of an alias-capable kind, in insertion order.
    #[instrument(target = "db_query", level = "debug", skip(self))]
    pub async fn get_matchable(&self, kind: MatchableKind) -> Result<Vec<MatchableRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT id, name, aliases FROM {} ORDER BY rowid",
            kind.table()
        ))
        .fetch_all(self.pool())
        .await
        .with_context(|| format!("Failed to query {}", kind))?;

        let records = rows
            .iter()
            .map(matchable_from_row)
            .collect::<Result<Vec<_>>>()?;

        debug!(target: TARGET_DB, "Fetched {} {}", records.len(), kind);
        Ok(records)
    }

    /// All records of a name-only kind, in insertion order.
    #[instrument(target = "db_query", level = "debug", skip(self))]
    pub async fn get_named(&self, kind: NamedKind) -> Result<Vec<NamedRecord>> {
        let records = sqlx::query_as::<_, (String, String)>(&format!(
            "SELECT id, name FROM {} ORDER BY rowid",
            kind.table()
        ))
        .fetch_all(self.pool())
        .await
        .with_context(|| format!("Failed to query {}", kind))?
        .into_iter()
        .map(|(id, name)| NamedRecord { id, name })
        .collect::<Vec<_>>();

        debug!(target: TARGET_DB, "Fetched {} {}", records.len(), kind);
        Ok(records)
    }

    /// Insert or update a label, actor or studio. An update keeps the
    /// record's original position in fetch order.
    pub async fn add_matchable(&self, kind: MatchableKind, record: &MatchableRecord) -> Result<()> {
        upsert_matchable(self.pool(), kind, record).await
    }

    /// Insert or update a scene, movie or custom field.
    pub async fn add_named(&self, kind: NamedKind, record: &NamedRecord) -> Result<()> {
        upsert_named(self.pool(), kind, record).await
    }

    /// Load every record of `catalog` in one transaction. Returns the number
    /// of records written.
    pub async fn import_catalog(&self, catalog: &InMemoryCatalog) -> Result<usize> {
        let mut transaction = self.pool().begin().await?;
        let mut count = 0;

        for kind in [MatchableKind::Label, MatchableKind::Actor, MatchableKind::Studio] {
            for record in catalog.matchable(kind) {
                upsert_matchable(&mut *transaction, kind, record).await?;
                count += 1;
            }
        }

        for kind in [NamedKind::Scene, NamedKind::Movie, NamedKind::CustomField] {
            for record in catalog.named(kind) {
                upsert_named(&mut *transaction, kind, record).await?;
                count += 1;
            }
        }

        transaction.commit().await?;
        info!(target: TARGET_DB, "Imported {} catalog records", count);

        Ok(count)
    }
}

async fn upsert_matchable<'c, E>(
    executor: E,
    kind: MatchableKind,
    record: &MatchableRecord,
) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    let aliases = record
        .aliases
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("Failed to encode aliases")?;

    sqlx::query(&format!(
        r#"
        INSERT INTO {} (id, name, aliases)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            aliases = excluded.aliases
        "#,
        kind.table()
    ))
    .bind(&record.id)
    .bind(&record.name)
    .bind(aliases)
    .execute(executor)
    .await
    .with_context(|| format!("Failed to store {} record '{}'", kind, record.id))?;

    Ok(())
}

async fn upsert_named<'c, E>(executor: E, kind: NamedKind, record: &NamedRecord) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(&format!(
        r#"
        INSERT INTO {} (id, name)
        VALUES (?1, ?2)
        ON CONFLICT(id) DO UPDATE SET name = excluded.name
        "#,
        kind.table()
    ))
    .bind(&record.id)
    .bind(&record.name)
    .execute(executor)
    .await
    .with_context(|| format!("Failed to store {} record '{}'", kind, record.id))?;

    Ok(())
}

fn matchable_from_row(row: &SqliteRow) -> Result<MatchableRecord> {
    let id: String = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let aliases: Option<String> = row.try_get("aliases")?;

    let aliases = aliases
        .map(|json| serde_json::from_str::<Vec<String>>(&json))
        .transpose()
        .with_context(|| format!("Malformed aliases for record '{}'", id))?;

    Ok(MatchableRecord { id, name, aliases })
}

#[async_trait]
impl Catalog for Database {
    async fn fetch_matchable(&self, kind: MatchableKind) -> Result<Vec<MatchableRecord>> {
        self.get_matchable(kind).await
    }

    async fn fetch_named(&self, kind: NamedKind) -> Result<Vec<NamedRecord>> {
        self.get_named(kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_all, extract_studios};

    #[tokio::test]
    async fn test_round_trip_keeps_order_and_aliases() {
        let db = Database::in_memory().await.unwrap();
        let fox = MatchableRecord::new("s-fox", "Fox");
        let century =
            MatchableRecord::new("s-20th", "20th Century Fox").with_aliases(&["regex:^20th"]);

        db.add_matchable(MatchableKind::Studio, &fox).await.unwrap();
        db.add_matchable(MatchableKind::Studio, &century).await.unwrap();

        let studios = db.fetch_matchable(MatchableKind::Studio).await.unwrap();
        assert_eq!(studios, vec![fox.clone(), century]);

        let renamed = MatchableRecord::new("s-fox", "Fox Searchlight");
        db.add_matchable(MatchableKind::Studio, &renamed).await.unwrap();
        let studios = db.fetch_matchable(MatchableKind::Studio).await.unwrap();
        assert_eq!(studios[0], renamed);
        assert_eq!(studios.len(), 2);
    }

    #[tokio::test]
    async fn test_kinds_are_kept_apart() {
        let db = Database::in_memory().await.unwrap();
        db.add_named(NamedKind::Movie, &NamedRecord::new("m1", "Aliens"))
            .await
            .unwrap();

        assert_eq!(db.fetch_named(NamedKind::Movie).await.unwrap().len(), 1);
        assert!(db.fetch_named(NamedKind::Scene).await.unwrap().is_empty());
        assert!(db
            .fetch_matchable(MatchableKind::Label)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_malformed_aliases_fail_the_fetch() {
        let db = Database::in_memory().await.unwrap();
        sqlx::query("INSERT INTO labels (id, name, aliases) VALUES ('l1', 'Outdoor', 'not json')")
            .execute(db.pool())
            .await
            .unwrap();

        assert!(db.fetch_matchable(MatchableKind::Label).await.is_err());
    }

    #[tokio::test]
    async fn test_import_then_extract() {
        let db = Database::in_memory().await.unwrap();
        let catalog = InMemoryCatalog::from_json_str(
            r#"{
                "studios": [
                    { "id": "s-fox", "name": "Fox" },
                    { "id": "s-20th", "name": "20th Century Fox" }
                ],
                "actors": [
                    { "id": "a-jane", "name": "Jane Doe", "aliases": ["Jane", "JD Star"] }
                ],
                "movies": [{ "id": "m1", "name": "Aliens" }]
            }"#,
        )
        .unwrap();

        assert_eq!(db.import_catalog(&catalog).await.unwrap(), 4);

        let studios = extract_studios(&db, "20th century fox film").await.unwrap();
        assert_eq!(studios, vec!["s-20th", "s-fox"]);

        let ids = extract_all(&db, "Aliens starring JD Star").await.unwrap();
        assert_eq!(ids.actors, vec!["a-jane"]);
        assert_eq!(ids.movies, vec!["m1"]);
        assert!(ids.studios.is_empty());
    }
}

//! Read access to the entities the catalog already knows.
//!
//! Extraction only ever asks for "every record of this kind". Implementations
//! return a fresh snapshot on each call and must keep a stable order, since the
//! label, actor and custom field pipelines return ids in fetch order.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::extract::{MatchableKind, MatchableRecord, NamedKind, NamedRecord};

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn fetch_matchable(&self, kind: MatchableKind) -> Result<Vec<MatchableRecord>>;

    async fn fetch_named(&self, kind: NamedKind) -> Result<Vec<NamedRecord>>;
}

/// A catalog held entirely in memory, typically loaded from a JSON export.
///
/// ```json
/// {
///   "studios": [{ "id": "s1", "name": "20th Century Fox", "aliases": ["regex:^fox\\d+"] }],
///   "movies": [{ "id": "m1", "name": "Aliens" }]
/// }
/// ```
///
/// Sections that are missing are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryCatalog {
    pub labels: Vec<MatchableRecord>,
    pub actors: Vec<MatchableRecord>,
    pub studios: Vec<MatchableRecord>,
    pub scenes: Vec<NamedRecord>,
    pub movies: Vec<NamedRecord>,
    pub custom_fields: Vec<NamedRecord>,
}

impl InMemoryCatalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse catalog JSON")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn matchable(&self, kind: MatchableKind) -> &[MatchableRecord] {
        match kind {
            MatchableKind::Label => &self.labels,
            MatchableKind::Actor => &self.actors,
            MatchableKind::Studio => &self.studios,
        }
    }

    pub fn named(&self, kind: NamedKind) -> &[NamedRecord] {
        match kind {
            NamedKind::Scene => &self.scenes,
            NamedKind::Movie => &self.movies,
            NamedKind::CustomField => &self.custom_fields,
        }
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn fetch_matchable(&self, kind: MatchableKind) -> Result<Vec<MatchableRecord>> {
        Ok(self.matchable(kind).to_vec())
    }

    async fn fetch_named(&self, kind: NamedKind) -> Result<Vec<NamedRecord>> {
        Ok(self.named(kind).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_missing_sections_are_empty() {
        let catalog = InMemoryCatalog::from_json_str(
            r#"{
                "studios": [
                    { "id": "s1", "name": "20th Century Fox", "aliases": ["Fox Studios"] },
                    { "id": "s2", "name": "Acme" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.studios.len(), 2);
        assert_eq!(
            catalog.studios[0].aliases,
            Some(vec!["Fox Studios".to_string()])
        );
        assert_eq!(catalog.studios[1].aliases, None);
        assert!(catalog.labels.is_empty());
        assert!(catalog.custom_fields.is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(InMemoryCatalog::from_json_str("not json").is_err());
    }

    #[test]
    fn test_from_json_file_reports_missing_file() {
        let err = InMemoryCatalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[tokio::test]
    async fn test_fetch_returns_snapshot_in_order() {
        let catalog = InMemoryCatalog {
            movies: vec![NamedRecord::new("m2", "Beta"), NamedRecord::new("m1", "Alpha")],
            ..Default::default()
        };
        let movies = catalog.fetch_named(NamedKind::Movie).await.unwrap();
        assert_eq!(movies, catalog.movies);
        assert!(catalog
            .fetch_matchable(MatchableKind::Actor)
            .await
            .unwrap()
            .is_empty());
    }
}

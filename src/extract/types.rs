use serde::{Deserialize, Serialize};
use std::fmt;

use super::alias::ParsedAlias;
use super::normalizer::normalize;
use crate::error::Result;

/// Catalog kinds whose records carry aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchableKind {
    Label,
    Actor,
    Studio,
}

impl MatchableKind {
    /// Whether single-word names and literal aliases are skipped when matching.
    ///
    /// People commonly carry a bare first name as an alias, which would match
    /// far too much arbitrary text.
    pub fn ignores_single_words(self) -> bool {
        matches!(self, MatchableKind::Actor)
    }

    /// Studios surface the longest (most specific) name first.
    pub fn sorts_by_specificity(self) -> bool {
        matches!(self, MatchableKind::Studio)
    }

    pub fn table(self) -> &'static str {
        match self {
            MatchableKind::Label => "labels",
            MatchableKind::Actor => "actors",
            MatchableKind::Studio => "studios",
        }
    }
}

impl fmt::Display for MatchableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Catalog kinds matched by name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedKind {
    Scene,
    Movie,
    CustomField,
}

impl NamedKind {
    pub fn sorts_by_specificity(self) -> bool {
        !matches!(self, NamedKind::CustomField)
    }

    pub fn table(self) -> &'static str {
        match self {
            NamedKind::Scene => "scenes",
            NamedKind::Movie => "movies",
            NamedKind::CustomField => "custom_fields",
        }
    }
}

impl fmt::Display for NamedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Every kind an extraction can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Matchable(MatchableKind),
    Named(NamedKind),
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Matchable(kind) => fmt::Display::fmt(kind, f),
            EntityKind::Named(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "label" | "labels" => Ok(EntityKind::Matchable(MatchableKind::Label)),
            "actor" | "actors" => Ok(EntityKind::Matchable(MatchableKind::Actor)),
            "studio" | "studios" => Ok(EntityKind::Matchable(MatchableKind::Studio)),
            "scene" | "scenes" => Ok(EntityKind::Named(NamedKind::Scene)),
            "movie" | "movies" => Ok(EntityKind::Named(NamedKind::Movie)),
            "field" | "fields" | "custom_field" | "custom_fields" => {
                Ok(EntityKind::Named(NamedKind::CustomField))
            }
            other => Err(format!("unknown entity kind '{}'", other)),
        }
    }
}

/// A person, label or studio as handed out by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchableRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl MatchableRecord {
    pub fn new(id: &str, name: &str) -> Self {
        MatchableRecord {
            id: id.to_string(),
            name: name.to_string(),
            aliases: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = Some(aliases.iter().map(|a| a.to_string()).collect());
        self
    }

    /// Parse the aliases once so the record can be matched repeatedly.
    pub fn compile(&self) -> Result<CompiledRecord<'_>> {
        let aliases = self
            .aliases
            .iter()
            .flatten()
            .map(|raw| ParsedAlias::parse(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledRecord {
            id: &self.id,
            name: &self.name,
            normalized_name: normalize(&self.name),
            aliases,
        })
    }
}

/// A scene, movie or custom field: matched by its name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord {
    pub id: String,
    pub name: String,
}

impl NamedRecord {
    pub fn new(id: &str, name: &str) -> Self {
        NamedRecord {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A matchable record with its aliases parsed.
#[derive(Debug, Clone)]
pub struct CompiledRecord<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub normalized_name: String,
    pub aliases: Vec<ParsedAlias>,
}

/// Identifier lists returned by a combined extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIds {
    pub labels: Vec<String>,
    pub actors: Vec<String>,
    pub studios: Vec<String>,
    pub scenes: Vec<String>,
    pub movies: Vec<String>,
    pub custom_fields: Vec<String>,
}

impl ExtractedIds {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
            && self.actors.is_empty()
            && self.studios.is_empty()
            && self.scenes.is_empty()
            && self.movies.is_empty()
            && self.custom_fields.is_empty()
    }
}

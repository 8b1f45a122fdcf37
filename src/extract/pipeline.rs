//! Per-kind extraction: fetch every record of a kind, keep the ones the input
//! references, return their ids.

use std::cmp::Reverse;
use tracing::{debug, instrument};

use super::alias::contains_needle;
use super::normalizer::normalize;
use super::types::{
    CompiledRecord, ExtractedIds, MatchableKind, MatchableRecord, NamedKind, NamedRecord,
};
use super::TARGET_EXTRACT;
use crate::catalog::Catalog;
use crate::error::{ExtractError, Result};

/// Labels referenced by `input`, in catalog order.
pub async fn extract_labels<C: Catalog + ?Sized>(
    catalog: &C,
    input: &str,
) -> Result<Vec<String>> {
    extract_matchable(catalog, MatchableKind::Label, input).await
}

/// Actors referenced by `input`, in catalog order. Single-word names and
/// aliases are ignored.
pub async fn extract_actors<C: Catalog + ?Sized>(
    catalog: &C,
    input: &str,
) -> Result<Vec<String>> {
    extract_matchable(catalog, MatchableKind::Actor, input).await
}

/// Studios referenced by `input`, longest name first.
pub async fn extract_studios<C: Catalog + ?Sized>(
    catalog: &C,
    input: &str,
) -> Result<Vec<String>> {
    extract_matchable(catalog, MatchableKind::Studio, input).await
}

/// Scenes whose name appears in `input`, longest name first.
pub async fn extract_scenes<C: Catalog + ?Sized>(
    catalog: &C,
    input: &str,
) -> Result<Vec<String>> {
    extract_named(catalog, NamedKind::Scene, input).await
}

/// Movies whose name appears in `input`, longest name first.
pub async fn extract_movies<C: Catalog + ?Sized>(
    catalog: &C,
    input: &str,
) -> Result<Vec<String>> {
    extract_named(catalog, NamedKind::Movie, input).await
}

/// Custom fields whose name appears in `input`, in catalog order.
pub async fn extract_fields<C: Catalog + ?Sized>(
    catalog: &C,
    input: &str,
) -> Result<Vec<String>> {
    extract_named(catalog, NamedKind::CustomField, input).await
}

/// Run every pipeline against the same input. The first failure fails the
/// whole call.
#[instrument(target = "extract", level = "debug", skip(catalog))]
pub async fn extract_all<C: Catalog + ?Sized>(
    catalog: &C,
    input: &str,
) -> Result<ExtractedIds> {
    let (labels, actors, studios, scenes, movies, custom_fields) = tokio::try_join!(
        extract_labels(catalog, input),
        extract_actors(catalog, input),
        extract_studios(catalog, input),
        extract_scenes(catalog, input),
        extract_movies(catalog, input),
        extract_fields(catalog, input),
    )?;

    Ok(ExtractedIds {
        labels,
        actors,
        studios,
        scenes,
        movies,
        custom_fields,
    })
}

async fn extract_matchable<C: Catalog + ?Sized>(
    catalog: &C,
    kind: MatchableKind,
    input: &str,
) -> Result<Vec<String>> {
    let records = catalog
        .fetch_matchable(kind)
        .await
        .map_err(|source| ExtractError::Fetch {
            kind: kind.to_string(),
            source,
        })?;

    let mut found = match_records(&records, input, kind.ignores_single_words())?;
    if kind.sorts_by_specificity() {
        found.sort_by_key(|record| Reverse(record.name.chars().count()));
    }

    debug!(
        target: TARGET_EXTRACT,
        "Extracted {} of {} {} from input", found.len(), records.len(), kind
    );

    Ok(found.into_iter().map(|record| record.id.to_string()).collect())
}

/// Compile every record up front so a broken pattern fails the call no
/// matter where it sits in the list, then keep the matching ones.
fn match_records<'a>(
    records: &'a [MatchableRecord],
    input: &str,
    ignore_single_words: bool,
) -> Result<Vec<CompiledRecord<'a>>> {
    let compiled = records
        .iter()
        .map(MatchableRecord::compile)
        .collect::<Result<Vec<_>>>()?;

    let stripped_input = normalize(input);
    Ok(compiled
        .into_iter()
        .filter(|record| record.matches(&stripped_input, ignore_single_words))
        .collect())
}

async fn extract_named<C: Catalog + ?Sized>(
    catalog: &C,
    kind: NamedKind,
    input: &str,
) -> Result<Vec<String>> {
    let records = catalog
        .fetch_named(kind)
        .await
        .map_err(|source| ExtractError::Fetch {
            kind: kind.to_string(),
            source,
        })?;

    let stripped_input = normalize(input);
    let mut found: Vec<&NamedRecord> = records
        .iter()
        .filter(|record| contains_needle(&stripped_input, &normalize(&record.name)))
        .collect();
    if kind.sorts_by_specificity() {
        found.sort_by_key(|record| Reverse(record.name.chars().count()));
    }

    debug!(
        target: TARGET_EXTRACT,
        "Extracted {} of {} {} from input", found.len(), records.len(), kind
    );

    Ok(found.into_iter().map(|record| record.id.clone()).collect())
}

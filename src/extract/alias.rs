//! Alias parsing and the single-word heuristic.
//!
//! Catalog aliases are stored as plain strings. A string starting with
//! [`REGEX_MARKER`] is a case-insensitive pattern, anything else is a literal
//! phrase. [`Alias::parse`] turns that string convention into a real variant
//! once per record load so patterns are not recompiled per comparison.

use regex::{Regex, RegexBuilder};

use super::normalizer::normalize;
use crate::error::{ExtractError, Result};

pub const REGEX_MARKER: &str = "regex:";

#[derive(Debug, Clone)]
pub enum Alias {
    /// Literal phrase, stored already normalized.
    Literal(String),
    /// Compiled case-insensitive pattern, tested against the normalized input.
    Pattern(Regex),
}

impl Alias {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.strip_prefix(REGEX_MARKER) {
            Some(body) => RegexBuilder::new(body)
                .case_insensitive(true)
                .build()
                .map(Alias::Pattern)
                .map_err(|source| ExtractError::InvalidPattern {
                    alias: raw.to_string(),
                    source,
                }),
            None => Ok(Alias::Literal(normalize(raw))),
        }
    }

    /// Test this alias against an already-normalized input.
    pub fn matches(&self, stripped_input: &str) -> bool {
        match self {
            Alias::Literal(needle) => contains_needle(stripped_input, needle),
            Alias::Pattern(re) => re.is_match(stripped_input),
        }
    }
}

/// A parsed alias together with the facts the single-word filter needs about
/// its raw text (the normalized form has lost its spaces).
#[derive(Debug, Clone)]
pub struct ParsedAlias {
    pub alias: Alias,
    single_word_literal: bool,
}

impl ParsedAlias {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self {
            alias: Alias::parse(raw)?,
            single_word_literal: is_filtered_single_word(raw),
        })
    }

    /// True when the single-word filter would drop this alias.
    pub fn is_single_word_literal(&self) -> bool {
        self.single_word_literal
    }
}

/// Substring test on normalized strings. An empty needle never matches.
pub(crate) fn contains_needle(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

pub fn is_regex(alias: &str) -> bool {
    alias.starts_with(REGEX_MARKER)
}

/// True iff splitting on the literal space character yields one segment.
/// The empty string counts as a single word.
pub fn is_single_word(s: &str) -> bool {
    !s.contains(' ')
}

fn is_filtered_single_word(alias: &str) -> bool {
    !alias.is_empty() && !is_regex(alias) && is_single_word(alias)
}

/// Drop every non-empty, non-regex alias that is a single word.
pub fn filter_single_word_aliases<S: AsRef<str>>(aliases: &[S]) -> Vec<&str> {
    aliases
        .iter()
        .map(|alias| alias.as_ref())
        .filter(|alias| !is_filtered_single_word(alias))
        .collect()
}

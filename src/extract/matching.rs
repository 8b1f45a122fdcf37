use tracing::debug;

use super::alias::{contains_needle, filter_single_word_aliases, is_single_word, Alias};
use super::normalizer::normalize;
use super::types::{CompiledRecord, MatchableRecord};
use super::TARGET_EXTRACT;
use crate::error::Result;

/// Decide whether `record` is referenced by `input`.
///
/// With `ignore_single_words` set a single-word record name is never tested
/// and single-word literal aliases are dropped, so such records can only be
/// found through multi-word or `regex:` aliases.
///
/// Aliases are parsed as they are reached; a broken pattern is returned as an
/// error rather than skipped.
pub fn is_matching(
    input: &str,
    record: &MatchableRecord,
    ignore_single_words: bool,
) -> Result<bool> {
    debug!(
        target: TARGET_EXTRACT,
        "Checking if {} matches {}", record.name, input
    );

    let stripped_input = normalize(input);
    if stripped_input.is_empty() {
        return Ok(false);
    }

    if name_matches(
        &record.name,
        &normalize(&record.name),
        &stripped_input,
        ignore_single_words,
    ) {
        return Ok(true);
    }

    let all_aliases: &[String] = record.aliases.as_deref().unwrap_or_default();
    let aliases: Vec<&str> = if ignore_single_words {
        filter_single_word_aliases(all_aliases)
    } else {
        all_aliases.iter().map(String::as_str).collect()
    };

    for raw in aliases {
        let alias = Alias::parse(raw)?;
        if let Alias::Pattern(_) = alias {
            debug!(
                target: TARGET_EXTRACT,
                "Regex: {} for {}", raw, stripped_input
            );
        }
        if alias.matches(&stripped_input) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Name half of the rule: under the single-word policy a one-word name is
/// never tested.
fn name_matches(
    name: &str,
    normalized_name: &str,
    stripped_input: &str,
    ignore_single_words: bool,
) -> bool {
    (!ignore_single_words || !is_single_word(name))
        && contains_needle(stripped_input, normalized_name)
}

impl CompiledRecord<'_> {
    /// Same rule as [`is_matching`] against an input that is already normalized.
    pub fn matches(&self, stripped_input: &str, ignore_single_words: bool) -> bool {
        if stripped_input.is_empty() {
            return false;
        }

        if name_matches(
            self.name,
            &self.normalized_name,
            stripped_input,
            ignore_single_words,
        ) {
            return true;
        }

        self.aliases
            .iter()
            .filter(|parsed| !(ignore_single_words && parsed.is_single_word_literal()))
            .any(|parsed| parsed.alias.matches(stripped_input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    fn both_forms(input: &str, record: &MatchableRecord, ignore_single_words: bool) -> bool {
        let direct = is_matching(input, record, ignore_single_words).unwrap();
        let compiled = record
            .compile()
            .unwrap()
            .matches(&normalize(input), ignore_single_words);
        assert_eq!(direct, compiled, "forms disagree for {:?} / {:?}", input, record);
        direct
    }

    #[test]
    fn test_name_matches_policy() {
        assert!(!name_matches("Max", "max", "maxpayne", true));
        assert!(name_matches("Max", "max", "maxpayne", false));
        assert!(name_matches("Max Payne", "maxpayne", "maxpayne2", true));
        assert!(!name_matches("!!!", "", "maxpayne", false));
    }

    #[test]
    fn test_name_substring_after_normalization() {
        let record = MatchableRecord::new("s1", "Blue Origin");
        let hyphenated = MatchableRecord::new("s2", "blue-origin");
        assert!(both_forms("[BLUE-ORIGIN] launch.mp4", &hyphenated, false));
        assert!(both_forms("blueorigin launch", &record, false));
        assert!(both_forms("The Blue Origin launch", &record, true));
        assert!(!both_forms("Blue Moon", &record, false));
    }

    #[test]
    fn test_apostrophe_is_significant() {
        let record = MatchableRecord::new("a1", "O'Brien");
        assert!(both_forms("Meet O'Brien today", &record, false));
        assert!(!both_forms("Meet OBrien today", &record, false));
    }

    #[test]
    fn test_single_word_name_skipped_under_policy() {
        let record = MatchableRecord::new("a1", "Max");
        assert!(!both_forms("max payne", &record, true));
        assert!(both_forms("max payne", &record, false));
    }

    #[test]
    fn test_single_word_alias_dropped_under_policy() {
        let record = MatchableRecord::new("a1", "Maximilian Power").with_aliases(&["Max"]);
        assert!(!both_forms("max payne", &record, true));
        assert!(both_forms("max payne", &record, false));
    }

    #[test]
    fn test_multi_word_alias_survives_policy() {
        let record = MatchableRecord::new("a1", "Maximilian").with_aliases(&["Max", "Max Power"]);
        assert!(both_forms("starring max power", &record, true));
        assert!(!both_forms("starring max", &record, true));
    }

    #[test]
    fn test_regex_alias_against_normalized_input() {
        let record = MatchableRecord::new("s1", "Acme").with_aliases(&["regex:^the.*corp$"]);
        assert!(both_forms("The Big Corp", &record, false));
        assert!(both_forms("The Big Corp", &record, true));
        assert!(!both_forms("Not The Big Corp", &record, false));
    }

    #[test]
    fn test_regex_alias_survives_policy_for_single_word_name() {
        let record = MatchableRecord::new("a1", "Max").with_aliases(&["regex:\\bmax\\d+"]);
        assert!(!both_forms("max payne", &record, true));
        assert!(both_forms("max42 payne", &record, true));
    }

    #[test]
    fn test_invalid_regex_propagates() {
        let record = MatchableRecord::new("s1", "Acme").with_aliases(&["regex:(oops"]);
        let err = is_matching("nothing to see", &record, false).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPattern { .. }));
    }

    #[test]
    fn test_name_hit_short_circuits_alias_parsing() {
        let record = MatchableRecord::new("s1", "Acme").with_aliases(&["regex:(oops"]);
        assert!(is_matching("acme presents", &record, false).unwrap());
    }

    #[test]
    fn test_empty_aliases_and_input() {
        let record = MatchableRecord::new("l1", "Outdoor").with_aliases(&[]);
        assert!(!both_forms("indoor scene", &record, false));
        assert!(!both_forms("", &record, false));
        let catch_all = MatchableRecord::new("l2", "Anything").with_aliases(&["regex:.*"]);
        assert!(!both_forms("   ", &catch_all, false));
    }

    #[test]
    fn test_empty_alias_without_policy_does_not_match() {
        let record = MatchableRecord::new("l1", "Outdoor").with_aliases(&[""]);
        assert!(!both_forms("indoor scene", &record, false));
        assert!(!both_forms("indoor scene", &record, true));
    }
}

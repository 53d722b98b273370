//! Pattern library: static, versioned matcher tables.
//!
//! Everything here is configuration data. Tables are `&'static` arrays and
//! their compiled regexes live in `LazyLock` statics built on first use, so
//! every parse shares one immutable copy.

pub mod anatomy;
pub mod complaints;
pub mod keywords;
pub mod symptoms;
pub mod syndromes;

use std::sync::LazyLock;

use regex::{Match, Regex};

/// Bumped whenever any table changes. Recorded on every result.
pub const PATTERN_LIBRARY_VERSION: &str = "2.4.0";

/// Compile the lazily-built tables up front so the first parse is not
/// charged for regex compilation against its time budget.
pub fn warm_up() {
    LazyLock::force(&symptoms::COMPILED_SYMPTOMS);
    LazyLock::force(&complaints::COMPILED_TEMPLATES);
    for set in [
        &*keywords::QUALITY_WORDS,
        &*keywords::EXTREME_PHRASES,
        &*keywords::SEVERE_PHRASES,
        &*keywords::MODERATE_PHRASES,
        &*keywords::MILD_PHRASES,
        &*keywords::FUNCTIONAL_PHRASES,
        &*keywords::ONSET_ACUTE,
        &*keywords::PROGRESSION_WORSENING,
        &*keywords::FREQUENCY_INTERMITTENT,
        &*keywords::CHRONIC_KEYWORDS,
    ] {
        let _ = set.is_match("");
    }
    let _ = keywords::DURATION_COUNT.is_match("");
}

/// Compile a literal phrase into a case-insensitive, word-bounded matcher.
/// Internal spaces match any run of whitespace.
pub(crate) fn phrase_regex(phrase: &str) -> Regex {
    let escaped = regex::escape(phrase).replace(' ', r"\s+");
    let leading = if phrase.starts_with(|c: char| c.is_alphanumeric()) { r"\b" } else { "" };
    let trailing = if phrase.ends_with(|c: char| c.is_alphanumeric()) { r"\b" } else { "" };
    Regex::new(&format!("(?i){leading}{escaped}{trailing}"))
        .expect("Invalid pattern library phrase")
}

/// An ordered list of literal phrases. Order matters: lookups report the
/// first phrase in list order that occurs, not the leftmost occurrence.
pub struct PhraseSet {
    phrases: Vec<(&'static str, Regex)>,
}

impl PhraseSet {
    pub fn new(phrases: &[&'static str]) -> Self {
        Self {
            phrases: phrases.iter().map(|p| (*p, phrase_regex(p))).collect(),
        }
    }

    /// First phrase (in list order) found in `text`, with its match.
    pub fn find<'t>(&self, text: &'t str) -> Option<(&'static str, Match<'t>)> {
        self.phrases
            .iter()
            .find_map(|(phrase, re)| re.find(text).map(|m| (*phrase, m)))
    }

    /// Like [`PhraseSet::find`], but only matches accepted by `keep` count.
    /// Every occurrence of a phrase is tried before moving to the next phrase.
    pub fn find_where<'t>(
        &self,
        text: &'t str,
        mut keep: impl FnMut(&Match<'t>) -> bool,
    ) -> Option<(&'static str, Match<'t>)> {
        self.phrases.iter().find_map(|(phrase, re)| {
            re.find_iter(text).find(|m| keep(m)).map(|m| (*phrase, m))
        })
    }

    /// Leftmost occurrence of any phrase.
    pub fn earliest<'t>(&self, text: &'t str) -> Option<(&'static str, Match<'t>)> {
        self.phrases
            .iter()
            .filter_map(|(phrase, re)| re.find(text).map(|m| (*phrase, m)))
            .min_by_key(|(_, m)| (m.start(), std::cmp::Reverse(m.len())))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.phrases.iter().any(|(_, re)| re.is_match(text))
    }

    /// Every phrase that occurs, in list order.
    pub fn matches_in(&self, text: &str) -> Vec<&'static str> {
        self.phrases
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| *phrase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_regex_respects_word_boundaries() {
        let re = phrase_regex("tired");
        assert!(re.is_match("I am so tired today"));
        assert!(!re.is_match("I retired last year"));
    }

    #[test]
    fn phrase_regex_is_case_and_space_insensitive() {
        let re = phrase_regex("chest pain");
        assert!(re.is_match("Chest   Pain since noon"));
        assert!(re.is_match("CHEST PAIN"));
    }

    #[test]
    fn phrase_regex_handles_punctuation_edges() {
        let re = phrase_regex("10/10");
        assert!(re.is_match("pain is 10/10"));
        let re = phrase_regex("can't breathe");
        assert!(re.is_match("I can't breathe"));
    }

    #[test]
    fn phrase_set_reports_list_order_not_text_order() {
        let set = PhraseSet::new(&["severe", "mild"]);
        let (phrase, m) = set.find("mild at first, now severe").unwrap();
        assert_eq!(phrase, "severe");
        assert_eq!(m.as_str(), "severe");
        assert_eq!(set.matches_in("mild then severe"), vec!["severe", "mild"]);
        let (phrase, _) = set.earliest("mild at first, now severe").unwrap();
        assert_eq!(phrase, "mild");
    }

    #[test]
    fn find_where_skips_rejected_occurrences() {
        let set = PhraseSet::new(&["severe", "mild"]);
        let text = "not severe, mild, then severe again";
        let (phrase, m) = set.find_where(text, |m| m.start() > 4).unwrap();
        assert_eq!(phrase, "severe");
        assert_eq!(m.start(), 23);
        let (phrase, _) = set.find_where(text, |m| m.as_str() != "severe").unwrap();
        assert_eq!(phrase, "mild");
        assert!(set.find_where(text, |_| false).is_none());
    }
}

//! Keyword families for negation, quality, severity and temporal inference.
//!
//! Family order is significant wherever a caller checks "first family wins".

use std::sync::LazyLock;

use regex::Regex;

use super::PhraseSet;

// ═══════════════════════════════════════════════════════════
// Negation
// ═══════════════════════════════════════════════════════════

/// Words within [`NEGATION_WINDOW`] tokens before a match that negate it.
pub const NEGATION_CUES: &[&str] = &[
    "no", "not", "without", "denies", "deny", "denied", "never", "none", "negative", "don't",
    "dont", "doesn't", "haven't", "hasn't", "isn't",
];

/// Words that close the negation scope (the cue applies to a different clause).
pub const NEGATION_BREAKS: &[&str] = &["but", "however", "although", "though", "yet", "and"];

pub const NEGATION_WINDOW: usize = 4;

/// "never had/felt ..." is emphasis rather than denial when the clause goes
/// on to compare ("never had chest pain like this").
pub const EMPHATIC_NEVER_VERBS: &[&str] = &["had", "felt", "experienced", "gotten", "known"];

pub static EMPHATIC_COMPARISONS: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "like this", "like that", "this bad", "that bad", "so bad", "this severe",
        "this painful", "this intense", "before", "in my life",
    ])
});

// ═══════════════════════════════════════════════════════════
// Quality descriptors
// ═══════════════════════════════════════════════════════════

pub static QUALITY_WORDS: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "sharp", "dull", "throbbing", "pounding", "burning", "crushing", "stabbing", "pressure",
        "aching", "cramping", "tight", "squeezing", "shooting", "radiating",
    ])
});

// ═══════════════════════════════════════════════════════════
// Severity
// ═══════════════════════════════════════════════════════════

pub static EXTREME_PHRASES: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "worst pain of my life", "worst headache of my life", "worst of my life", "worst ever",
        "unbearable", "excruciating", "agonizing", "can't take it anymore", "can't bear it",
    ])
});

pub static SEVERE_PHRASES: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "severe", "severely", "terrible", "horrible", "intense", "really bad", "very bad",
        "awful", "extremely",
    ])
});

/// Comparative phrases map to the severe family.
pub static COMPARATIVE_PHRASES: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "worse than usual", "worse than before", "worse than ever", "never felt this bad",
        "never had it this bad", "much worse",
    ])
});

pub static MODERATE_PHRASES: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "moderate", "pretty bad", "quite bad", "significant", "uncomfortable", "fairly bad",
    ])
});

pub static MILD_PHRASES: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["mild", "slight", "slightly", "a little", "minor", "bit of", "a bit"])
});

/// Self-reported 0–10 rating: "7/10", "8 out of 10".
pub static NUMERIC_RATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*(?:/|out\s+of)\s*10\b").expect("Invalid rating regex pattern")
});

/// Statements of lost function; these force at least a severe assessment.
pub static FUNCTIONAL_PHRASES: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "can't work", "cannot work", "unable to work", "missed work", "bed rest", "bedridden",
        "stuck in bed", "can't get out of bed", "emergency room", "went to the er",
        "called an ambulance", "can't walk", "unable to walk", "can't function",
    ])
});

// ═══════════════════════════════════════════════════════════
// Temporal
// ═══════════════════════════════════════════════════════════

pub static ONSET_ACUTE: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "all of a sudden", "suddenly", "sudden", "out of nowhere", "abruptly", "came on fast",
    ])
});

pub static ONSET_GRADUAL: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["gradually", "slowly", "over time", "progressively", "little by little"])
});

pub static ONSET_TIMED: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "since", "started", "began", "yesterday", "this morning", "last night", "today",
    ])
});

pub static PROGRESSION_FLUCTUATING: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["comes and goes", "on and off", "off and on", "up and down"])
});

pub static PROGRESSION_WORSENING: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["getting worse", "worsening", "worse", "increasing", "spreading"])
});

pub static PROGRESSION_IMPROVING: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["getting better", "improving", "better", "easing", "subsiding"])
});

pub static PROGRESSION_STABLE: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["unchanged", "steady", "hasn't changed", "the same"])
});

pub static FREQUENCY_INTERMITTENT: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "comes and goes", "on and off", "off and on", "intermittent", "sometimes",
        "occasionally", "episodes", "now and then",
    ])
});

pub static FREQUENCY_CONSTANT: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&[
        "constant", "constantly", "all the time", "nonstop", "non-stop", "continuous",
        "persistent",
    ])
});

pub static FREQUENCY_VARIABLE: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["varies", "some days", "unpredictable", "depends on the day"])
});

pub static CHRONIC_KEYWORDS: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["chronic", "for years", "long-standing", "longstanding", "ongoing"])
});

pub static ACUTE_KEYWORDS: LazyLock<PhraseSet> =
    LazyLock::new(|| PhraseSet::new(&["just started", "brand new", "new onset"]));

/// Count + unit: "for 3 days", "a couple of weeks", "two hours".
pub static DURATION_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:for|over|past|last|about|almost|nearly)\s+)?(?:the\s+)?(\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten|few|couple(?:\s+of)?|several)\s+(seconds?|minutes?|mins?|hours?|hrs?|days?|nights?|weeks?|wks?|months?|years?|yrs?)\b",
    )
    .expect("Invalid duration regex pattern")
});

/// Relative "since" phrases: "since yesterday", "since last week", "since Monday".
pub static SINCE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bsince\s+(yesterday|this\s+morning|last\s+(?:night|week|month|year)|(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
    )
    .expect("Invalid since-phrase regex pattern")
});

/// Bare time anchors, used only when no duration or since-phrase is present.
pub static TIME_ANCHORS: LazyLock<PhraseSet> = LazyLock::new(|| {
    PhraseSet::new(&["yesterday", "this morning", "last night", "today", "tonight"])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rating_captures_value() {
        let caps = NUMERIC_RATING.captures("pain is about 8 out of 10").unwrap();
        assert_eq!(&caps[1], "8");
        let caps = NUMERIC_RATING.captures("a solid 7/10").unwrap();
        assert_eq!(&caps[1], "7");
        assert!(NUMERIC_RATING.captures("took 2 pills").is_none());
    }

    #[test]
    fn duration_count_captures_quantity_and_unit() {
        let caps = DURATION_COUNT.captures("I've had it for 3 days now").unwrap();
        assert_eq!(&caps[1], "3");
        assert_eq!(&caps[2], "days");
        let caps = DURATION_COUNT.captures("a couple of weeks").unwrap();
        assert_eq!(&caps[2], "weeks");
    }

    #[test]
    fn since_phrase_matches_relative_anchors() {
        assert!(SINCE_PHRASE.is_match("since yesterday"));
        assert!(SINCE_PHRASE.is_match("Since last week"));
        assert!(SINCE_PHRASE.is_match("since Monday"));
        assert!(!SINCE_PHRASE.is_match("since then"));
    }

    #[test]
    fn crushing_is_quality_not_severity() {
        assert!(QUALITY_WORDS.is_match("crushing chest pain"));
        assert!(!EXTREME_PHRASES.is_match("crushing chest pain"));
        assert!(!SEVERE_PHRASES.is_match("crushing chest pain"));
    }

    #[test]
    fn functional_phrases_detect_lost_function() {
        assert!(FUNCTIONAL_PHRASES.is_match("I can't work because of it"));
        assert!(!FUNCTIONAL_PHRASES.is_match("I walked to work"));
    }
}

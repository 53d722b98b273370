//! Temporal inference over the whole utterance.

use crate::models::{
    Chronicity, FrequencyPattern, OnsetType, Progression, TemporalAnalysis, TimeUnit,
};
use crate::patterns::keywords::{
    ACUTE_KEYWORDS, CHRONIC_KEYWORDS, DURATION_COUNT, FREQUENCY_CONSTANT, FREQUENCY_INTERMITTENT,
    FREQUENCY_VARIABLE, ONSET_ACUTE, ONSET_GRADUAL, ONSET_TIMED, PROGRESSION_FLUCTUATING,
    PROGRESSION_IMPROVING, PROGRESSION_STABLE, PROGRESSION_WORSENING, SINCE_PHRASE, TIME_ANCHORS,
};
use crate::patterns::PhraseSet;

const DURATION_WEIGHT: f32 = 0.30;
const ONSET_WEIGHT: f32 = 0.25;
const PROGRESSION_WEIGHT: f32 = 0.20;
const FREQUENCY_WEIGHT: f32 = 0.15;
const CHRONICITY_EXPLICIT_WEIGHT: f32 = 0.10;
const CHRONICITY_INFERRED_WEIGHT: f32 = 0.05;
const MAX_CONFIDENCE: f32 = 0.95;

pub fn infer_temporal(text: &str) -> TemporalAnalysis {
    let mut analysis = TemporalAnalysis::empty();
    let mut confidence = 0.0;

    if let Some((duration, unit)) = find_duration(text) {
        analysis.duration = Some(duration);
        analysis.duration_unit = unit;
        confidence += DURATION_WEIGHT;
    }

    analysis.onset = first_family(
        text,
        &[
            (&*ONSET_ACUTE, OnsetType::Acute),
            (&*ONSET_GRADUAL, OnsetType::Gradual),
            (&*ONSET_TIMED, OnsetType::Timed),
        ],
    )
    .unwrap_or(OnsetType::Unspecified);
    if analysis.onset != OnsetType::Unspecified {
        confidence += ONSET_WEIGHT;
    }

    analysis.progression = first_family(
        text,
        &[
            (&*PROGRESSION_FLUCTUATING, Progression::Fluctuating),
            (&*PROGRESSION_WORSENING, Progression::Worsening),
            (&*PROGRESSION_IMPROVING, Progression::Improving),
            (&*PROGRESSION_STABLE, Progression::Stable),
        ],
    );
    if analysis.progression.is_some() {
        confidence += PROGRESSION_WEIGHT;
    }

    analysis.frequency = first_family(
        text,
        &[
            (&*FREQUENCY_INTERMITTENT, FrequencyPattern::Intermittent),
            (&*FREQUENCY_CONSTANT, FrequencyPattern::Constant),
            (&*FREQUENCY_VARIABLE, FrequencyPattern::Variable),
        ],
    );
    if analysis.frequency.is_some() {
        confidence += FREQUENCY_WEIGHT;
    }

    let explicit = first_family(
        text,
        &[
            (&*CHRONIC_KEYWORDS, Chronicity::Chronic),
            (&*ACUTE_KEYWORDS, Chronicity::Acute),
        ],
    );
    if let Some(chronicity) = explicit {
        analysis.chronicity = Some(chronicity);
        confidence += CHRONICITY_EXPLICIT_WEIGHT;
    } else if let Some(unit) = analysis.duration_unit {
        analysis.chronicity = Some(unit.implied_chronicity());
        confidence += CHRONICITY_INFERRED_WEIGHT;
    }

    analysis.confidence = f32::min(confidence, MAX_CONFIDENCE);
    analysis
}

/// Duration rules in priority order: count + unit, "since ...", bare anchor.
fn find_duration(text: &str) -> Option<(String, Option<TimeUnit>)> {
    if let Some(caps) = DURATION_COUNT.captures(text) {
        let whole = caps.get(0)?.as_str().trim().to_string();
        let unit = caps.get(2).and_then(|m| TimeUnit::from_word(m.as_str()));
        return Some((whole, unit));
    }
    if let Some(caps) = SINCE_PHRASE.captures(text) {
        let whole = caps.get(0)?.as_str().to_string();
        let unit = caps.get(1).and_then(|m| anchor_unit(m.as_str()));
        return Some((whole, unit));
    }
    TIME_ANCHORS
        .find(text)
        .map(|(anchor, m)| (m.as_str().to_string(), anchor_unit(anchor)))
}

/// Coarse unit implied by a relative time anchor.
fn anchor_unit(anchor: &str) -> Option<TimeUnit> {
    let anchor = anchor.to_lowercase();
    let anchor = anchor.split_whitespace().collect::<Vec<_>>().join(" ");
    match anchor.as_str() {
        "this morning" | "last night" | "today" | "tonight" => Some(TimeUnit::Hours),
        "yesterday" => Some(TimeUnit::Days),
        "last week" => Some(TimeUnit::Weeks),
        "last month" => Some(TimeUnit::Months),
        "last year" => Some(TimeUnit::Years),
        "monday" | "tuesday" | "wednesday" | "thursday" | "friday" | "saturday" | "sunday" => {
            Some(TimeUnit::Days)
        }
        _ => None,
    }
}

fn first_family<T: Copy>(text: &str, families: &[(&PhraseSet, T)]) -> Option<T> {
    families
        .iter()
        .find(|(set, _)| set.is_match(text))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn since_yesterday_is_timed_subacute() {
        let t = infer_temporal("I have a mild headache since yesterday");
        assert_eq!(t.duration.as_deref(), Some("since yesterday"));
        assert_eq!(t.duration_unit, Some(TimeUnit::Days));
        assert_eq!(t.onset, OnsetType::Timed);
        assert_eq!(t.chronicity, Some(Chronicity::Subacute));
        assert!(close(t.confidence, 0.60));
    }

    #[test]
    fn explicit_count_and_unit() {
        let t = infer_temporal("coughing for 3 weeks and it is getting worse");
        assert_eq!(t.duration.as_deref(), Some("for 3 weeks"));
        assert_eq!(t.duration_unit, Some(TimeUnit::Weeks));
        assert_eq!(t.progression, Some(Progression::Worsening));
        assert_eq!(t.chronicity, Some(Chronicity::Chronic));
        assert_eq!(t.onset, OnsetType::Unspecified);
        assert!(close(t.confidence, 0.30 + 0.20 + 0.05));
    }

    #[test]
    fn onset_families_checked_in_order() {
        let t = infer_temporal("it started suddenly this morning");
        assert_eq!(t.onset, OnsetType::Acute);
        let t = infer_temporal("it came on gradually since last week");
        assert_eq!(t.onset, OnsetType::Gradual);
    }

    #[test]
    fn fluctuating_beats_worsening() {
        let t = infer_temporal("pain comes and goes but it is worse at night");
        assert_eq!(t.progression, Some(Progression::Fluctuating));
        assert_eq!(t.frequency, Some(FrequencyPattern::Intermittent));
    }

    #[test]
    fn explicit_chronicity_overrides_unit() {
        let t = infer_temporal("chronic back pain, worse for 2 days");
        assert_eq!(t.chronicity, Some(Chronicity::Chronic));
        assert_eq!(t.duration_unit, Some(TimeUnit::Days));
    }

    #[test]
    fn confidence_is_capped() {
        let t = infer_temporal(
            "it started suddenly 3 days ago, constant and getting worse, chronic really",
        );
        assert!(t.confidence <= MAX_CONFIDENCE);
        assert!(close(t.confidence, MAX_CONFIDENCE));
    }

    #[test]
    fn no_temporal_language() {
        let t = infer_temporal("headache and nausea");
        assert_eq!(t, TemporalAnalysis::empty());
        assert!(!t.has_information());
    }
}

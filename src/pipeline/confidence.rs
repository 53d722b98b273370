use crate::config::ConfidenceWeights;
use crate::models::{
    ConfidenceAnalysis, ConfidenceTier, RelationshipAnalysis, SeverityAssessment, SeverityBasis,
    SymptomCandidate, TemporalAnalysis, UncertaintyFlag,
};

/// Tier boundaries used by [`ConfidenceTier::from_score`] and the aggregator flags.
pub mod thresholds {
    /// Below this: the parse carries almost no usable signal.
    pub const VERY_LOW: f32 = 0.30;

    /// Below this: significant uncertainty. Also the low-symptom-confidence flag.
    pub const LOW: f32 = 0.50;

    /// Below this: some uncertainty.
    pub const MEDIUM: f32 = 0.70;

    /// At or above this: very high confidence.
    pub const HIGH: f32 = 0.90;
}

/// Degradations detected before aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputQuality {
    pub normalization_degraded: bool,
    pub truncated: bool,
}

pub fn aggregate_confidence(
    symptoms: &[SymptomCandidate],
    temporal: &TemporalAnalysis,
    severity: &SeverityAssessment,
    relationships: &RelationshipAnalysis,
    weights: &ConfidenceWeights,
    quality: InputQuality,
) -> ConfidenceAnalysis {
    let symptom = mean_confidence(symptoms);
    let overall = (weights.symptom * symptom
        + weights.temporal * temporal.confidence
        + weights.severity * severity.confidence
        + weights.relationship * relationships.confidence)
        .clamp(0.0, 1.0);

    let mut flags = Vec::new();
    if symptoms.is_empty() {
        flags.push(UncertaintyFlag::NoSymptomsDetected);
    } else if symptom < thresholds::LOW {
        flags.push(UncertaintyFlag::LowSymptomConfidence);
    }
    if !temporal.has_information() {
        flags.push(UncertaintyFlag::NoTemporalInformation);
    }
    if severity.basis == SeverityBasis::Unspecified {
        flags.push(UncertaintyFlag::SeverityUnspecified);
    }
    if !symptoms.is_empty() && symptoms.iter().all(|s| !s.is_direct()) {
        flags.push(UncertaintyFlag::PatternOnlyExtraction);
    }
    if quality.normalization_degraded {
        flags.push(UncertaintyFlag::NormalizationDegraded);
    }
    if quality.truncated {
        flags.push(UncertaintyFlag::InputTruncated);
    }

    ConfidenceAnalysis {
        overall,
        tier: ConfidenceTier::from_score(overall),
        symptom,
        temporal: temporal.confidence,
        severity: severity.confidence,
        relationship: relationships.confidence,
        flags,
    }
}

fn mean_confidence(symptoms: &[SymptomCandidate]) -> f32 {
    if symptoms.is_empty() {
        return 0.0;
    }
    let total: f32 = symptoms.iter().map(|s| s.confidence).sum();
    (total / symptoms.len() as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symptom::test_support::candidate;
    use crate::models::{ExtractionMethod, SeverityTier};
    use crate::pipeline::relationships::analyze_relationships;

    fn severity(confidence: f32, basis: SeverityBasis) -> SeverityAssessment {
        SeverityAssessment {
            tier: SeverityTier::Mild,
            score: 2.5,
            basis,
            matched_text: None,
            confidence,
        }
    }

    #[test]
    fn weighted_sum_of_components() {
        let symptoms = vec![candidate("headache", 0.85, ExtractionMethod::DirectLookup)];
        let mut temporal = TemporalAnalysis::empty();
        temporal.onset = crate::models::OnsetType::Timed;
        temporal.confidence = 0.6;
        let relationships = analyze_relationships(&symptoms);

        let c = aggregate_confidence(
            &symptoms,
            &temporal,
            &severity(0.8, SeverityBasis::Explicit),
            &relationships,
            &ConfidenceWeights::default(),
            InputQuality::default(),
        );

        assert!((c.overall - 0.72).abs() < 1e-5);
        assert_eq!(c.tier, ConfidenceTier::High);
        assert!(c.flags.is_empty());
    }

    #[test]
    fn empty_parse_is_very_low_with_flags() {
        let relationships = analyze_relationships(&[]);
        let c = aggregate_confidence(
            &[],
            &TemporalAnalysis::empty(),
            &severity(0.3, SeverityBasis::Unspecified),
            &relationships,
            &ConfidenceWeights::default(),
            InputQuality::default(),
        );
        assert_eq!(c.tier, ConfidenceTier::VeryLow);
        assert_eq!(c.symptom, 0.0);
        assert_eq!(
            c.flags,
            vec![
                UncertaintyFlag::NoSymptomsDetected,
                UncertaintyFlag::NoTemporalInformation,
                UncertaintyFlag::SeverityUnspecified,
            ]
        );
    }

    #[test]
    fn pattern_only_and_degraded_inputs_are_flagged() {
        let symptoms = vec![candidate("back_pain", 0.45, ExtractionMethod::PatternMatch)];
        let relationships = analyze_relationships(&symptoms);
        let c = aggregate_confidence(
            &symptoms,
            &TemporalAnalysis::empty(),
            &severity(0.8, SeverityBasis::Explicit),
            &relationships,
            &ConfidenceWeights::default(),
            InputQuality {
                normalization_degraded: true,
                truncated: true,
            },
        );
        assert!(c.flags.contains(&UncertaintyFlag::LowSymptomConfidence));
        assert!(c.flags.contains(&UncertaintyFlag::PatternOnlyExtraction));
        assert!(c.flags.contains(&UncertaintyFlag::NormalizationDegraded));
        assert!(c.flags.contains(&UncertaintyFlag::InputTruncated));
    }

    #[test]
    fn overall_stays_within_bounds_for_extreme_components() {
        let symptoms = vec![candidate("cough", 1.0, ExtractionMethod::DirectLookup)];
        let mut relationships = analyze_relationships(&symptoms);
        relationships.confidence = 1.0;
        let mut temporal = TemporalAnalysis::empty();
        temporal.confidence = 1.0;
        let c = aggregate_confidence(
            &symptoms,
            &temporal,
            &severity(1.0, SeverityBasis::Explicit),
            &relationships,
            &ConfidenceWeights::default(),
            InputQuality::default(),
        );
        assert!(c.overall <= 1.0 && c.overall >= 0.0);
        assert_eq!(c.tier, ConfidenceTier::VeryHigh);
    }

    #[test]
    fn tiers_are_monotonic_in_score() {
        let mut previous = ConfidenceTier::from_score(0.0);
        for step in 0..=100 {
            let tier = ConfidenceTier::from_score(step as f32 / 100.0);
            assert!(tier >= previous);
            previous = tier;
        }
        assert_eq!(ConfidenceTier::from_score(thresholds::VERY_LOW), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(thresholds::LOW), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(thresholds::MEDIUM), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(thresholds::MEDIUM - 0.01), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(thresholds::HIGH), ConfidenceTier::VeryHigh);
    }
}

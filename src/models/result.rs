use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::*;
use super::enums::{ParseOutcome, UncertaintyFlag};
use super::symptom::SymptomCandidate;

// ═══════════════════════════════════════════
// Parse context (caller hints)
// ═══════════════════════════════════════════

/// Optional caller hints that bias severity and urgency scoring.
/// Every field absent means "no bias".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_conditions: Vec<String>,
    /// Unrecognized keys, kept so callers can round-trip their map.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ParseContext {
    pub fn with_age(age: u32) -> Self {
        Self {
            patient_age: Some(age),
            ..Self::default()
        }
    }

    /// Build from an arbitrary JSON value. Non-objects and ill-typed
    /// known keys degrade to "no bias" instead of failing.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let mut extra = map.clone();
        let patient_age = extra
            .remove("patient_age")
            .or_else(|| extra.remove("age"))
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok());
        let known_conditions = extra
            .remove("known_conditions")
            .and_then(|v| v.as_array().cloned())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.as_str().map(str::to_lowercase))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            patient_age,
            known_conditions,
            extra,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patient_age.is_none() && self.known_conditions.is_empty() && self.extra.is_empty()
    }

    /// Elderly or very young patients get scored more cautiously.
    pub fn age_bias(&self) -> bool {
        matches!(self.patient_age, Some(age) if age >= 65 || age < 5)
    }

    /// Any known condition from the high-risk list.
    pub fn has_high_risk_condition(&self) -> bool {
        self.known_conditions
            .iter()
            .any(|c| crate::patterns::syndromes::is_high_risk_condition(c))
    }

    /// Age or a chronic condition warrants a lower escalation threshold.
    pub fn elevated_risk(&self) -> bool {
        self.age_bias() || self.has_high_risk_condition()
    }
}

// ═══════════════════════════════════════════
// Result
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMetadata {
    pub original_text: String,
    /// Text the pipeline actually analyzed (normalized and/or truncated).
    pub analyzed_text: String,
    pub normalization_requested: bool,
    pub normalization_applied: bool,
    pub normalization_confidence: f32,
    pub timestamp: DateTime<Utc>,
    pub pattern_library_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub processing_time_ms: f64,
    /// Equal to the overall confidence.
    pub estimated_accuracy: f32,
    pub segment_count: usize,
    pub raw_candidate_count: usize,
}

/// Recommended whenever nothing usable was extracted.
pub const GATHER_DETAIL_ACTION: &str =
    "Ask the patient to describe their symptoms in more detail (location, duration, severity).";

/// The unit returned to callers and stored in the result cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub result_id: Uuid,
    pub input: InputMetadata,
    pub outcome: ParseOutcome,
    /// Confidence >= the primary threshold (0.7 by default).
    pub primary_symptoms: Vec<SymptomCandidate>,
    pub secondary_symptoms: Vec<SymptomCandidate>,
    pub temporal: TemporalAnalysis,
    pub severity: SeverityAssessment,
    pub urgency: UrgencyAssessment,
    pub anatomy: AnatomicalAnalysis,
    pub syndromes: Vec<SyndromeHypothesis>,
    pub red_flags: Vec<RedFlagCombination>,
    pub confidence: ConfidenceAnalysis,
    pub reasoning: ClinicalReasoning,
    pub metrics: PerformanceMetrics,
    /// Fault message or short-circuit reason. Never shown as a crash.
    pub diagnostic: Option<String>,
}

impl ParseResult {
    /// Structurally valid result with nothing extracted: used for too-short
    /// input and for internal faults.
    pub fn minimal(
        result_id: Uuid,
        input: InputMetadata,
        outcome: ParseOutcome,
        diagnostic: String,
        flags: Vec<UncertaintyFlag>,
    ) -> Self {
        let summary = match outcome {
            ParseOutcome::InputTooShort => {
                "Insufficient information: the statement is too short to analyze.".to_string()
            }
            _ => "Insufficient information: the statement could not be analyzed.".to_string(),
        };
        Self {
            result_id,
            input,
            outcome,
            primary_symptoms: vec![],
            secondary_symptoms: vec![],
            temporal: TemporalAnalysis::empty(),
            severity: SeverityAssessment::unassessed(),
            urgency: UrgencyAssessment::routine(),
            anatomy: AnatomicalAnalysis::empty(),
            syndromes: vec![],
            red_flags: vec![],
            confidence: ConfidenceAnalysis::zero(flags),
            reasoning: ClinicalReasoning {
                statements: vec![summary],
                recommended_actions: vec![GATHER_DETAIL_ACTION.to_string()],
                differential_considerations: vec![],
                emergency_indicators: vec![],
            },
            metrics: PerformanceMetrics {
                processing_time_ms: 0.0,
                estimated_accuracy: 0.0,
                segment_count: 0,
                raw_candidate_count: 0,
            },
            diagnostic: Some(diagnostic),
        }
    }

    /// All consolidated symptoms, primary first.
    pub fn symptoms(&self) -> impl Iterator<Item = &SymptomCandidate> {
        self.primary_symptoms.iter().chain(self.secondary_symptoms.iter())
    }

    pub fn symptom_names(&self) -> Vec<&str> {
        self.symptoms().map(|s| s.name.as_str()).collect()
    }

    pub fn has_symptom(&self, name: &str) -> bool {
        self.symptoms().any(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{ConfidenceTier, UrgencyTier};

    fn metadata() -> InputMetadata {
        InputMetadata {
            original_text: "hi".into(),
            analyzed_text: "hi".into(),
            normalization_requested: false,
            normalization_applied: false,
            normalization_confidence: 1.0,
            timestamp: Utc::now(),
            pattern_library_version: "test".into(),
        }
    }

    #[test]
    fn context_from_json_reads_known_keys() {
        let ctx = ParseContext::from_json(&serde_json::json!({
            "patient_age": 72,
            "known_conditions": ["Diabetes", "hypertension"],
            "locale": "en-GB"
        }));
        assert_eq!(ctx.patient_age, Some(72));
        assert_eq!(ctx.known_conditions, vec!["diabetes", "hypertension"]);
        assert!(ctx.extra.contains_key("locale"));
        assert!(ctx.age_bias());
        assert!(ctx.has_high_risk_condition());
    }

    #[test]
    fn context_from_json_accepts_age_alias_and_ignores_bad_types() {
        let ctx = ParseContext::from_json(&serde_json::json!({ "age": 30 }));
        assert_eq!(ctx.patient_age, Some(30));
        assert!(!ctx.age_bias());
        assert!(!ctx.elevated_risk());

        let ctx = ParseContext::from_json(&serde_json::json!({ "patient_age": "old" }));
        assert_eq!(ctx.patient_age, None);

        let ctx = ParseContext::from_json(&serde_json::json!([1, 2, 3]));
        assert!(ctx.is_empty());
    }

    #[test]
    fn minimal_result_is_zero_confidence_and_routine() {
        let result = ParseResult::minimal(
            Uuid::nil(),
            metadata(),
            ParseOutcome::InputTooShort,
            "input shorter than 3 characters".into(),
            vec![],
        );
        assert_eq!(result.confidence.overall, 0.0);
        assert_eq!(result.confidence.tier, ConfidenceTier::VeryLow);
        assert_eq!(result.urgency.tier, UrgencyTier::Routine);
        assert!(result.symptom_names().is_empty());
        assert!(result.reasoning.statements[0].starts_with("Insufficient information"));
        assert!(result.diagnostic.is_some());
    }
}

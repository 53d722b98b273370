//! Per-parse analysis structures produced by the attribute inferrers,
//! the relationship analyzer, the confidence aggregator and the reasoning
//! generator. One instance of each per parse, shared by all symptoms.

use serde::{Deserialize, Serialize};

use super::enums::{
    Chronicity, ClinicalCategory, ConfidenceTier, FrequencyPattern, OnsetType, Progression,
    SeverityBasis, SeverityTier, TimeUnit, UncertaintyFlag, UrgencyTier,
};

// ═══════════════════════════════════════════
// Temporal
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    /// Free-text span, e.g. "for 3 days" or "since yesterday".
    pub duration: Option<String>,
    pub duration_unit: Option<TimeUnit>,
    pub onset: OnsetType,
    pub progression: Option<Progression>,
    pub frequency: Option<FrequencyPattern>,
    pub chronicity: Option<Chronicity>,
    pub confidence: f32,
}

impl TemporalAnalysis {
    pub fn empty() -> Self {
        Self {
            duration: None,
            duration_unit: None,
            onset: OnsetType::Unspecified,
            progression: None,
            frequency: None,
            chronicity: None,
            confidence: 0.0,
        }
    }

    pub fn has_information(&self) -> bool {
        self.duration.is_some()
            || self.onset != OnsetType::Unspecified
            || self.progression.is_some()
            || self.frequency.is_some()
    }
}

// ═══════════════════════════════════════════
// Severity & urgency
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    pub tier: SeverityTier,
    /// 0.0-10.0
    pub score: f32,
    pub basis: SeverityBasis,
    pub matched_text: Option<String>,
    pub confidence: f32,
}

impl SeverityAssessment {
    /// Used by the minimal result: nothing assessed.
    pub fn unassessed() -> Self {
        Self {
            tier: SeverityTier::Mild,
            score: 0.0,
            basis: SeverityBasis::Unspecified,
            matched_text: None,
            confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyAssessment {
    pub tier: UrgencyTier,
    /// 0.0-1.0
    pub score: f32,
    /// Symptom names that triggered emergency classification.
    pub emergency_symptoms: Vec<String>,
}

impl UrgencyAssessment {
    pub fn routine() -> Self {
        Self {
            tier: UrgencyTier::Routine,
            score: 0.0,
            emergency_symptoms: vec![],
        }
    }
}

// ═══════════════════════════════════════════
// Anatomy
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnatomicalAnalysis {
    /// Canonical regions, in order of first mention or assignment.
    pub regions: Vec<String>,
    /// Distinct clinical categories of the consolidated symptoms.
    pub systems: Vec<ClinicalCategory>,
    /// True when at least one region was named in the text.
    pub explicit: bool,
    pub confidence: f32,
}

impl AnatomicalAnalysis {
    pub fn empty() -> Self {
        Self {
            regions: vec![],
            systems: vec![],
            explicit: false,
            confidence: 0.0,
        }
    }
}

// ═══════════════════════════════════════════
// Relationships
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyndromeHypothesis {
    pub name: String,
    pub confidence: f32,
    pub supporting_symptoms: Vec<String>,
    pub reasoning: String,
}

/// A fixed symptom pair whose co-occurrence is an emergency signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlagCombination {
    pub symptoms: [String; 2],
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipAnalysis {
    /// Sorted by confidence descending, then name.
    pub hypotheses: Vec<SyndromeHypothesis>,
    pub red_flags: Vec<RedFlagCombination>,
    pub confidence: f32,
}

// ═══════════════════════════════════════════
// Confidence
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAnalysis {
    pub overall: f32,
    pub tier: ConfidenceTier,
    pub symptom: f32,
    pub temporal: f32,
    pub severity: f32,
    pub relationship: f32,
    pub flags: Vec<UncertaintyFlag>,
}

impl ConfidenceAnalysis {
    pub fn zero(flags: Vec<UncertaintyFlag>) -> Self {
        Self {
            overall: 0.0,
            tier: ConfidenceTier::VeryLow,
            symptom: 0.0,
            temporal: 0.0,
            severity: 0.0,
            relationship: 0.0,
            flags,
        }
    }
}

// ═══════════════════════════════════════════
// Reasoning
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalReasoning {
    pub statements: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub differential_considerations: Vec<String>,
    pub emergency_indicators: Vec<String>,
}

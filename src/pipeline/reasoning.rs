//! Templated clinical narrative. Same inputs always give the same text.

use crate::models::{
    AnatomicalAnalysis, ClinicalReasoning, ConfidenceAnalysis, ConfidenceTier, OnsetType,
    RelationshipAnalysis, SeverityAssessment, SeverityBasis, SymptomCandidate, TemporalAnalysis,
    UrgencyAssessment, UrgencyTier, GATHER_DETAIL_ACTION,
};
use crate::patterns::syndromes::emergency_guidance;

const EMERGENCY_ACTION: &str =
    "Seek emergency care immediately (call emergency services or go to the nearest emergency department).";
const URGENT_ACTION: &str = "Arrange same-day medical evaluation.";
const ROUTINE_ACTION: &str = "Monitor symptoms and schedule a routine appointment if they persist.";
const CLARIFY_TIMING_ACTION: &str =
    "Clarify when the symptoms started and how they have changed since.";
const CLARIFY_SEVERITY_ACTION: &str = "Ask the patient to rate the severity on a 0-10 scale.";

/// Everything the narrative is built from.
pub struct ReasoningInputs<'a> {
    pub symptoms: &'a [SymptomCandidate],
    pub temporal: &'a TemporalAnalysis,
    pub severity: &'a SeverityAssessment,
    pub urgency: &'a UrgencyAssessment,
    pub relationships: &'a RelationshipAnalysis,
    pub anatomy: &'a AnatomicalAnalysis,
    pub confidence: &'a ConfidenceAnalysis,
}

pub fn generate_reasoning(inputs: &ReasoningInputs<'_>) -> ClinicalReasoning {
    let mut statements = Vec::new();
    let mut actions = Vec::new();
    let mut differentials = Vec::new();
    let mut indicators = Vec::new();

    // 1. Summary
    statements.push(summary_statement(inputs.symptoms));

    // 2. Emergency alert
    if inputs.urgency.tier >= UrgencyTier::Emergency {
        let names: Vec<String> =
            inputs.urgency.emergency_symptoms.iter().map(|n| human(n)).collect();
        statements.push(format!(
            "ALERT: {} presentation with emergency indicators: {}.",
            inputs.urgency.tier,
            names.join(", ")
        ));
        actions.push(EMERGENCY_ACTION.to_string());
        for name in &inputs.urgency.emergency_symptoms {
            indicators.push(human(name));
            if let Some(guidance) = emergency_guidance(name) {
                statements.push(format!("For {}, rule out {}.", human(name), guidance.rule_out));
                differentials.push(format!("Rule out {}", guidance.rule_out));
                actions.push(format!("{}.", guidance.workup));
            }
        }
    }
    for flag in &inputs.relationships.red_flags {
        indicators.push(flag.description.clone());
    }

    // 3. Syndrome hypotheses
    for hypothesis in &inputs.relationships.hypotheses {
        statements.push(format!(
            "Pattern consistent with {} ({:.0}% confidence): {}.",
            human(&hypothesis.name),
            hypothesis.confidence * 100.0,
            hypothesis.reasoning
        ));
        differentials.push(human(&hypothesis.name));
    }

    if !inputs.symptoms.is_empty() {
        // 4. System involvement
        let systems: Vec<&str> = inputs.anatomy.systems.iter().map(|s| s.as_str()).collect();
        match systems.len() {
            0 => {}
            1 => statements.push(format!("Single-system involvement: {}.", systems[0])),
            _ => statements.push(format!("Multi-system involvement: {}.", systems.join(", "))),
        }

        // 5. Temporal and severity narration
        statements.push(temporal_statement(inputs.temporal));
        statements.push(severity_statement(inputs.severity));
    }

    // 6. Confidence closing
    statements.push(closing_statement(inputs.confidence.tier));

    match inputs.urgency.tier {
        UrgencyTier::Critical | UrgencyTier::Emergency => {}
        UrgencyTier::Urgent => actions.push(URGENT_ACTION.to_string()),
        UrgencyTier::Routine if inputs.symptoms.is_empty() => {
            actions.push(GATHER_DETAIL_ACTION.to_string())
        }
        UrgencyTier::Routine => actions.push(ROUTINE_ACTION.to_string()),
    }
    if !inputs.symptoms.is_empty() {
        if !inputs.temporal.has_information() {
            actions.push(CLARIFY_TIMING_ACTION.to_string());
        }
        if inputs.severity.basis == SeverityBasis::Unspecified {
            actions.push(CLARIFY_SEVERITY_ACTION.to_string());
        }
    }

    ClinicalReasoning {
        statements,
        recommended_actions: dedup(actions),
        differential_considerations: dedup(differentials),
        emergency_indicators: dedup(indicators),
    }
}

fn summary_statement(symptoms: &[SymptomCandidate]) -> String {
    match symptoms {
        [] => "Insufficient information: no recognizable symptoms were identified in the statement."
            .to_string(),
        [only] => format!(
            "Single-symptom presentation: {} ({}).",
            human(&only.name),
            only.medical_term
        ),
        many => format!(
            "Multi-symptom presentation with {} symptoms: {}.",
            many.len(),
            many.iter().map(|s| human(&s.name)).collect::<Vec<_>>().join(", ")
        ),
    }
}

fn temporal_statement(temporal: &TemporalAnalysis) -> String {
    if !temporal.has_information() {
        return "No timing information was provided.".to_string();
    }
    let mut parts = Vec::new();
    if temporal.onset != OnsetType::Unspecified {
        parts.push(format!("onset {}", temporal.onset));
    }
    if let Some(duration) = &temporal.duration {
        parts.push(format!("duration \"{duration}\""));
    }
    if let Some(progression) = temporal.progression {
        parts.push(format!("{progression} course"));
    }
    if let Some(frequency) = temporal.frequency {
        parts.push(format!("{frequency} pattern"));
    }
    if let Some(chronicity) = temporal.chronicity {
        parts.push(format!("{chronicity} timeframe"));
    }
    format!("Timing: {}.", parts.join("; "))
}

fn severity_statement(severity: &SeverityAssessment) -> String {
    match severity.basis {
        SeverityBasis::Unspecified => {
            "Severity was not described; moderate severity is assumed.".to_string()
        }
        basis => format!(
            "Severity assessed as {} ({} basis, score {:.1}/10).",
            severity.tier, basis, severity.score
        ),
    }
}

fn closing_statement(tier: ConfidenceTier) -> String {
    let text = match tier {
        ConfidenceTier::VeryHigh | ConfidenceTier::High => {
            "Overall confidence is high; the structured findings reflect the statement well."
        }
        ConfidenceTier::Medium => {
            "Overall confidence is moderate; confirm key details with the patient."
        }
        ConfidenceTier::Low | ConfidenceTier::VeryLow => {
            "Overall confidence is low; verify the findings with the patient before relying on them."
        }
    };
    text.to_string()
}

fn human(name: &str) -> String {
    name.replace('_', " ")
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

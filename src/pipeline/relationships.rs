//! Syndrome hypotheses and red-flag combinations over the consolidated symptoms.

use crate::models::{RedFlagCombination, RelationshipAnalysis, SymptomCandidate, SyndromeHypothesis};
use crate::patterns::syndromes::{SyndromeTemplate, RED_FLAG_PAIRS, SYNDROME_TEMPLATES};

/// Weight of the supporting-symptom fraction on top of a template's base.
const SUPPORT_WEIGHT: f32 = 0.25;
/// Hypotheses at or below this are not reported.
const EMIT_THRESHOLD: f32 = 0.5;

const SINGLE_SYMPTOM_CONFIDENCE: f32 = 0.5;
const UNRELATED_SYMPTOMS_CONFIDENCE: f32 = 0.4;

pub fn analyze_relationships(symptoms: &[SymptomCandidate]) -> RelationshipAnalysis {
    let present: Vec<&str> = symptoms.iter().map(|s| s.name.as_str()).collect();

    let mut hypotheses: Vec<SyndromeHypothesis> = SYNDROME_TEMPLATES
        .iter()
        .filter_map(|template| evaluate(template, &present))
        .collect();
    hypotheses.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.name.cmp(&b.name))
    });

    let red_flags: Vec<RedFlagCombination> = RED_FLAG_PAIRS
        .iter()
        .filter(|pair| present.contains(&pair.first) && present.contains(&pair.second))
        .map(|pair| RedFlagCombination {
            symptoms: [pair.first.to_string(), pair.second.to_string()],
            description: pair.description.to_string(),
        })
        .collect();

    let confidence = match (hypotheses.first(), present.len()) {
        (Some(best), _) => best.confidence,
        (None, 0) => 0.0,
        (None, 1) => SINGLE_SYMPTOM_CONFIDENCE,
        (None, _) => UNRELATED_SYMPTOMS_CONFIDENCE,
    };

    RelationshipAnalysis {
        hypotheses,
        red_flags,
        confidence,
    }
}

fn evaluate(template: &SyndromeTemplate, present: &[&str]) -> Option<SyndromeHypothesis> {
    let required: Vec<&str> = template
        .required
        .iter()
        .copied()
        .filter(|name| present.contains(name))
        .collect();
    if required.is_empty() {
        return None;
    }

    let supporting: Vec<&str> = template
        .supporting
        .iter()
        .copied()
        .filter(|name| present.contains(name))
        .collect();
    let fraction = supporting.len() as f32 / template.supporting.len() as f32;
    let confidence = (template.base_confidence + fraction * SUPPORT_WEIGHT).clamp(0.0, 1.0);
    if confidence <= EMIT_THRESHOLD {
        return None;
    }

    Some(SyndromeHypothesis {
        name: template.name.to_string(),
        confidence,
        supporting_symptoms: required
            .into_iter()
            .chain(supporting)
            .map(str::to_string)
            .collect(),
        reasoning: template.reasoning.to_string(),
    })
}

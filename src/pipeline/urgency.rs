//! Urgency tier derived from symptoms, severity, trajectory and red flags.

use crate::models::{
    ParseContext, Progression, RelationshipAnalysis, SeverityAssessment, SeverityTier,
    SymptomCandidate, TemporalAnalysis, UrgencyAssessment, UrgencyTier,
};
use crate::patterns::syndromes::{CRITICAL_COMPANION, EMERGENCY_SYMPTOMS, SEVERE_EMERGENCY_SYMPTOMS};

const ROUTINE_SCORE: f32 = 0.2;
const URGENT_SCORE: f32 = 0.5;
const EMERGENCY_SCORE: f32 = 0.8;
const CRITICAL_SCORE: f32 = 0.95;
const PER_INDICATOR_BONUS: f32 = 0.02;
/// Added for elderly or very young patients and high-risk known conditions.
const RISK_BIAS_BONUS: f32 = 0.05;

/// Worsening only escalates when more than one symptom is involved.
const WORSENING_MIN_SYMPTOMS: usize = 2;

pub fn assess_urgency(
    symptoms: &[SymptomCandidate],
    severity: &SeverityAssessment,
    temporal: &TemporalAnalysis,
    relationships: &RelationshipAnalysis,
    context: &ParseContext,
) -> UrgencyAssessment {
    if symptoms.is_empty() {
        return UrgencyAssessment {
            tier: UrgencyTier::Routine,
            score: ROUTINE_SCORE,
            emergency_symptoms: Vec::new(),
        };
    }

    let indicators = emergency_indicators(symptoms, severity, relationships);
    let elevated_risk = context.elevated_risk();

    let tier = if !indicators.is_empty() && symptoms.iter().any(|s| s.name == CRITICAL_COMPANION) {
        UrgencyTier::Critical
    } else if !indicators.is_empty() {
        UrgencyTier::Emergency
    } else if severity.tier.is_severe_or_worse()
        || (temporal.progression == Some(Progression::Worsening)
            && symptoms.len() >= WORSENING_MIN_SYMPTOMS)
        || (elevated_risk && severity.tier >= SeverityTier::Moderate)
    {
        UrgencyTier::Urgent
    } else {
        UrgencyTier::Routine
    };

    let base = match tier {
        UrgencyTier::Routine => ROUTINE_SCORE,
        UrgencyTier::Urgent => URGENT_SCORE,
        UrgencyTier::Emergency => EMERGENCY_SCORE,
        UrgencyTier::Critical => CRITICAL_SCORE,
    };
    let mut score = base + PER_INDICATOR_BONUS * indicators.len() as f32;
    if elevated_risk {
        score += RISK_BIAS_BONUS;
    }

    UrgencyAssessment {
        tier,
        score: score.clamp(0.0, 1.0),
        emergency_symptoms: indicators,
    }
}

/// Emergency indicators in symptom order, without duplicates.
fn emergency_indicators(
    symptoms: &[SymptomCandidate],
    severity: &SeverityAssessment,
    relationships: &RelationshipAnalysis,
) -> Vec<String> {
    let severe = severity.tier.is_severe_or_worse();
    let mut indicators: Vec<String> = Vec::new();
    for symptom in symptoms {
        let name = symptom.name.as_str();
        let flagged = EMERGENCY_SYMPTOMS.contains(&name)
            || (severe && SEVERE_EMERGENCY_SYMPTOMS.contains(&name))
            || relationships
                .red_flags
                .iter()
                .any(|rf| rf.symptoms.iter().any(|s| s == name));
        if flagged && !indicators.iter().any(|i| i == name) {
            indicators.push(name.to_string());
        }
    }
    indicators
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symptom::test_support::candidate;
    use crate::models::{ExtractionMethod::DirectLookup, SeverityBasis};
    use crate::pipeline::relationships::analyze_relationships;

    fn severity(tier: SeverityTier) -> SeverityAssessment {
        SeverityAssessment {
            tier,
            score: tier.nominal_score(),
            basis: SeverityBasis::Explicit,
            matched_text: None,
            confidence: 0.9,
        }
    }

    fn urgency_for(
        names: &[&str],
        tier: SeverityTier,
        context: &ParseContext,
    ) -> UrgencyAssessment {
        urgency_with(names, tier, &TemporalAnalysis::empty(), context)
    }

    fn urgency_with(
        names: &[&str],
        tier: SeverityTier,
        temporal: &TemporalAnalysis,
        context: &ParseContext,
    ) -> UrgencyAssessment {
        let symptoms: Vec<_> = names.iter().map(|n| candidate(n, 0.85, DirectLookup)).collect();
        let relationships = analyze_relationships(&symptoms);
        assess_urgency(&symptoms, &severity(tier), temporal, &relationships, context)
    }

    #[test]
    fn chest_pain_with_dyspnea_is_emergency() {
        let ctx = ParseContext::default();
        let u = urgency_for(&["chest_pain", "dyspnea"], SeverityTier::Moderate, &ctx);
        assert_eq!(u.tier, UrgencyTier::Emergency);
        assert_eq!(u.emergency_symptoms, vec!["chest_pain", "dyspnea"]);
        assert!((u.score - 0.84).abs() < 1e-5);
    }

    #[test]
    fn indicator_with_syncope_is_critical() {
        let ctx = ParseContext::default();
        let u = urgency_for(&["chest_pain", "syncope"], SeverityTier::Moderate, &ctx);
        assert_eq!(u.tier, UrgencyTier::Critical);
    }

    #[test]
    fn severe_headache_becomes_indicator() {
        let ctx = ParseContext::default();
        let u = urgency_for(&["headache"], SeverityTier::Moderate, &ctx);
        assert_eq!(u.tier, UrgencyTier::Routine);
        let u = urgency_for(&["headache"], SeverityTier::Severe, &ctx);
        assert_eq!(u.tier, UrgencyTier::Emergency);
        assert_eq!(u.emergency_symptoms, vec!["headache"]);
    }

    #[test]
    fn severe_non_indicator_is_urgent() {
        let u = urgency_for(&["back_pain"], SeverityTier::Severe, &ParseContext::default());
        assert_eq!(u.tier, UrgencyTier::Urgent);
        assert!(u.emergency_symptoms.is_empty());
    }

    #[test]
    fn red_flag_pair_members_are_indicators() {
        let u = urgency_for(&["fever", "confusion"], SeverityTier::Mild, &ParseContext::default());
        assert_eq!(u.tier, UrgencyTier::Emergency);
        assert_eq!(u.emergency_symptoms, vec!["fever", "confusion"]);
    }

    #[test]
    fn worsening_multi_symptom_is_urgent() {
        let mut temporal = TemporalAnalysis::empty();
        temporal.progression = Some(Progression::Worsening);
        let ctx = ParseContext::default();
        let u = urgency_with(&["cough", "fever"], SeverityTier::Mild, &temporal, &ctx);
        assert_eq!(u.tier, UrgencyTier::Urgent);
        let u = urgency_with(&["cough"], SeverityTier::Mild, &temporal, &ctx);
        assert_eq!(u.tier, UrgencyTier::Routine);
    }

    #[test]
    fn age_bias_escalates_moderate() {
        let elderly = ParseContext::with_age(70);
        let u = urgency_for(&["cough"], SeverityTier::Moderate, &elderly);
        assert_eq!(u.tier, UrgencyTier::Urgent);
        assert!((u.score - 0.55).abs() < 1e-5);
        let u = urgency_for(&["cough"], SeverityTier::Mild, &elderly);
        assert_eq!(u.tier, UrgencyTier::Routine);
    }

    #[test]
    fn high_risk_condition_escalates_moderate() {
        let ctx = ParseContext {
            known_conditions: vec!["COPD".into()],
            ..ParseContext::default()
        };
        let u = urgency_for(&["cough"], SeverityTier::Moderate, &ctx);
        assert_eq!(u.tier, UrgencyTier::Urgent);
        assert!((u.score - 0.55).abs() < 1e-5);

        let ctx = ParseContext {
            known_conditions: vec!["seasonal allergies".into()],
            ..ParseContext::default()
        };
        let u = urgency_for(&["cough"], SeverityTier::Moderate, &ctx);
        assert_eq!(u.tier, UrgencyTier::Routine);
    }

    #[test]
    fn no_symptoms_is_routine() {
        let u = urgency_for(&[], SeverityTier::Severe, &ParseContext::default());
        assert_eq!(u.tier, UrgencyTier::Routine);
        assert_eq!(u.score, ROUTINE_SCORE);
    }
}

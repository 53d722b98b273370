//! Severity inference over the whole utterance.
//!
//! Families are checked from most to least severe and the first hit wins.
//! Functional-impact language then raises the result to at least severe.

use regex::Match;

use crate::models::{ParseContext, SeverityAssessment, SeverityBasis, SeverityTier};
use crate::patterns::keywords::{
    COMPARATIVE_PHRASES, EXTREME_PHRASES, FUNCTIONAL_PHRASES, MILD_PHRASES, MODERATE_PHRASES,
    NUMERIC_RATING, SEVERE_PHRASES,
};
use crate::patterns::PhraseSet;

use super::extractor::is_negated;

const EXTREME_CONFIDENCE: f32 = 0.95;
const SEVERE_CONFIDENCE: f32 = 0.90;
const MODERATE_CONFIDENCE: f32 = 0.85;
const MILD_CONFIDENCE: f32 = 0.80;
const COMPARATIVE_CONFIDENCE: f32 = 0.80;
const INTENSITY_CONFIDENCE: f32 = 0.90;
const FUNCTIONAL_CONFIDENCE: f32 = 0.90;
const UNSPECIFIED_CONFIDENCE: f32 = 0.30;

/// Added to the score for very young or elderly patients.
const AGE_SCORE_BIAS: f32 = 0.5;
const MAX_SCORE: f32 = 10.0;

/// A self-reported 0-10 rating found in the text.
struct Rating {
    value: u32,
    text: String,
}

pub fn infer_severity(text: &str, context: &ParseContext) -> SeverityAssessment {
    let rating = find_rating(text);

    let mut assessment = [
        SeverityTier::Extreme,
        SeverityTier::Severe,
        SeverityTier::Moderate,
        SeverityTier::Mild,
    ]
    .into_iter()
    .find_map(|tier| match_family(text, tier, rating.as_ref()))
    .unwrap_or_else(|| SeverityAssessment {
        tier: SeverityTier::Moderate,
        score: SeverityTier::Moderate.nominal_score(),
        basis: SeverityBasis::Unspecified,
        matched_text: None,
        confidence: UNSPECIFIED_CONFIDENCE,
    });

    if let Some((_, m)) = find_affirmed(&FUNCTIONAL_PHRASES, text) {
        if assessment.tier < SeverityTier::Severe {
            assessment = SeverityAssessment {
                tier: SeverityTier::Severe,
                score: f32::max(assessment.score, SeverityTier::Severe.nominal_score()),
                basis: SeverityBasis::Functional,
                matched_text: Some(m.as_str().to_string()),
                confidence: FUNCTIONAL_CONFIDENCE,
            };
        }
    }

    if context.age_bias() {
        assessment.score = f32::min(assessment.score + AGE_SCORE_BIAS, MAX_SCORE);
    }
    assessment
}

/// First keyword occurrence that is not negated ("not severe").
fn find_affirmed<'t>(set: &PhraseSet, text: &'t str) -> Option<(&'static str, Match<'t>)> {
    set.find_where(text, |m| !is_negated(text, m.start()))
}

fn match_family(
    text: &str,
    tier: SeverityTier,
    rating: Option<&Rating>,
) -> Option<SeverityAssessment> {
    let (keywords, keyword_confidence): (&PhraseSet, f32) = match tier {
        SeverityTier::Extreme => (&*EXTREME_PHRASES, EXTREME_CONFIDENCE),
        SeverityTier::Severe => (&*SEVERE_PHRASES, SEVERE_CONFIDENCE),
        SeverityTier::Moderate => (&*MODERATE_PHRASES, MODERATE_CONFIDENCE),
        SeverityTier::Mild => (&*MILD_PHRASES, MILD_CONFIDENCE),
    };

    if let Some((_, m)) = find_affirmed(keywords, text) {
        return Some(SeverityAssessment {
            tier,
            score: tier.nominal_score(),
            basis: SeverityBasis::Explicit,
            matched_text: Some(m.as_str().to_string()),
            confidence: keyword_confidence,
        });
    }

    if tier == SeverityTier::Severe {
        if let Some((_, m)) = find_affirmed(&COMPARATIVE_PHRASES, text) {
            return Some(SeverityAssessment {
                tier,
                score: tier.nominal_score(),
                basis: SeverityBasis::Comparative,
                matched_text: Some(m.as_str().to_string()),
                confidence: COMPARATIVE_CONFIDENCE,
            });
        }
    }

    rating
        .filter(|r| SeverityTier::from_rating(r.value) == tier)
        .map(|r| SeverityAssessment {
            tier,
            score: r.value as f32,
            basis: SeverityBasis::Intensity,
            matched_text: Some(r.text.clone()),
            confidence: INTENSITY_CONFIDENCE,
        })
}

fn find_rating(text: &str) -> Option<Rating> {
    NUMERIC_RATING.captures_iter(text).find_map(|caps| {
        let value: u32 = caps.get(1)?.as_str().parse().ok()?;
        (value <= 10).then(|| Rating {
            value,
            text: caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
        })
    })
}

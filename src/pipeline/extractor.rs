//! Symptom extraction: a direct synonym-table pass over the whole utterance,
//! then a template pass over each segment when the direct pass finds little.

use regex::Match;
use tracing::debug;

use crate::models::{ExtractionMethod, SymptomCandidate, TemplateCategory};
use crate::patterns::anatomy::regions_mentioned;
use crate::patterns::complaints::{regional_symptom, ComplaintTarget, COMPILED_TEMPLATES};
use crate::patterns::keywords::{
    COMPARATIVE_PHRASES, DURATION_COUNT, EMPHATIC_COMPARISONS, EMPHATIC_NEVER_VERBS,
    EXTREME_PHRASES, FREQUENCY_CONSTANT, FREQUENCY_INTERMITTENT, FREQUENCY_VARIABLE,
    FUNCTIONAL_PHRASES, MILD_PHRASES, MODERATE_PHRASES, NEGATION_BREAKS, NEGATION_CUES,
    NEGATION_WINDOW, NUMERIC_RATING, ONSET_ACUTE, ONSET_GRADUAL, PROGRESSION_IMPROVING,
    PROGRESSION_STABLE, PROGRESSION_WORSENING, QUALITY_WORDS, SEVERE_PHRASES, SINCE_PHRASE,
    TIME_ANCHORS,
};
use crate::patterns::symptoms::{symptom_entry, CompiledSymptom, SymptomEntry, COMPILED_SYMPTOMS};

use super::segmenter::{segment_index_for, Segment};

/// Bonus for long (more specific) matched phrases.
const LONG_PHRASE_CHARS: usize = 8;
const LONG_PHRASE_BONUS: f32 = 0.1;
const DIRECT_MIN: f32 = 0.60;
const DIRECT_MAX: f32 = 0.95;

const PATTERN_MIN: f32 = 0.50;
const PATTERN_MAX: f32 = 0.90;

/// The template pass runs only when the direct pass finds fewer than this.
const PATTERN_PASS_BELOW: usize = 2;
const PATTERN_PASS_MIN_TOKENS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Raw candidates from both passes, before consolidation.
    pub candidates: Vec<SymptomCandidate>,
    pub direct_count: usize,
    pub pattern_pass_ran: bool,
}

pub fn extract(text: &str, segments: &[Segment]) -> Extraction {
    let mut candidates: Vec<SymptomCandidate> = COMPILED_SYMPTOMS
        .iter()
        .filter_map(|symptom| direct_match(text, symptom, segments))
        .collect();
    let direct_count = candidates.len();

    let tokens = text.split_whitespace().count();
    let pattern_pass_ran = direct_count < PATTERN_PASS_BELOW && tokens >= PATTERN_PASS_MIN_TOKENS;
    if pattern_pass_ran {
        for (index, segment) in segments.iter().enumerate() {
            candidates.extend(pattern_matches(text, segment, index));
        }
    }

    debug!(
        direct = direct_count,
        pattern = candidates.len() - direct_count,
        pattern_pass_ran,
        "Extraction passes complete"
    );

    Extraction {
        candidates,
        direct_count,
        pattern_pass_ran,
    }
}

// ═══════════════════════════════════════════════════════════
// Direct pass
// ═══════════════════════════════════════════════════════════

fn direct_match(
    text: &str,
    symptom: &CompiledSymptom,
    segments: &[Segment],
) -> Option<SymptomCandidate> {
    for (phrase, regex) in &symptom.phrases {
        let hit = regex
            .find_iter(text)
            .find(|m| !is_excluded(text, m, symptom) && !is_negated(text, m.start()));
        if let Some(m) = hit {
            let bonus = if phrase.len() > LONG_PHRASE_CHARS { LONG_PHRASE_BONUS } else { 0.0 };
            let confidence = (symptom.entry.base_confidence + bonus).clamp(DIRECT_MIN, DIRECT_MAX);
            let segment_index = segment_index_for(segments, m.start());
            return Some(build_candidate(
                symptom.entry,
                m.as_str(),
                (m.start(), m.end()),
                confidence,
                ExtractionMethod::DirectLookup,
                None,
                segment_index,
                segments.get(segment_index),
            ));
        }
    }
    None
}

fn is_excluded(text: &str, m: &Match<'_>, symptom: &CompiledSymptom) -> bool {
    symptom.exclusions.iter().any(|ex| {
        ex.find_iter(text)
            .any(|e| e.start() < m.end() && m.start() < e.end())
    })
}

/// A match is negated when a negation cue appears among the few words before
/// it, within the same clause. Emphatic "never had ... like this" is not a cue.
pub(crate) fn is_negated(text: &str, match_start: usize) -> bool {
    let before = &text[..match_start];
    let window: Vec<&str> = before.split_whitespace().rev().take(NEGATION_WINDOW).collect();
    for (i, raw) in window.iter().enumerate() {
        if raw.ends_with(|c: char| matches!(c, ',' | '.' | ';' | ':' | '!' | '?')) {
            return false;
        }
        let word = normalize_word(raw);
        if NEGATION_BREAKS.contains(&word.as_str()) {
            return false;
        }
        if NEGATION_CUES.contains(&word.as_str()) {
            // window is reversed: the word after the cue sits at i - 1
            let next = i.checked_sub(1).map(|j| normalize_word(window[j]));
            let emphatic = word == "never"
                && next.is_some_and(|n| EMPHATIC_NEVER_VERBS.contains(&n.as_str()))
                && EMPHATIC_COMPARISONS.is_match(clause_from(text, match_start));
            return !emphatic;
        }
    }
    false
}

fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
}

/// Text from `start` up to the end of its sentence.
fn clause_from(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let end = rest
        .find(|c: char| matches!(c, '.' | ';' | '!' | '?'))
        .unwrap_or(rest.len());
    &rest[..end]
}

// ═══════════════════════════════════════════════════════════
// Pattern pass
// ═══════════════════════════════════════════════════════════

fn pattern_matches(text: &str, segment: &Segment, index: usize) -> Vec<SymptomCandidate> {
    let mut out = Vec::new();
    let scale = 0.75 + 0.25 * segment.confidence;

    for compiled in COMPILED_TEMPLATES.iter() {
        let template = compiled.template;
        for caps in compiled.regex.captures_iter(&segment.text) {
            let Some(whole) = caps.get(0) else { continue };
            let name = match template.target {
                ComplaintTarget::Symptom(name) => Some(name),
                ComplaintTarget::RegionalPain => {
                    caps.get(1).and_then(|m| regional_symptom(m.as_str()))
                }
            };
            let Some(entry) = name.and_then(symptom_entry) else { continue };

            let start = segment.start + whole.start();
            if is_negated(text, start) {
                continue;
            }
            let confidence = (template.weight * scale).clamp(PATTERN_MIN, PATTERN_MAX);
            out.push(build_candidate(
                entry,
                whole.as_str(),
                (start, segment.start + whole.end()),
                confidence,
                ExtractionMethod::PatternMatch,
                Some(template.category),
                index,
                Some(segment),
            ));
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════
// Candidate construction
// ═══════════════════════════════════════════════════════════

#[allow(clippy::too_many_arguments)]
fn build_candidate(
    entry: &SymptomEntry,
    matched: &str,
    span: (usize, usize),
    confidence: f32,
    method: ExtractionMethod,
    template_category: Option<TemplateCategory>,
    segment_index: usize,
    segment: Option<&Segment>,
) -> SymptomCandidate {
    let mut candidate = SymptomCandidate {
        name: entry.name.to_string(),
        medical_term: entry.medical_term.to_string(),
        matched_text: matched.to_string(),
        anatomical_location: None,
        category: entry.category,
        confidence,
        extraction_method: method,
        template_category,
        significance: entry.significance,
        span,
        segment_index,
        anatomical_hints: Vec::new(),
        severity_hints: Vec::new(),
        temporal_hints: Vec::new(),
        quality_hints: Vec::new(),
    };
    if let Some(segment) = segment {
        collect_hints(&mut candidate, &segment.text);
    }
    candidate
}

fn collect_hints(candidate: &mut SymptomCandidate, clause: &str) {
    candidate.anatomical_hints = regions_mentioned(clause)
        .into_iter()
        .map(str::to_string)
        .collect();

    candidate.quality_hints = owned(QUALITY_WORDS.matches_in(clause));

    let mut severity = Vec::new();
    for set in [
        &*EXTREME_PHRASES,
        &*SEVERE_PHRASES,
        &*COMPARATIVE_PHRASES,
        &*MODERATE_PHRASES,
        &*MILD_PHRASES,
        &*FUNCTIONAL_PHRASES,
    ] {
        severity.extend(set.matches_in(clause).into_iter().map(str::to_string));
    }
    severity.extend(NUMERIC_RATING.find_iter(clause).map(|m| m.as_str().to_string()));
    candidate.severity_hints = severity;

    let mut temporal: Vec<String> = Vec::new();
    temporal.extend(DURATION_COUNT.find_iter(clause).map(|m| m.as_str().trim().to_string()));
    temporal.extend(SINCE_PHRASE.find_iter(clause).map(|m| m.as_str().to_string()));
    for set in [
        &*TIME_ANCHORS,
        &*ONSET_ACUTE,
        &*ONSET_GRADUAL,
        &*PROGRESSION_WORSENING,
        &*PROGRESSION_IMPROVING,
        &*PROGRESSION_STABLE,
        &*FREQUENCY_INTERMITTENT,
        &*FREQUENCY_CONSTANT,
        &*FREQUENCY_VARIABLE,
    ] {
        temporal.extend(set.matches_in(clause).into_iter().map(str::to_string));
    }
    candidate.temporal_hints = temporal;
    candidate.dedup_hints();
}

fn owned(items: Vec<&'static str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

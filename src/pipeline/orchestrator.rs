//! Parse orchestrator: runs every stage in order and assembles the result.
//!
//! `parse` is the single guard of the pipeline. It never panics and never
//! returns an error: stage errors and caught panics become a `fault` result
//! carrying the message in `diagnostic`. Completed results are cached by a
//! digest of the input, and the cache is consulted before any work.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::config::{ConfigError, ParserConfig};
use crate::models::{
    InputMetadata, ParseContext, ParseOutcome, ParseResult, PerformanceMetrics, SymptomCandidate,
    UncertaintyFlag,
};
use crate::patterns::{self, PATTERN_LIBRARY_VERSION};

use super::anatomy::locate_symptoms;
use super::cache::{cache_key, ResultCache};
use super::confidence::{aggregate_confidence, InputQuality};
use super::consolidator::consolidate;
use super::error::ParseError;
use super::extractor::extract;
use super::normalizer::{HttpNormalizer, TextNormalizer};
use super::preflight::{preflight, Preflight};
use super::reasoning::{generate_reasoning, ReasoningInputs};
use super::relationships::analyze_relationships;
use super::segmenter::segment;
use super::severity::infer_severity;
use super::temporal::infer_temporal;
use super::urgency::assess_urgency;

/// Inputs shorter than this (after trimming) are not analyzed.
pub const MIN_INPUT_CHARS: usize = 3;

/// Confidence recorded when normalization was wanted but not obtained.
const DEGRADED_NORMALIZATION_CONFIDENCE: f32 = 0.5;

// ═══════════════════════════════════════════════════════════
// Statistics
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct ParserStats {
    parses: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    extraction_runs: AtomicU64,
    faults: AtomicU64,
}

/// Point-in-time copy of the parser counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParserStatsSnapshot {
    pub parses: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Number of times the extraction stage actually ran.
    pub extraction_runs: u64,
    pub faults: u64,
}

// ═══════════════════════════════════════════════════════════
// Parser
// ═══════════════════════════════════════════════════════════

/// Outcome of the optional normalization step.
struct Normalization {
    text: String,
    requested: bool,
    applied: bool,
    confidence: f32,
    degraded: bool,
}

/// Thread-safe symptom parser. Share one instance (e.g. behind an `Arc`)
/// so callers share its cache.
pub struct SymptomParser {
    config: ParserConfig,
    normalizer: Option<Box<dyn TextNormalizer>>,
    cache: ResultCache,
    stats: ParserStats,
}

impl SymptomParser {
    pub fn new() -> Self {
        Self::build(ParserConfig::default(), None)
    }

    /// Validates the config and, when `normalizer_url` is set, builds the
    /// HTTP normalizer for it.
    pub fn with_config(config: ParserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let normalizer: Option<Box<dyn TextNormalizer>> = match &config.normalizer_url {
            Some(url) => {
                let http = HttpNormalizer::new(url, config.normalizer_timeout_secs)
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?;
                Some(Box::new(http))
            }
            None => None,
        };
        Ok(Self::build(config, normalizer))
    }

    /// Replace the normalization collaborator.
    pub fn with_normalizer(mut self, normalizer: Box<dyn TextNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    fn build(config: ParserConfig, normalizer: Option<Box<dyn TextNormalizer>>) -> Self {
        patterns::warm_up();
        tracing::debug!(
            cache_capacity = config.cache_capacity,
            time_budget_ms = config.time_budget_ms,
            pattern_library = PATTERN_LIBRARY_VERSION,
            "Symptom parser initialized"
        );
        Self {
            cache: ResultCache::new(config.cache_capacity),
            config,
            normalizer,
            stats: ParserStats::default(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn stats(&self) -> ParserStatsSnapshot {
        ParserStatsSnapshot {
            parses: self.stats.parses.load(Ordering::Relaxed),
            cache_hits: self.stats.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.stats.cache_misses.load(Ordering::Relaxed),
            extraction_runs: self.stats.extraction_runs.load(Ordering::Relaxed),
            faults: self.stats.faults.load(Ordering::Relaxed),
        }
    }

    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Parse with no caller context.
    pub fn parse_text(&self, text: &str) -> ParseResult {
        self.parse(text, &ParseContext::default())
    }

    /// Turn a free-text statement into a structured, confidence-scored result.
    pub fn parse(&self, text: &str, context: &ParseContext) -> ParseResult {
        let started = Instant::now();
        self.stats.parses.fetch_add(1, Ordering::Relaxed);

        let key = cache_key(text, context);
        if let Some(hit) = self.cache.get(&key) {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(outcome = %hit.outcome, "Parse served from cache");
            return (*hit).clone();
        }
        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);

        let result_id = Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes());

        if text.trim().chars().count() < MIN_INPUT_CHARS {
            tracing::debug!(chars = text.trim().chars().count(), "Input too short to analyze");
            return ParseResult::minimal(
                result_id,
                bare_metadata(text),
                ParseOutcome::InputTooShort,
                format!("input shorter than {MIN_INPUT_CHARS} characters"),
                vec![UncertaintyFlag::NoSymptomsDetected],
            );
        }

        let run = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_stages(text, context, result_id, started)
        }));
        let result = match run {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => self.fault(result_id, text, err.to_string()),
            Err(payload) => self.fault(result_id, text, panic_message(payload.as_ref())),
        };

        if matches!(result.outcome, ParseOutcome::Complete | ParseOutcome::NoSymptoms) {
            self.cache.insert(key, Arc::new(result.clone()));
        }

        tracing::info!(
            outcome = %result.outcome,
            symptoms = result.primary_symptoms.len() + result.secondary_symptoms.len(),
            urgency = %result.urgency.tier,
            confidence = %result.confidence.tier,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Parse complete"
        );
        result
    }

    fn run_stages(
        &self,
        text: &str,
        context: &ParseContext,
        result_id: Uuid,
        started: Instant,
    ) -> Result<ParseResult, ParseError> {
        let budget = Budget::new(started, self.config.time_budget_ms);

        let (bounded, truncated) = truncate_chars(text, self.config.max_input_chars);
        if truncated {
            tracing::warn!(
                max_input_chars = self.config.max_input_chars,
                "Input truncated before analysis"
            );
        }
        let normalization = self.normalize(&preflight(bounded));
        budget.check("normalize")?;

        let analyzed = normalization.text.as_str();
        let segments = segment(analyzed);
        budget.check("segment")?;

        let extraction = extract(analyzed, &segments);
        self.stats.extraction_runs.fetch_add(1, Ordering::Relaxed);
        let raw_candidate_count = extraction.candidates.len();
        let mut symptoms = consolidate(extraction.candidates);
        budget.check("extract")?;

        // One temporal and one severity assessment per statement, shared by all symptoms.
        let temporal = infer_temporal(analyzed);
        let severity = infer_severity(analyzed, context);
        let anatomy = locate_symptoms(&mut symptoms, &segments);
        let relationships = analyze_relationships(&symptoms);
        let urgency = assess_urgency(&symptoms, &severity, &temporal, &relationships, context);
        budget.check("assess")?;

        let quality = InputQuality {
            normalization_degraded: normalization.degraded,
            truncated,
        };
        let confidence = aggregate_confidence(
            &symptoms,
            &temporal,
            &severity,
            &relationships,
            &self.config.weights,
            quality,
        );
        let reasoning = generate_reasoning(&ReasoningInputs {
            symptoms: &symptoms,
            temporal: &temporal,
            severity: &severity,
            urgency: &urgency,
            relationships: &relationships,
            anatomy: &anatomy,
            confidence: &confidence,
        });
        budget.check("reason")?;

        let names: Vec<&str> = symptoms.iter().map(|s| s.name.as_str()).collect();
        tracing::debug!(
            symptoms = ?names,
            raw_candidates = raw_candidate_count,
            syndromes = relationships.hypotheses.len(),
            red_flags = relationships.red_flags.len(),
            "Stages complete"
        );

        let outcome = if symptoms.is_empty() {
            ParseOutcome::NoSymptoms
        } else {
            ParseOutcome::Complete
        };
        let threshold = self.config.primary_threshold;
        let (primary_symptoms, secondary_symptoms): (Vec<SymptomCandidate>, Vec<SymptomCandidate>) =
            symptoms.into_iter().partition(|s| s.confidence >= threshold);

        Ok(ParseResult {
            result_id,
            input: InputMetadata {
                original_text: text.to_string(),
                analyzed_text: normalization.text.clone(),
                normalization_requested: normalization.requested,
                normalization_applied: normalization.applied,
                normalization_confidence: normalization.confidence,
                timestamp: Utc::now(),
                pattern_library_version: PATTERN_LIBRARY_VERSION.to_string(),
            },
            outcome,
            primary_symptoms,
            secondary_symptoms,
            temporal,
            severity,
            urgency,
            anatomy,
            syndromes: relationships.hypotheses,
            red_flags: relationships.red_flags,
            metrics: PerformanceMetrics {
                processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
                estimated_accuracy: confidence.overall,
                segment_count: segments.len(),
                raw_candidate_count,
            },
            confidence,
            reasoning,
            diagnostic: None,
        })
    }

    /// Normalize only when preflight asks for it. A missing or failing
    /// normalizer degrades to the canonicalized input.
    fn normalize(&self, pre: &Preflight) -> Normalization {
        if !pre.needs_normalization {
            return Normalization {
                text: pre.text.clone(),
                requested: false,
                applied: false,
                confidence: 1.0,
                degraded: false,
            };
        }

        let degraded = Normalization {
            text: pre.text.clone(),
            requested: true,
            applied: false,
            confidence: DEGRADED_NORMALIZATION_CONFIDENCE,
            degraded: true,
        };

        let Some(normalizer) = &self.normalizer else {
            tracing::debug!("Normalization requested but no normalizer configured");
            return degraded;
        };

        match normalizer.normalize(&pre.text) {
            Ok(out) if !out.normalized_text.trim().is_empty() => Normalization {
                text: super::preflight::canonicalize(&out.normalized_text),
                requested: true,
                applied: true,
                confidence: out.confidence.clamp(0.0, 1.0),
                degraded: false,
            },
            Ok(_) => {
                tracing::warn!("Normalizer returned empty text, analyzing original input");
                degraded
            }
            Err(e) => {
                tracing::warn!(error = %e, "Normalizer failed, analyzing original input");
                degraded
            }
        }
    }

    fn fault(&self, result_id: Uuid, text: &str, diagnostic: String) -> ParseResult {
        self.stats.faults.fetch_add(1, Ordering::Relaxed);
        tracing::error!(error = %diagnostic, "Parse failed, returning fault result");
        ParseResult::minimal(
            result_id,
            bare_metadata(text),
            ParseOutcome::Fault,
            diagnostic,
            vec![UncertaintyFlag::NoSymptomsDetected],
        )
    }
}

impl Default for SymptomParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock budget checked between stages.
struct Budget {
    started: Instant,
    budget_ms: u64,
}

impl Budget {
    fn new(started: Instant, budget_ms: u64) -> Self {
        Self { started, budget_ms }
    }

    fn check(&self, stage: &'static str) -> Result<(), ParseError> {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        if elapsed_ms > self.budget_ms {
            return Err(ParseError::BudgetExceeded {
                stage,
                elapsed_ms,
                budget_ms: self.budget_ms,
            });
        }
        Ok(())
    }
}

fn bare_metadata(text: &str) -> InputMetadata {
    InputMetadata {
        original_text: text.to_string(),
        analyzed_text: String::new(),
        normalization_requested: false,
        normalization_applied: false,
        normalization_confidence: 1.0,
        timestamp: Utc::now(),
        pattern_library_version: PATTERN_LIBRARY_VERSION.to_string(),
    }
}

/// Cut to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (&text[..cut], true),
        None => (text, false),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    ParseError::Internal(detail).to_string()
}

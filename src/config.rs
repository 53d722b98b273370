use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::cache::DEFAULT_CAPACITY;

/// Application-level constants
pub const APP_NAME: &str = "symptom-parser";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "symptom_parser=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ═══════════════════════════════════════════════════════════
// Confidence weights
// ═══════════════════════════════════════════════════════════

/// Component weights of the overall confidence. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceWeights {
    pub symptom: f32,
    pub temporal: f32,
    pub severity: f32,
    pub relationship: f32,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            symptom: 0.4,
            temporal: 0.2,
            severity: 0.2,
            relationship: 0.2,
        }
    }
}

impl ConfidenceWeights {
    const SUM_TOLERANCE: f32 = 1e-3;

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parts = [self.symptom, self.temporal, self.severity, self.relationship];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Invalid(
                "confidence weights must be finite and non-negative".into(),
            ));
        }
        let sum: f32 = parts.iter().sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ConfigError::Invalid(format!(
                "confidence weights must sum to 1.0 (got {sum:.3})"
            )));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Parser configuration
// ═══════════════════════════════════════════════════════════

/// Tunables for [`crate::SymptomParser`]. Every field has a default, so a
/// config file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum cached results. Zero disables the cache.
    pub cache_capacity: usize,
    /// Wall-clock budget for one parse, checked between stages.
    pub time_budget_ms: u64,
    /// Longer inputs are truncated and flagged.
    pub max_input_chars: usize,
    /// Symptoms at or above this confidence are primary.
    pub primary_threshold: f32,
    pub weights: ConfidenceWeights,
    /// Base URL of the normalization service. `None` disables normalization.
    pub normalizer_url: Option<String>,
    pub normalizer_timeout_secs: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            time_budget_ms: 250,
            max_input_chars: 2_000,
            primary_threshold: 0.7,
            weights: ConfidenceWeights::default(),
            normalizer_url: None,
            normalizer_timeout_secs: 5,
        }
    }
}

impl ParserConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_budget_ms == 0 {
            return Err(ConfigError::Invalid("time_budget_ms must be positive".into()));
        }
        if self.max_input_chars < 3 {
            return Err(ConfigError::Invalid("max_input_chars must be at least 3".into()));
        }
        if !(0.0..=1.0).contains(&self.primary_threshold) {
            return Err(ConfigError::Invalid(
                "primary_threshold must be within 0.0..=1.0".into(),
            ));
        }
        if let Some(url) = &self.normalizer_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "normalizer_url must be an http(s) URL: {url}"
                )));
            }
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn app_name_is_symptom_parser() {
        assert_eq!(APP_NAME, "symptom-parser");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn defaults_are_valid() {
        let config = ParserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.time_budget_ms, 250);
        assert_eq!(config.max_input_chars, 2_000);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = ParserConfig::from_json_str(r#"{ "cache_capacity": 10 }"#).unwrap();
        assert_eq!(config.cache_capacity, 10);
        assert_eq!(config.time_budget_ms, 250);
        assert_eq!(config.weights, ConfidenceWeights::default());
    }

    #[test]
    fn weights_must_sum_to_one() {
        let err = ParserConfig::from_json_str(
            r#"{ "weights": { "symptom": 0.5, "temporal": 0.5, "severity": 0.5, "relationship": 0.5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_http_normalizer_url() {
        let err = ParserConfig::from_json_str(r#"{ "normalizer_url": "ftp://host" }"#).unwrap_err();
        assert!(err.to_string().contains("normalizer_url"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = ParserConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "time_budget_ms": 500, "primary_threshold": 0.75 }}"#).unwrap();
        let config = ParserConfig::from_file(file.path()).unwrap();
        assert_eq!(config.time_budget_ms, 500);
        assert_eq!(config.primary_threshold, 0.75);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParserConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

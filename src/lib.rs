pub mod config;
pub mod models;
pub mod patterns; // Versioned symptom, keyword and syndrome tables
pub mod pipeline;

pub use config::{ConfidenceWeights, ConfigError, ParserConfig};
pub use models::{ParseContext, ParseOutcome, ParseResult, SymptomCandidate};
pub use pipeline::normalizer::{HttpNormalizer, NormalizedText, TextNormalizer};
pub use pipeline::orchestrator::{ParserStatsSnapshot, SymptomParser};

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`config::default_log_filter`]. Safe to call more than once.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} v{} logging initialized", config::APP_NAME, config::APP_VERSION);
    }
}

//! Pipeline error types.
//!
//! Stages never fail on ordinary input. `ParseError` covers the two ways a
//! parse can still go wrong; the orchestrator turns either into a fault result.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Time budget of {budget_ms}ms exceeded after stage '{stage}' ({elapsed_ms}ms elapsed)")]
    BudgetExceeded {
        stage: &'static str,
        elapsed_ms: u64,
        budget_ms: u64,
    },

    #[error("Internal pipeline error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Normalizer is not reachable at {0}")]
    Connection(String),

    #[error("Normalizer request timed out after {0}s")]
    Timeout(u64),

    #[error("Normalizer returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed normalizer response: {0}")]
    MalformedResponse(String),
}

//! Text-normalization collaborator.
//!
//! The parser only sees the [`TextNormalizer`] trait. [`HttpNormalizer`] is the
//! shipped adapter for a remote normalization service.

use serde::{Deserialize, Serialize};

use super::error::NormalizerError;

/// Output of a normalization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedText {
    pub normalized_text: String,
    pub confidence: f32,
}

/// Rewrites colloquial or misspelled input into plainer text.
pub trait TextNormalizer: Send + Sync {
    fn normalize(&self, text: &str) -> Result<NormalizedText, NormalizerError>;
}

/// Normalizer backed by `POST {base_url}/normalize`.
pub struct HttpNormalizer {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct NormalizeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NormalizeResponse {
    normalized_text: String,
    #[serde(default = "default_confidence")]
    confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

impl HttpNormalizer {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, NormalizerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| NormalizerError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }
}

impl TextNormalizer for HttpNormalizer {
    fn normalize(&self, text: &str) -> Result<NormalizedText, NormalizerError> {
        let url = format!("{}/normalize", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&NormalizeRequest { text })
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    NormalizerError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    NormalizerError::Timeout(self.timeout_secs)
                } else {
                    NormalizerError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NormalizerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: NormalizeResponse = response
            .json()
            .map_err(|e| NormalizerError::MalformedResponse(e.to_string()))?;

        if parsed.normalized_text.trim().is_empty() {
            return Err(NormalizerError::MalformedResponse(
                "empty normalized_text".into(),
            ));
        }

        Ok(NormalizedText {
            normalized_text: parsed.normalized_text,
            confidence: parsed.confidence.clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Returns a fixed rewrite, or fails when `text` is `None`.
    pub struct FixedNormalizer {
        pub text: Option<String>,
        pub confidence: f32,
    }

    impl TextNormalizer for FixedNormalizer {
        fn normalize(&self, _text: &str) -> Result<NormalizedText, NormalizerError> {
            match &self.text {
                Some(t) => Ok(NormalizedText {
                    normalized_text: t.clone(),
                    confidence: self.confidence,
                }),
                None => Err(NormalizerError::Connection("http://fixed.invalid".into())),
            }
        }
    }
}

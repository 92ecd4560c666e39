use sha2::{Digest, Sha256};

use super::model::ExtractionRequest;

const FIELD_SEPARATOR: [u8; 1] = [0x1f];

/// Deterministic cache key over the parameters that change an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hashes the already truncated text with the run parameters.
    ///
    /// Temperature takes part with two decimals, so 0.3 and 0.301 share a key.
    pub fn compute(
        source_text: &str,
        country: &str,
        style_hint: &str,
        temperature: f32,
        model: &str,
    ) -> Self {
        let temperature = format!("{:.2}", temperature);
        let mut hasher = Sha256::new();
        for field in [source_text, country, style_hint, temperature.as_str(), model] {
            hasher.update(field.as_bytes());
            hasher.update(FIELD_SEPARATOR);
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn of(request: &ExtractionRequest) -> Self {
        Self::compute(
            request.source_text(),
            request.country(),
            request.style_hint(),
            request.temperature(),
            request.model(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

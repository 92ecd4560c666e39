use std::time::Duration;

use super::{parse_or, process_env, string_or};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Configuration for Gemini API access.
///
/// Environment variables:
/// - GEMINI_API_KEY: credential (an empty key makes every extraction fail with an auth error)
/// - GEMINI_MODEL: model identifier (default: "gemini-2.0-flash")
/// - GEMINI_ENDPOINT: API base URL (default: the public v1beta endpoint)
/// - GEMINI_TIMEOUT_SECS: per-request timeout, never below 60 (default: 180)
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs = parse_or(&lookup, "GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS).max(60);

        Self {
            api_key: lookup("GEMINI_API_KEY")
                .map(|key| key.trim().to_string())
                .unwrap_or_default(),
            model: string_or(&lookup, "GEMINI_MODEL", DEFAULT_MODEL),
            endpoint: string_or(&lookup, "GEMINI_ENDPOINT", gemini::client::DEFAULT_BASE_URL),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "***" })
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

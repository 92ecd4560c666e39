use std::time::Duration;

use reqwest::Client;

use crate::redact::Redactor;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Generation can take minutes on long prompts; shorter timeouts are raised to this.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared Gemini HTTP client configuration.
pub struct GeminiClient {
    pub client: Client,
    api_key: String,
    pub base_url: String,
    pub redactor: Redactor,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout.max(MIN_TIMEOUT)).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            redactor: Redactor::new(&api_key),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Header carrying the credential; keeps it out of the URL.
    pub fn auth_header(&self) -> (&'static str, &str) {
        ("x-goog-api-key", self.api_key.as_str())
    }

    /// Returns the generateContent endpoint URL for `model`.
    pub fn generate_content_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: &str) -> GeminiClient {
        GeminiClient::new(
            api_key.to_string(),
            "https://example.test/v1beta/",
            Duration::from_secs(180),
        )
        .unwrap()
    }

    #[test]
    fn should_build_generate_content_url() {
        assert_eq!(
            client("k").generate_content_url("gemini-2.0-flash"),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn should_report_missing_credential() {
        assert!(!client("  ").has_credential());
        assert!(client("secret").has_credential());
    }

    #[test]
    fn should_not_print_credential_in_debug_output() {
        let printed = format!("{:?}", client("super-secret-key"));

        assert!(!printed.contains("super-secret-key"));
    }
}

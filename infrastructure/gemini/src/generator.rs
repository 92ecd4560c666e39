use async_trait::async_trait;
use serde_json::{Value, json};

use business::domain::extraction::errors::GenerationError;
use business::domain::extraction::services::{GenerationService, RawGeneration};

use crate::classify::{classify_status, classify_transport, retry_after_header};
use crate::client::GeminiClient;

pub struct GeminiGenerator {
    client: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    fn build_body(prompt: &str, temperature: f32) -> Value {
        json!({
            "contents": [
                {"role": "user", "parts": [{"text": prompt}]}
            ],
            "generationConfig": {
                "temperature": temperature.clamp(0.0, 1.0),
            },
        })
    }
}

#[async_trait]
impl GenerationService for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        model: &str,
    ) -> Result<RawGeneration, GenerationError> {
        if !self.client.has_credential() {
            return Err(GenerationError::auth("GEMINI_API_KEY is not configured"));
        }

        let (auth_name, auth_value) = self.client.auth_header();
        let response = self
            .client
            .client
            .post(self.client.generate_content_url(model))
            .header("Content-Type", "application/json")
            .header(auth_name, auth_value)
            .json(&Self::build_body(prompt, temperature))
            .send()
            .await
            .map_err(|e| classify_transport(e, &self.client.redactor))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), model, "gemini answered");

        if !status.is_success() {
            let hint = retry_after_header(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(
                status.as_u16(),
                hint,
                &body,
                &self.client.redactor,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(e, &self.client.redactor))?;

        // A body that is not JSON is handed on as null; the parser degrades it.
        Ok(RawGeneration(
            serde_json::from_str(&body).unwrap_or(Value::Null),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-2.0-flash";
    const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

    fn generator(server: &MockServer, api_key: &str) -> GeminiGenerator {
        let client = GeminiClient::new(api_key.to_string(), server.uri(), Duration::from_secs(60))
            .unwrap();
        GeminiGenerator::new(client)
    }

    #[tokio::test]
    async fn should_post_prompt_with_credential_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {"temperature": 0.5}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "{}"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let raw = generator(&server, "test-key")
            .generate("hello", 0.5, MODEL)
            .await
            .unwrap();

        assert_eq!(
            raw.0["candidates"][0]["content"]["parts"][0]["text"],
            json!("{}")
        );
    }

    #[tokio::test]
    async fn should_fail_with_auth_before_calling_when_key_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let error = generator(&server, "")
            .generate("hello", 0.3, MODEL)
            .await
            .unwrap_err();

        assert!(matches!(error, GenerationError::Auth { .. }));
    }

    #[tokio::test]
    async fn should_surface_retry_after_on_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "5"))
            .mount(&server)
            .await;

        let error = generator(&server, "test-key")
            .generate("hello", 0.3, MODEL)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            GenerationError::rate_limited(Some(Duration::from_secs(5)), "HTTP 429")
        );
    }

    #[tokio::test]
    async fn should_redact_credential_echoed_by_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "key AIzaLeaky is disabled"}
            })))
            .mount(&server)
            .await;

        let error = generator(&server, "AIzaLeaky")
            .generate("hello", 0.3, MODEL)
            .await
            .unwrap_err();

        assert_eq!(error, GenerationError::auth("HTTP 403: key *** is disabled"));
    }

    #[tokio::test]
    async fn should_pass_non_json_success_body_as_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let raw = generator(&server, "test-key")
            .generate("hello", 0.3, MODEL)
            .await
            .unwrap();

        assert_eq!(raw, RawGeneration(Value::Null));
    }

    #[tokio::test]
    async fn should_classify_unreachable_server_as_transient() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);
        let client =
            GeminiClient::new("test-key".to_string(), uri, Duration::from_secs(60)).unwrap();

        let error = GeminiGenerator::new(client)
            .generate("hello", 0.3, MODEL)
            .await
            .unwrap_err();

        assert!(matches!(error, GenerationError::TransientNetwork { .. }));
        assert!(!error.detail().contains("test-key"));
    }
}

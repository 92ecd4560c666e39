use std::sync::Arc;

use poem::http::StatusCode;
use poem_openapi::{OpenApi, payload::Json};

use business::domain::extraction::use_cases::clear_cache::ClearCacheUseCase;
use business::domain::extraction::use_cases::run::{RunExtractionParams, RunExtractionUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::extraction::dto::{ExtractionResponse, RunExtractionRequest};
use crate::api::tags::ApiTags;
use crate::config::extraction_config::{MAX_MAX_CHARS, MIN_MAX_CHARS};

/// Values used for the request fields a caller leaves out.
#[derive(Debug, Clone)]
pub struct ExtractionDefaults {
    pub country: String,
    pub style_hint: String,
    pub temperature: f32,
    pub max_chars: usize,
    pub model: String,
}

pub struct ExtractionApi {
    run_use_case: Arc<dyn RunExtractionUseCase>,
    clear_cache_use_case: Arc<dyn ClearCacheUseCase>,
    defaults: ExtractionDefaults,
}

impl ExtractionApi {
    pub fn new(
        run_use_case: Arc<dyn RunExtractionUseCase>,
        clear_cache_use_case: Arc<dyn ClearCacheUseCase>,
        defaults: ExtractionDefaults,
    ) -> Self {
        Self {
            run_use_case,
            clear_cache_use_case,
            defaults,
        }
    }

    fn params(&self, body: RunExtractionRequest) -> RunExtractionParams {
        RunExtractionParams {
            source_text: body.source_text,
            country: non_blank(body.country).unwrap_or_else(|| self.defaults.country.clone()),
            style_hint: non_blank(body.style_hint)
                .unwrap_or_else(|| self.defaults.style_hint.clone()),
            temperature: body.temperature.unwrap_or(self.defaults.temperature),
            max_chars: body
                .max_chars
                .map(|m| m.clamp(MIN_MAX_CHARS, MAX_MAX_CHARS))
                .unwrap_or(self.defaults.max_chars),
            model: non_blank(body.model).unwrap_or_else(|| self.defaults.model.clone()),
            use_cache: body.use_cache.unwrap_or(true),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Extraction API
///
/// Turns free-form market research text into structured product opportunities.
#[OpenApi]
impl ExtractionApi {
    /// Run an extraction
    ///
    /// Sends the research text to the configured model and returns the decoded
    /// opportunities. Rate limits and transient failures are retried with
    /// backoff before giving up. An identical request repeated right after a
    /// success is answered from the cache unless `use_cache` is false.
    ///
    /// A model answer that cannot be decoded is still a 200, with
    /// `interpreted: false` and the raw answer in `notes`.
    #[oai(path = "/extractions", method = "post", tag = "ApiTags::Extractions")]
    async fn run_extraction(&self, body: Json<RunExtractionRequest>) -> RunExtractionResponse {
        let params = self.params(body.0);

        match self.run_use_case.execute(params).await {
            Ok(outcome) => RunExtractionResponse::Ok(Json(outcome.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status {
                    StatusCode::BAD_GATEWAY => RunExtractionResponse::Refused(json),
                    StatusCode::SERVICE_UNAVAILABLE => RunExtractionResponse::Overloaded(json),
                    _ => RunExtractionResponse::ValidationError(json),
                }
            }
        }
    }

    /// Forget the cached result
    ///
    /// The next extraction always calls the model.
    #[oai(path = "/extractions/cache", method = "delete", tag = "ApiTags::Extractions")]
    async fn clear_cache(&self) -> ClearCacheResponse {
        self.clear_cache_use_case.execute().await;
        ClearCacheResponse::NoContent
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum RunExtractionResponse {
    #[oai(status = 200)]
    Ok(Json<ExtractionResponse>),
    #[oai(status = 422)]
    ValidationError(Json<ErrorResponse>),
    /// The provider rejected the request (bad credential, unknown model...)
    #[oai(status = 502)]
    Refused(Json<ErrorResponse>),
    /// The provider stayed rate limited or unreachable after every retry
    #[oai(status = 503)]
    Overloaded(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearCacheResponse {
    #[oai(status = 204)]
    NoContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    use business::domain::extraction::errors::{ExtractionError, GenerationError};
    use business::domain::extraction::model::ExtractionResult;
    use business::domain::extraction::use_cases::run::ExtractionOutcome;

    mock! {
        pub RunUseCase {}

        #[async_trait]
        impl RunExtractionUseCase for RunUseCase {
            async fn execute(
                &self,
                params: RunExtractionParams,
            ) -> Result<ExtractionOutcome, ExtractionError>;
        }
    }

    mock! {
        pub ClearUseCase {}

        #[async_trait]
        impl ClearCacheUseCase for ClearUseCase {
            async fn execute(&self);
        }
    }

    fn defaults() -> ExtractionDefaults {
        ExtractionDefaults {
            country: "Brazil".to_string(),
            style_hint: "impressão 3D".to_string(),
            temperature: 0.3,
            max_chars: 120_000,
            model: "gemini-2.0-flash".to_string(),
        }
    }

    fn request(source_text: &str) -> RunExtractionRequest {
        RunExtractionRequest {
            source_text: source_text.to_string(),
            country: None,
            style_hint: None,
            temperature: None,
            max_chars: None,
            model: None,
            use_cache: None,
        }
    }

    fn api(run: MockRunUseCase, clear: MockClearUseCase) -> ExtractionApi {
        ExtractionApi::new(Arc::new(run), Arc::new(clear), defaults())
    }

    #[tokio::test]
    async fn should_fill_missing_fields_from_defaults() {
        let mut run = MockRunUseCase::new();
        run.expect_execute()
            .withf(|p| {
                p.country == "Brazil"
                    && p.style_hint == "impressão 3D"
                    && p.temperature == 0.3
                    && p.max_chars == 120_000
                    && p.model == "gemini-2.0-flash"
                    && p.use_cache
            })
            .times(1)
            .returning(|_| {
                Ok(ExtractionOutcome {
                    result: ExtractionResult::default(),
                    from_cache: false,
                    attempts: 1,
                })
            });

        let response = api(run, MockClearUseCase::new())
            .run_extraction(Json(request("phone stands")))
            .await;

        match response {
            RunExtractionResponse::Ok(Json(body)) => {
                assert_eq!(body.attempts, 1);
                assert!(body.interpreted);
            }
            _ => panic!("expected 200"),
        }
    }

    #[tokio::test]
    async fn should_pass_caller_overrides() {
        let mut run = MockRunUseCase::new();
        run.expect_execute()
            .withf(|p| p.country == "Portugal" && p.model == "gemini-1.5-pro" && !p.use_cache)
            .times(1)
            .returning(|_| {
                Ok(ExtractionOutcome {
                    result: ExtractionResult::default(),
                    from_cache: false,
                    attempts: 2,
                })
            });
        let mut body = request("phone stands");
        body.country = Some("Portugal".to_string());
        body.model = Some("gemini-1.5-pro".to_string());
        body.use_cache = Some(false);

        let response = api(run, MockClearUseCase::new())
            .run_extraction(Json(body))
            .await;

        assert!(matches!(response, RunExtractionResponse::Ok(_)));
    }

    #[tokio::test]
    async fn should_clamp_caller_character_budget() {
        let mut run = MockRunUseCase::new();
        run.expect_execute()
            .withf(|p| p.max_chars == 20_000)
            .times(1)
            .returning(|_| {
                Ok(ExtractionOutcome {
                    result: ExtractionResult::default(),
                    from_cache: false,
                    attempts: 1,
                })
            });
        run.expect_execute()
            .withf(|p| p.max_chars == 200_000)
            .times(1)
            .returning(|_| {
                Ok(ExtractionOutcome {
                    result: ExtractionResult::default(),
                    from_cache: false,
                    attempts: 1,
                })
            });
        let api = api(run, MockClearUseCase::new());
        let mut tiny = request("phone stands");
        tiny.max_chars = Some(1);
        let mut huge = request("phone stands");
        huge.max_chars = Some(5_000_000);

        let tiny_response = api.run_extraction(Json(tiny)).await;
        let huge_response = api.run_extraction(Json(huge)).await;

        assert!(matches!(tiny_response, RunExtractionResponse::Ok(_)));
        assert!(matches!(huge_response, RunExtractionResponse::Ok(_)));
    }

    #[tokio::test]
    async fn should_answer_422_on_empty_text() {
        let mut run = MockRunUseCase::new();
        run.expect_execute()
            .times(1)
            .returning(|_| Err(ExtractionError::EmptySourceText));

        let response = api(run, MockClearUseCase::new())
            .run_extraction(Json(request("   ")))
            .await;

        assert!(matches!(response, RunExtractionResponse::ValidationError(_)));
    }

    #[tokio::test]
    async fn should_answer_502_when_refused() {
        let mut run = MockRunUseCase::new();
        run.expect_execute().returning(|_| {
            Err(ExtractionError::Refused(GenerationError::auth("HTTP 401")))
        });

        let response = api(run, MockClearUseCase::new())
            .run_extraction(Json(request("text")))
            .await;

        match response {
            RunExtractionResponse::Refused(Json(error)) => {
                assert_eq!(error.message, "extraction.refused");
            }
            _ => panic!("expected 502"),
        }
    }

    #[tokio::test]
    async fn should_answer_503_when_overloaded() {
        let mut run = MockRunUseCase::new();
        run.expect_execute().returning(|_| {
            Err(ExtractionError::Overloaded {
                attempts: 4,
                last: GenerationError::rate_limited(None, "HTTP 429"),
            })
        });

        let response = api(run, MockClearUseCase::new())
            .run_extraction(Json(request("text")))
            .await;

        assert!(matches!(response, RunExtractionResponse::Overloaded(_)));
    }

    #[tokio::test]
    async fn should_clear_cache() {
        let mut clear = MockClearUseCase::new();
        clear.expect_execute().times(1).returning(|| ());

        let response = api(MockRunUseCase::new(), clear).clear_cache().await;

        assert!(matches!(response, ClearCacheResponse::NoContent));
    }
}

use std::sync::Arc;

use cache::last_result::LastResultCache;
use gemini::client::GeminiClient;
use gemini::generator::GeminiGenerator;
use logger::TracingLogger;

use business::application::extraction::clear_cache::ClearCacheUseCaseImpl;
use business::application::extraction::run::RunExtractionUseCaseImpl;
use business::domain::extraction::prompt::PromptBuilder;
use business::domain::extraction::retry::{RetryController, TokioSleeper};

use crate::api::extraction::routes::{ExtractionApi, ExtractionDefaults};
use crate::api::health::routes::Api as HealthApi;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub extraction_api: ExtractionApi,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger::default());
        let health_api = HealthApi::new();

        if config.gemini.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set; extractions will be refused");
        }

        // Infrastructure adapters
        let gemini_client = GeminiClient::new(
            config.gemini.api_key.clone(),
            config.gemini.endpoint.clone(),
            config.gemini.timeout,
        )?;
        let generator = Arc::new(GeminiGenerator::new(gemini_client));
        let result_cache = Arc::new(LastResultCache::new());
        let retry = Arc::new(RetryController::new(
            config.extraction.retry,
            Arc::new(TokioSleeper),
            Arc::new(TracingLogger::new("retry")),
        ));

        // Extraction use cases
        let run_use_case = Arc::new(RunExtractionUseCaseImpl {
            generator,
            cache: result_cache.clone(),
            retry,
            prompt_builder: PromptBuilder::new(config.extraction.output_language.clone()),
            logger: logger.clone(),
        });
        let clear_cache_use_case = Arc::new(ClearCacheUseCaseImpl {
            cache: result_cache,
            logger,
        });

        let extraction_api = ExtractionApi::new(
            run_use_case,
            clear_cache_use_case,
            ExtractionDefaults {
                country: config.extraction.default_country.clone(),
                style_hint: config.extraction.default_style.clone(),
                temperature: config.extraction.temperature,
                max_chars: config.extraction.max_chars,
                model: config.gemini.model.clone(),
            },
        );

        Ok(Self {
            health_api,
            extraction_api,
        })
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::extraction::cache::ResultCache;
use crate::domain::extraction::errors::ExtractionError;
use crate::domain::extraction::fingerprint::Fingerprint;
use crate::domain::extraction::model::ExtractionRequest;
use crate::domain::extraction::parser::ResponseParser;
use crate::domain::extraction::prompt::PromptBuilder;
use crate::domain::extraction::retry::{RetryController, RetryFailure};
use crate::domain::extraction::services::GenerationService;
use crate::domain::extraction::use_cases::run::{
    ExtractionOutcome, RunExtractionParams, RunExtractionUseCase,
};
use crate::domain::logger::Logger;

pub struct RunExtractionUseCaseImpl {
    pub generator: Arc<dyn GenerationService>,
    pub cache: Arc<dyn ResultCache>,
    pub retry: Arc<RetryController>,
    pub prompt_builder: PromptBuilder,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RunExtractionUseCase for RunExtractionUseCaseImpl {
    async fn execute(
        &self,
        params: RunExtractionParams,
    ) -> Result<ExtractionOutcome, ExtractionError> {
        let request = ExtractionRequest::new(
            &params.source_text,
            params.country,
            params.style_hint,
            params.temperature,
            params.max_chars,
            params.model,
        )?;
        let fingerprint = Fingerprint::of(&request);

        self.logger.info(&format!(
            "Running extraction: {} chars, model {}, market {}",
            request.source_text().chars().count(),
            request.model(),
            request.country()
        ));

        if params.use_cache
            && let Some(result) = self.cache.get(&fingerprint)
        {
            self.logger
                .info(&format!("Serving cached extraction {}", fingerprint));
            return Ok(ExtractionOutcome {
                result,
                from_cache: true,
                attempts: 0,
            });
        }

        let prompt = self.prompt_builder.build(
            request.source_text(),
            request.country(),
            request.style_hint(),
        );

        let generator = &self.generator;
        let prompt = prompt.as_str();
        let temperature = request.temperature();
        let model = request.model();
        let outcome = self
            .retry
            .invoke(move || generator.generate(prompt, temperature, model))
            .await
            .map_err(|failure| match failure {
                RetryFailure::Aborted { error, .. } => ExtractionError::Refused(error),
                RetryFailure::Exhausted { attempts, error } => ExtractionError::Overloaded {
                    attempts,
                    last: error,
                },
            })?;

        let result = ResponseParser::parse(&outcome.value);

        if result.is_parse_failure() {
            self.logger
                .warn("Model answer could not be parsed; returning diagnostic result");
        } else {
            self.cache.put(fingerprint, result.clone());
            self.logger.info(&format!(
                "Extracted {} items and {} opportunities",
                result.items.len(),
                result.top_opportunities.len()
            ));
        }

        Ok(ExtractionOutcome {
            result,
            from_cache: false,
            attempts: outcome.attempts,
        })
    }
}

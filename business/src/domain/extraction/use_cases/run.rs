use async_trait::async_trait;

use crate::domain::extraction::errors::ExtractionError;
use crate::domain::extraction::model::ExtractionResult;

pub struct RunExtractionParams {
    pub source_text: String,
    pub country: String,
    pub style_hint: String,
    pub temperature: f32,
    pub max_chars: usize,
    pub model: String,
    /// When false a cached result for the same fingerprint is ignored.
    pub use_cache: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub result: ExtractionResult,
    pub from_cache: bool,
    /// Remote attempts made; zero on a cache hit.
    pub attempts: u32,
}

#[async_trait]
pub trait RunExtractionUseCase: Send + Sync {
    async fn execute(&self, params: RunExtractionParams)
    -> Result<ExtractionOutcome, ExtractionError>;
}

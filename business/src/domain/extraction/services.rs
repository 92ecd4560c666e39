use async_trait::async_trait;

use super::errors::GenerationError;

/// Untouched JSON payload returned by the generation provider.
///
/// Nothing about its shape is guaranteed; the response parser reads it
/// defensively.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGeneration(pub serde_json::Value);

/// Service port for the remote text generation call.
///
/// One call is one outbound request: retries belong to the caller.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        model: &str,
    ) -> Result<RawGeneration, GenerationError>;
}

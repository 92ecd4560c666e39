use async_trait::async_trait;

#[async_trait]
pub trait ClearCacheUseCase: Send + Sync {
    async fn execute(&self);
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::extraction::cache::ResultCache;
use crate::domain::extraction::use_cases::clear_cache::ClearCacheUseCase;
use crate::domain::logger::Logger;

pub struct ClearCacheUseCaseImpl {
    pub cache: Arc<dyn ResultCache>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCacheUseCase for ClearCacheUseCaseImpl {
    async fn execute(&self) {
        self.cache.clear();
        self.logger.info("Extraction cache cleared");
    }
}

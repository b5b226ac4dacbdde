use async_trait::async_trait;

use crate::cores::errors::ProviderError;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
    pub style: String,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    // One slot per returned image; `None` where the provider gave no URL.
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<Option<String>>, ProviderError>;
}

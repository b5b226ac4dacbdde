use async_trait::async_trait;

use crate::cores::errors::ProviderError;

// Instruction sent to a text-generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    pub system: String,
    pub user: String,
    // Data URI attached as a vision input, when enabled.
    pub image_data_uri: Option<String>,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    // Content of the first completion, if the provider returned any.
    async fn complete(&self, request: &SuggestionRequest) -> Result<Option<String>, ProviderError>;
}

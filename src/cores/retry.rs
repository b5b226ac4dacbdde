use std::time::Duration;

use async_trait::async_trait;
use log::warn;

use crate::configs::settings::RetryConfig;
use crate::cores::chat_models::chat_controller::{SuggestionRequest, TextGenerator};
use crate::cores::errors::ProviderError;
use crate::cores::image_models::image_controller::{ImageGenerator, ImageRequest};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl RetryPolicy {
    // Zero attempts would never call the provider.
    pub fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    fn delay(&self, attempt: usize) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }
}

// Wraps a provider and retries retryable failures with exponential backoff.
pub struct Retrying<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P> Retrying<P> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Retrying { inner, policy }
    }
}

async fn with_retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut call: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ProviderError>>,
{
    let attempts = policy.attempts();
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < attempts => {
                let delay = policy.delay(attempt);
                warn!(
                    "{} failed: {} (attempt={}/{}), retrying in {:?}",
                    label, err, attempt + 1, attempts, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[async_trait]
impl<P: TextGenerator> TextGenerator for Retrying<P> {
    async fn complete(&self, request: &SuggestionRequest) -> Result<Option<String>, ProviderError> {
        with_retry(&self.policy, "text generation", || self.inner.complete(request)).await
    }
}

#[async_trait]
impl<P: ImageGenerator> ImageGenerator for Retrying<P> {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<Option<String>>, ProviderError> {
        with_retry(&self.policy, "image generation", || self.inner.generate(request)).await
    }
}

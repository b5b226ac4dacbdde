use std::sync::Arc;

use log::{info, warn};

use crate::configs::settings::{Config, API_KEY_ENV};
use crate::cores::designer::Designer;
use crate::cores::openai::OpenAiClient;
use crate::cores::retry::{RetryPolicy, Retrying};

// Shared by every worker. Holds no mutable state.
pub struct AppState {
    // None when the provider credential is missing; design requests then fail fast.
    pub designer: Option<Designer>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<AppState, reqwest::Error> {
        let designer = match config.api_key() {
            Some(api_key) => {
                let client = OpenAiClient::new(&config.openai, api_key)?;
                let policy = RetryPolicy::from(&config.retry);
                info!(
                    "Using {} for suggestions and {} for images (max attempts: {})",
                    config.openai.chat_model, config.openai.image_model, policy.attempts()
                );
                let provider = Arc::new(Retrying::new(client, policy));
                Some(Designer::new(provider.clone(), provider, config.design.clone()))
            }
            None => {
                warn!("{} is not set, design requests will be rejected", API_KEY_ENV);
                None
            }
        };

        Ok(AppState { designer, max_body_bytes: config.max_body_bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_leaves_designer_unset() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert!(state.designer.is_none());
        assert_eq!(state.max_body_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_key_builds_designer() {
        let mut config = Config::default();
        config.openai.api_key = Some("sk-test".to_string());
        let state = AppState::from_config(&config).unwrap();
        assert!(state.designer.is_some());
    }
}

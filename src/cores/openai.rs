use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::configs::settings::OpenAiConfig;
use crate::cores::errors::ProviderError;
use crate::cores::schemas::ProviderErrorEnvelope;

// Shared client for OpenAI compatible APIs. Built once at startup and injected
// into the designer as both the text and the image provider.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    pub(crate) chat_model: String,
    pub(crate) image_model: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(OpenAiClient {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("POST {}", url);

        let response = self.http.post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        Ok(response.json::<R>().await?)
    }
}

// Prefer the message inside the provider's error envelope, fall back to the raw body.
pub(crate) fn status_error(status: u16, body: &str) -> ProviderError {
    let message = match serde_json::from_str::<ProviderErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => format!("HTTP status {}", status),
        Err(_) => body.trim().to_string(),
    };
    ProviderError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_reads_envelope() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(
            status_error(401, body),
            ProviderError::Status { status: 401, message: "Incorrect API key provided".into() }
        );
    }

    #[test]
    fn test_status_error_falls_back_to_body() {
        assert_eq!(
            status_error(502, "Bad Gateway\n"),
            ProviderError::Status { status: 502, message: "Bad Gateway".into() }
        );
        assert_eq!(
            status_error(503, ""),
            ProviderError::Status { status: 503, message: "HTTP status 503".into() }
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = OpenAiConfig { base_url: "http://localhost:8080/v1/".into(), ..OpenAiConfig::default() };
        let client = OpenAiClient::new(&config, "sk-test").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.chat_model, "gpt-4o-mini");
    }
}

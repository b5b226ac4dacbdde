use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::apis::schemas::ErrorResponse;

// Failure of a single call to an external generation provider.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("request failed: {message}")]
    Transport { message: String, retryable: bool },
    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to parse provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Transport { retryable, .. } => *retryable,
            ProviderError::Status { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            ProviderError::Decode(_) => false,
        }
    }

    // Message reported back to callers as `details`.
    pub fn details(&self) -> String {
        match self {
            ProviderError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ProviderError::Decode(err.to_string());
        }
        ProviderError::Transport {
            retryable: err.is_timeout() || err.is_connect(),
            message: err.to_string(),
        }
    }
}

// Every failure of the design endpoint. Rendered as `{ error, details? }`.
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Configuration(String),
    #[error("Failed to generate design suggestions")]
    TextGeneration { details: String },
    #[error("Failed to generate image")]
    ImageGeneration { details: String },
    #[error("An unexpected error occurred")]
    Unexpected { details: Option<String> },
}

impl DesignError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DesignError::InvalidInput(message.into())
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            DesignError::TextGeneration { details } | DesignError::ImageGeneration { details } => {
                Some(details.as_str())
            }
            DesignError::Unexpected { details } => details.as_deref(),
            DesignError::InvalidInput(_) | DesignError::Configuration(_) => None,
        }
    }
}

impl ResponseError for DesignError {
    fn status_code(&self) -> StatusCode {
        match self {
            DesignError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.to_string(),
            details: self.details().map(str::to_string),
        };
        HttpResponse::build(self.status_code()).json(error_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        let status = |status| ProviderError::Status { status, message: "x".into() };
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(status(408).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!ProviderError::Decode("bad".into()).is_retryable());
    }

    #[test]
    fn test_status_details_are_provider_message() {
        let err = ProviderError::Status { status: 400, message: "content policy".into() };
        assert_eq!(err.details(), "content policy");
    }

    #[test]
    fn test_design_error_statuses() {
        assert_eq!(DesignError::invalid_input("Image is required").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(DesignError::Configuration("missing".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = DesignError::ImageGeneration { details: "boom".into() };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to generate image");
        assert_eq!(err.details(), Some("boom"));
    }
}

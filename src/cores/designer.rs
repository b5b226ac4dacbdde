use std::sync::Arc;

use log::{error, info, warn};

use crate::apis::design_api::schemas::{DesignRequest, DesignResponse};
use crate::configs::settings::DesignConfig;
use crate::cores::chat_models::chat_controller::{SuggestionRequest, TextGenerator};
use crate::cores::errors::DesignError;
use crate::cores::image_models::image_controller::{ImageGenerator, ImageRequest};

pub const SYSTEM_INSTRUCTION: &str = "You are an expert interior designer. Provide detailed design suggestions based on the uploaded image and selected style.";

// Room noun used in the image prompt when no description was given.
const DEFAULT_ROOM: &str = "room";

/// A request that passed validation. Optional fields are `None` when absent or blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest<'a> {
    pub image_base64: &'a str,
    pub style: &'a str,
    pub image_description: Option<&'a str>,
    pub additional_preferences: Option<&'a str>,
    pub design_prompt: Option<&'a str>,
}

/// Sequences the text and image providers for one design request.
///
/// The designer holds no mutable state; one instance serves every request.
pub struct Designer {
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
    config: DesignConfig,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Designer {
    pub fn new(text: Arc<dyn TextGenerator>, image: Arc<dyn ImageGenerator>, config: DesignConfig) -> Self {
        Designer { text, image, config }
    }

    pub fn validate<'a>(&self, request: &'a DesignRequest) -> Result<ValidatedRequest<'a>, DesignError> {
        let image_base64 = non_blank(&request.image_base64)
            .ok_or_else(|| DesignError::invalid_input("Image is required"))?;
        let style = non_blank(&request.style)
            .ok_or_else(|| DesignError::invalid_input("Style is required"))?;
        let image_description = non_blank(&request.image_description);
        if self.config.require_image_description && image_description.is_none() {
            return Err(DesignError::invalid_input("Room description is required"));
        }

        Ok(ValidatedRequest {
            image_base64,
            style,
            image_description,
            additional_preferences: non_blank(&request.additional_preferences),
            design_prompt: non_blank(&request.design_prompt),
        })
    }

    pub async fn generate(&self, request: &DesignRequest) -> Result<DesignResponse, DesignError> {
        let request = self.validate(request)?;
        info!(
            "Generating design: style={}, room={}",
            request.style,
            request.image_description.unwrap_or(DEFAULT_ROOM)
        );

        // 1. Text suggestions. The image provider is never called if this fails.
        let suggestion = SuggestionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: suggestion_prompt(&request),
            image_data_uri: self
                .config
                .include_image_in_prompt
                .then(|| request.image_base64.to_string()),
        };
        let design_suggestions = self
            .text
            .complete(&suggestion)
            .await
            .map_err(|err| {
                error!(target: "error_log", "Text generation failed: {}", err);
                DesignError::TextGeneration { details: err.details() }
            })?
            .unwrap_or_default();

        // 2. Visualization. A failure here discards the suggestions unless partial results are allowed.
        let image_request = ImageRequest {
            prompt: image_prompt(&request),
            n: self.config.image_count,
            size: self.config.image_size.clone(),
            quality: self.config.image_quality.clone(),
            style: self.config.image_style.clone(),
        };
        let generated_image_urls = match self.image.generate(&image_request).await {
            Ok(urls) => urls.into_iter().map(Option::unwrap_or_default).collect(),
            Err(err) if self.config.allow_partial_results => {
                warn!(target: "error_log", "Image generation failed, returning suggestions only: {}", err);
                Vec::new()
            }
            Err(err) => {
                error!(target: "error_log", "Image generation failed: {}", err);
                return Err(DesignError::ImageGeneration { details: err.details() });
            }
        };

        Ok(DesignResponse { design_suggestions, generated_image_urls })
    }
}

pub fn suggestion_prompt(request: &ValidatedRequest) -> String {
    format!(
        "Image description: {}\nStyle: {}\nAdditional preferences: {}\nDesign prompt: {}\n\nPlease provide detailed design suggestions in markdown format.",
        request.image_description.unwrap_or("None"),
        request.style,
        request.additional_preferences.unwrap_or("None"),
        request.design_prompt.unwrap_or("None"),
    )
}

pub fn image_prompt(request: &ValidatedRequest) -> String {
    let mut prompt = format!(
        "Create a photorealistic interior design visualization of a {} in {} style.",
        request.image_description.unwrap_or(DEFAULT_ROOM),
        request.style,
    );
    if let Some(design_prompt) = request.design_prompt {
        prompt.push_str(&format!(" Incorporate these elements: {}", design_prompt));
    }
    prompt.push_str(" Make it look like a professional interior design photograph.");
    prompt
}

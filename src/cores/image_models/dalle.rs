use async_trait::async_trait;
use log::info;

use crate::cores::errors::ProviderError;
use crate::cores::image_models::image_controller::{ImageGenerator, ImageRequest};
use crate::cores::openai::OpenAiClient;
use crate::cores::schemas::{ImageGenerationRequest, ImageGenerationResponse};

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<Option<String>>, ProviderError> {
        // 1. Construct the request body for the image generation API
        let request_body = ImageGenerationRequest {
            model: self.image_model.clone(),
            prompt: request.prompt.clone(),
            n: request.n,
            size: request.size.clone(),
            quality: request.quality.clone(),
            style: request.style.clone(),
        };

        // 2. Send the POST request
        info!("Generating {} image(s) with {}", request.n, self.image_model);
        let response: ImageGenerationResponse = self.post_json("images/generations", &request_body).await?;

        // 3. Keep one slot per returned image
        Ok(image_urls(response))
    }
}

pub(crate) fn image_urls(response: ImageGenerationResponse) -> Vec<Option<String>> {
    response.data.into_iter().map(|image| image.url).collect()
}

use async_trait::async_trait;
use log::info;
use serde_json::{json, Value};

use crate::cores::chat_models::chat_controller::{SuggestionRequest, TextGenerator};
use crate::cores::errors::ProviderError;
use crate::cores::openai::OpenAiClient;
use crate::cores::schemas::{ChatCompletionRequest, ChatMessage, CompletionsResponse};

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &SuggestionRequest) -> Result<Option<String>, ProviderError> {
        // 1. Build the request body
        let request_body = build_chat_request(&self.chat_model, request);

        // 2. Send the request to the chat completions API
        info!("Requesting design suggestions from {}", self.chat_model);
        let response: CompletionsResponse = self.post_json("chat/completions", &request_body).await?;

        // 3. Only the first completion is used
        Ok(first_completion(response))
    }
}

pub(crate) fn build_chat_request(model: &str, request: &SuggestionRequest) -> ChatCompletionRequest {
    let user_content = match &request.image_data_uri {
        Some(data_uri) => json!([
            { "type": "text", "text": request.user },
            { "type": "image_url", "image_url": { "url": data_uri } }
        ]),
        None => Value::String(request.user.clone()),
    };

    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage { role: "system".to_string(), content: Value::String(request.system.clone()) },
            ChatMessage { role: "user".to_string(), content: user_content },
        ],
    }
}

pub(crate) fn first_completion(response: CompletionsResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
}

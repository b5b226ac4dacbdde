use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------------------------ Chat Completions ------------------------------------------
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, Debug)]
pub struct ChatMessage {
    pub role: String,
    pub content: Value,             // Plain string, or an array of parts for vision input.
}

#[derive(Deserialize, Debug)]
pub struct CompletionsResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
pub struct CompletionChoice {
    pub message: Option<AssistantMessage>,
}

#[derive(Deserialize, Debug)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

// ------------------------------------------ Images ------------------------------------------
#[derive(Serialize, Debug)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
    pub style: String,
}

#[derive(Deserialize, Debug)]
pub struct ImageGenerationResponse {
    #[allow(dead_code)]
    pub created: Option<u64>,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
pub struct ImageData {
    pub url: Option<String>,
    #[allow(dead_code)]
    pub revised_prompt: Option<String>,
}

// ------------------------------------------ Errors ------------------------------------------
// Error envelope returned by OpenAI compatible APIs on non-success statuses.
#[derive(Deserialize, Debug)]
pub struct ProviderErrorEnvelope {
    pub error: ProviderErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct ProviderErrorBody {
    pub message: String,
    #[allow(dead_code)]
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[allow(dead_code)]
    pub code: Option<Value>,
}

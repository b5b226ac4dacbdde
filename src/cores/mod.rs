pub mod chat_models;
pub mod designer;
pub mod errors;
pub mod image_models;
pub mod openai;
pub mod retry;
pub mod schemas;
pub mod upload;

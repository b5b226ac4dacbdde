use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::cores::chat_models::chat_controller::{SuggestionRequest, TextGenerator};
use crate::cores::errors::ProviderError;
use crate::cores::image_models::image_controller::{ImageGenerator, ImageRequest};

pub struct FakeText {
    reply: Result<Option<String>, ProviderError>,
    panics: bool,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<SuggestionRequest>>,
}

impl FakeText {
    pub fn replying(content: &str) -> Arc<Self> {
        Self::with(Ok(Some(content.to_string())))
    }

    pub fn with(reply: Result<Option<String>, ProviderError>) -> Arc<Self> {
        Arc::new(FakeText { reply, panics: false, calls: AtomicUsize::new(0), last_request: Mutex::new(None) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with(Err(ProviderError::Status { status: 401, message: message.to_string() }))
    }

    pub fn panicking() -> Arc<Self> {
        Arc::new(FakeText { reply: Ok(None), panics: true, calls: AtomicUsize::new(0), last_request: Mutex::new(None) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SuggestionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeText {
    async fn complete(&self, request: &SuggestionRequest) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if self.panics {
            panic!("text provider exploded");
        }
        self.reply.clone()
    }
}

pub struct FakeImage {
    reply: Result<Vec<Option<String>>, ProviderError>,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<ImageRequest>>,
}

impl FakeImage {
    pub fn returning(urls: Vec<Option<&str>>) -> Arc<Self> {
        Self::with(Ok(urls.into_iter().map(|url| url.map(str::to_string)).collect()))
    }

    pub fn with(reply: Result<Vec<Option<String>>, ProviderError>) -> Arc<Self> {
        Arc::new(FakeImage { reply, calls: AtomicUsize::new(0), last_request: Mutex::new(None) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with(Err(ProviderError::Status { status: 400, message: message.to_string() }))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ImageRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for FakeImage {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<Option<String>>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply.clone()
    }
}

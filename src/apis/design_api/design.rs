use std::any::Any;
use std::panic::AssertUnwindSafe;

use actix_web::{get, post, web, HttpResponse, Responder};
use bytes::BytesMut;
use futures::{FutureExt, StreamExt};
use log::{error, warn};

use crate::apis::app_state::AppState;
use crate::apis::design_api::schemas::{style_options, DesignRequest, DesignResponse, StyleOption};
use crate::apis::schemas::ErrorResponse;
use crate::cores::errors::DesignError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
       .service(styles)
       .service(design);
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = String))
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    "OK"
}

#[utoipa::path(
    get,
    path = "/api/styles",
    responses((status = 200, body = Vec<StyleOption>))
)]
#[get("/api/styles")]
pub async fn styles() -> impl Responder {
    HttpResponse::Ok().json(style_options())
}

#[utoipa::path(
    post,
    path = "/api/design",
    request_body = DesignRequest,
    responses(
        (status = 200, body = DesignResponse),
        (status = 400, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
// Handle the POST request for /api/design.
#[post("/api/design")]
pub async fn design(data: web::Data<AppState>, payload: web::Payload) -> Result<HttpResponse, DesignError> {
    // 1. Refuse to run without a provider credential
    let designer = data.designer.as_ref()
        .ok_or_else(|| DesignError::Configuration("OpenAI API key not configured".into()))?;

    // 2. Parse the request body
    let body = read_body(payload, data.max_body_bytes).await?;
    let request: DesignRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!("Rejected design request body: {}", err);
        DesignError::invalid_input("Invalid request body")
    })?;

    // 3. Validate and run both providers; panics become structured errors too
    let response = AssertUnwindSafe(designer.generate(&request))
        .catch_unwind()
        .await
        .map_err(|panic| {
            let details = panic_message(panic.as_ref());
            error!(target: "error_log", "Design generation panicked: {}", details);
            DesignError::Unexpected { details: Some(details) }
        })??;

    Ok(HttpResponse::Ok().json(response))
}

async fn read_body(mut payload: web::Payload, limit: usize) -> Result<BytesMut, DesignError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            warn!("Failed to read request body: {}", err);
            DesignError::invalid_input("Invalid request body")
        })?;
        if body.len() + chunk.len() > limit {
            return Err(DesignError::invalid_input("Request body too large"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

use std::sync::Mutex;

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::{post, web, HttpResponse};
use log::{debug, warn};
use tokio::sync::oneshot;

use crate::apis::design_api::schemas::UploadResponse;
use crate::apis::schemas::ErrorResponse;
use crate::cores::errors::DesignError;
use crate::cores::upload::encoder::{SelectedFile, UploadEncoder};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload);
}

// Repeated `file` parts behave like a drop: only the first one is used.
#[derive(MultipartForm)]
pub struct UploadForm {
    #[multipart(rename = "file")]
    pub files: Vec<TempFile>,
}

// Multipart errors are reported in the same JSON shape as the design endpoint.
pub fn multipart_config(total_limit: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(total_limit)
        .error_handler(|err, _req| {
            warn!("Rejected upload: {}", err);
            DesignError::invalid_input("Invalid upload").into()
        })
}

#[utoipa::path(
    post,
    path = "/api/upload",
    responses(
        (status = 200, body = UploadResponse),
        (status = 400, body = ErrorResponse),
    )
)]
// Encode an uploaded room photo as a data URI for the design request.
#[post("/api/upload")]
pub async fn upload(MultipartForm(form): MultipartForm<UploadForm>) -> Result<HttpResponse, DesignError> {
    // 1. Describe the uploaded files the way a browser would
    if form.files.is_empty() {
        return Err(DesignError::invalid_input("Invalid upload"));
    }
    let selected: Vec<SelectedFile> = form.files.iter().map(describe).collect();

    // 2. Run it through the encoder; the callback fires at most once per file
    let (tx, rx) = oneshot::channel();
    let tx = Mutex::new(Some(tx));
    let encoder = UploadEncoder::new(move |data_uri: String| {
        if let Some(tx) = tx.lock().ok().and_then(|mut slot| slot.take()) {
            let _ = tx.send(data_uri);
        }
    });
    let task = encoder.drop_files(selected)
        .ok_or_else(|| DesignError::invalid_input("Only JPEG and PNG images are supported"))?;
    if let Some(preview) = encoder.preview() {
        debug!("Encoding {} ({}) as {}", preview.file_name, preview.media_type, preview.reference);
    }
    task.await.map_err(|err| DesignError::Unexpected { details: Some(err.to_string()) })?;
    drop(encoder);

    // 3. No result means the file could not be read
    let image_base64 = rx.await
        .map_err(|_| DesignError::invalid_input("Failed to read uploaded file"))?;
    Ok(HttpResponse::Ok().json(UploadResponse { image_base64 }))
}

fn describe(file: &TempFile) -> SelectedFile {
    let media_type = file.content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();
    let name = file.file_name.clone().unwrap_or_else(|| "unnamed".to_string());
    SelectedFile::from_path(file.file.path(), name, media_type)
}

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use log::{debug, warn};
use tokio::task::JoinHandle;

// Media types accepted from the picker or a drop. Anything else is ignored.
pub const ALLOWED_MEDIA_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

static PREVIEW_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    #[allow(dead_code)]
    Bytes(Bytes),
}

/// A file chosen by the user, with the media type the browser declared for it.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn from_path(path: impl AsRef<Path>, name: impl Into<String>, media_type: impl Into<String>) -> Self {
        SelectedFile {
            name: name.into(),
            media_type: media_type.into(),
            source: FileSource::Path(path.as_ref().to_path_buf()),
        }
    }

    #[allow(dead_code)]
    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        SelectedFile {
            name: name.into(),
            media_type: media_type.into(),
            source: FileSource::Bytes(bytes.into()),
        }
    }
}

/// Transient reference used to display the selected image before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub reference: String,
    pub file_name: String,
    pub media_type: String,
}

type UploadCallback = dyn Fn(String) + Send + Sync;

/// Turns a selected image into a data URI and hands it to the owner through
/// a single callback. An empty string means "no image".
///
/// No size limit is applied; the whole file is read into memory.
pub struct UploadEncoder {
    on_upload: Arc<UploadCallback>,
    preview: Mutex<Option<Preview>>,
}

impl UploadEncoder {
    pub fn new<F>(on_upload: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        UploadEncoder {
            on_upload: Arc::new(on_upload),
            preview: Mutex::new(None),
        }
    }

    // Exact match on the declared type, as the browser reports it.
    pub fn is_allowed(media_type: &str) -> bool {
        ALLOWED_MEDIA_TYPES.contains(&media_type)
    }

    /// Accepts a picked file. Returns the encoding task, or `None` when the
    /// media type is not allowed, in which case nothing happens at all.
    ///
    /// Each accepted file starts an independent read; earlier reads keep running.
    pub fn select(&self, file: SelectedFile) -> Option<JoinHandle<()>> {
        if !Self::is_allowed(&file.media_type) {
            debug!("Ignoring {} with media type {:?}", file.name, file.media_type);
            return None;
        }

        self.set_preview(Some(Preview {
            reference: format!("preview://{}/{}", PREVIEW_SEQ.fetch_add(1, Ordering::Relaxed), file.name),
            file_name: file.name.clone(),
            media_type: file.media_type.clone(),
        }));

        let on_upload = Arc::clone(&self.on_upload);
        Some(tokio::spawn(async move {
            match read_source(&file.source).await {
                Ok(bytes) => on_upload(encode_data_uri(&file.media_type, &bytes)),
                Err(err) => warn!("Failed to read {}: {}", file.name, err),
            }
        }))
    }

    /// Accepts dropped files; only the first one is considered.
    pub fn drop_files(&self, files: Vec<SelectedFile>) -> Option<JoinHandle<()>> {
        files.into_iter().next().and_then(|file| self.select(file))
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        self.set_preview(None);
        (self.on_upload)(String::new());
    }

    pub fn preview(&self) -> Option<Preview> {
        self.preview.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    fn set_preview(&self, preview: Option<Preview>) {
        *self.preview.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = preview;
    }
}

pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

async fn read_source(source: &FileSource) -> std::io::Result<Bytes> {
    match source {
        FileSource::Path(path) => tokio::fs::read(path).await.map(Bytes::from),
        FileSource::Bytes(bytes) => Ok(bytes.clone()),
    }
}

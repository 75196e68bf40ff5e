/**
 * Media Storage
 *
 * The `MediaStore` trait is the boundary to whatever actually keeps uploaded
 * files. Providers own format restriction: each one checks the file name
 * against `ALLOWED_FORMATS` before storing anything.
 */

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

/// File formats accepted by every provider
pub const ALLOWED_FORMATS: [&str; 3] = ["jpg", "png", "pdf"];

/// A file received from the client
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Client-supplied file name, if any
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Where a stored file ended up
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Public URL of the file
    pub url: String,
    /// Provider-assigned identifier
    pub public_id: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    /// File extension not in the allow-list
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered but refused the upload
    #[error("provider rejected upload ({status}): {message}")]
    Provider { status: u16, message: String },
}

/// External file storage
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store one file and return its public location
    async fn store(&self, upload: FileUpload) -> Result<StoredFile, StorageError>;
}

/// Resolve the canonical format of a file from its name
///
/// Matching is case-insensitive and `jpeg` is folded into `jpg`.
pub fn allowed_format(file_name: Option<&str>) -> Result<&'static str, StorageError> {
    let name = file_name.unwrap_or_default();
    let extension = std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| StorageError::UnsupportedFormat(name.to_string()))?;

    let canonical = if extension == "jpeg" { "jpg" } else { extension.as_str() };

    ALLOWED_FORMATS
        .iter()
        .find(|format| **format == canonical)
        .copied()
        .ok_or(StorageError::UnsupportedFormat(extension))
}

/**
 * Upload Handler
 *
 * This module implements POST /api/dashboard. The handler takes the
 * multipart field named `file`, hands it to the configured `MediaStore`
 * and returns where it landed.
 *
 * # Responses
 *
 * - `200` `{"message": "File uploaded successfully", "fileUrl": "...", "publicId": "..."}`
 * - `400` `{"message": "No file uploaded"}` - no `file` part with a filename, or not a multipart body
 * - `413` `{"message": "File too large"}` - body over the upload limit
 * - `400` `{"message": "Unsupported file format"}` - rejected by the provider allow-list
 * - `500` `{"message": "Server error"}` - provider failure
 */

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::ApiError;
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::uploads::storage::{FileUpload, MediaStore, StorageError};

/// Multipart field carrying the file
pub const FILE_FIELD: &str = "file";

pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File too large";
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported file format";
pub const UPLOADED_MESSAGE: &str = "File uploaded successfully";

/// Upload response
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_url: String,
    pub public_id: String,
}

/// Pull the `file` field out of a multipart body
///
/// Other fields are skipped, and so is a `file` part without a filename,
/// which is a plain text field rather than an attached file.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<FileUpload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            tracing::debug!("Ignoring `{}` field without a filename", FILE_FIELD);
            continue;
        };

        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await?;
        return Ok(Some(FileUpload {
            file_name: Some(file_name),
            content_type,
            data,
        }));
    }
    Ok(None)
}

/// Map a multipart read failure onto the client-facing error
fn multipart_error(error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload over the body limit: {}", error);
        ApiError::payload_too_large(FILE_TOO_LARGE_MESSAGE)
    } else {
        tracing::warn!("Malformed multipart body: {}", error);
        ApiError::validation(NO_FILE_MESSAGE)
    }
}

/// Upload handler
///
/// When the route is gated, the authenticated caller is present in the
/// request extensions and is logged with the upload.
pub async fn upload_file(
    State(media): State<Arc<dyn MediaStore>>,
    caller: Option<Extension<AuthenticatedUser>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(|e| {
        tracing::warn!("Upload without multipart body: {}", e);
        ApiError::validation(NO_FILE_MESSAGE)
    })?;

    let upload = read_file_field(multipart)
        .await
        .map_err(multipart_error)?
        .ok_or_else(|| ApiError::validation(NO_FILE_MESSAGE))?;

    let size = upload.data.len();
    let stored = media.store(upload).await.map_err(|e| match e {
        StorageError::UnsupportedFormat(format) => {
            tracing::warn!("Rejected upload with format: {}", format);
            ApiError::validation(UNSUPPORTED_FORMAT_MESSAGE)
        }
        other => ApiError::internal(format!("Failed to store upload: {}", other)),
    })?;

    match caller {
        Some(Extension(user)) => tracing::info!(
            "Account {} uploaded {} bytes as {}",
            user.user_id,
            size,
            stored.public_id
        ),
        None => tracing::info!("Uploaded {} bytes as {}", size, stored.public_id),
    }

    Ok(Json(UploadResponse {
        message: UPLOADED_MESSAGE.to_string(),
        file_url: stored.url,
        public_id: stored.public_id,
    }))
}

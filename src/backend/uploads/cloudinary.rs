/**
 * Cloudinary Media Store
 *
 * Sends uploads to Cloudinary's signed upload API:
 *
 * ```text
 * POST {api_base}/v1_1/{cloud_name}/auto/upload
 * ```
 *
 * The request carries `folder` and `allowed_formats` so Cloudinary applies
 * the same allow-list we check locally. Signed parameters are sorted by
 * name, joined as `k=v&k=v`, suffixed with the API secret and SHA-1 hashed.
 */

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::backend::server::config::CloudinaryConfig;
use crate::backend::uploads::storage::{
    allowed_format, FileUpload, MediaStore, StorageError, StoredFile, ALLOWED_FORMATS,
};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Sign a set of upload parameters
pub(crate) fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/auto/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn store(&self, upload: FileUpload) -> Result<StoredFile, StorageError> {
        allowed_format(upload.file_name.as_deref())?;

        let params = vec![
            ("allowed_formats", ALLOWED_FORMATS.join(",")),
            ("folder", self.config.folder.clone()),
            ("timestamp", Utc::now().timestamp().to_string()),
        ];
        let signature = sign(&params, &self.config.api_secret);

        let file_name = upload.file_name.clone().unwrap_or_default();
        let file_part = || Part::bytes(upload.data.to_vec()).file_name(file_name.clone());
        // Cloudinary detects the type itself when none is sent
        let part = match upload.content_type.as_deref() {
            Some(content_type) => file_part().mime_str(content_type).unwrap_or_else(|e| {
                tracing::debug!("Dropping unusable content type '{}': {}", content_type, e);
                file_part()
            }),
            None => file_part(),
        };

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(StorageError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response.json().await?;
        tracing::debug!("Cloudinary stored {}", uploaded.public_id);

        Ok(StoredFile {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Bytes;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: String) -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "1234".to_string(),
            api_secret: "abcd".to_string(),
            folder: "uploads".to_string(),
            api_base,
            timeout: Duration::from_secs(5),
        }
    }

    fn upload(name: &str) -> FileUpload {
        FileUpload {
            file_name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
            data: Bytes::from_static(b"PNG fake bytes"),
        }
    }

    #[test]
    fn test_sign_is_order_independent() {
        let a = sign(
            &[("timestamp", "1".to_string()), ("folder", "uploads".to_string())],
            "secret",
        );
        let b = sign(
            &[("folder", "uploads".to_string()), ("timestamp", "1".to_string())],
            "secret",
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_depends_on_secret() {
        let params = [("timestamp", "1".to_string())];
        assert_ne!(sign(&params, "one"), sign(&params, "two"));
    }

    #[tokio::test]
    async fn test_store_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/auto/upload"))
            .and(body_string_contains("name=\"signature\""))
            .and(body_string_contains("jpg,png,pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "public_id": "uploads/abc123",
                "secure_url": "https://res.cloudinary.com/demo/image/upload/uploads/abc123.png",
                "format": "png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = CloudinaryStore::new(config(server.uri())).unwrap();
        let stored = store.store(upload("photo.png")).await.unwrap();

        assert_eq!(stored.public_id, "uploads/abc123");
        assert!(stored.url.starts_with("https://res.cloudinary.com/"));
    }

    #[tokio::test]
    async fn test_store_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid Signature" }
            })))
            .mount(&server)
            .await;

        let store = CloudinaryStore::new(config(server.uri())).unwrap();
        let result = store.store(upload("photo.png")).await;

        assert_matches!(
            result,
            Err(StorageError::Provider { status: 401, ref message }) if message == "Invalid Signature"
        );
    }

    #[tokio::test]
    async fn test_store_ignores_unparsable_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/auto/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "public_id": "uploads/def456",
                "secure_url": "https://res.cloudinary.com/demo/image/upload/uploads/def456.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = CloudinaryStore::new(config(server.uri())).unwrap();
        let mut file = upload("photo.png");
        file.content_type = Some("garbage".to_string());

        let stored = store.store(file).await.unwrap();
        assert_eq!(stored.public_id, "uploads/def456");
    }

    #[tokio::test]
    async fn test_unlisted_format_never_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = CloudinaryStore::new(config(server.uri())).unwrap();
        let result = store.store(upload("malware.exe")).await;

        assert_matches!(result, Err(StorageError::UnsupportedFormat(_)));
    }
}

/**
 * Disk Media Store
 *
 * Writes uploads into a local directory under a random name and hands back
 * a URL below `{public_base_url}/uploads/`. The router serves that directory
 * with `ServeDir`, so the URL resolves against this same server.
 */

use std::path::PathBuf;

use async_trait::async_trait;

use crate::backend::uploads::storage::{allowed_format, FileUpload, MediaStore, StorageError, StoredFile};

/// URL prefix the upload directory is mounted under
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
    public_base_url: String,
}

impl DiskStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl MediaStore for DiskStore {
    async fn store(&self, upload: FileUpload) -> Result<StoredFile, StorageError> {
        let format = allowed_format(upload.file_name.as_deref())?;

        let id = uuid::Uuid::new_v4().simple().to_string();
        let file_name = format!("{}.{}", id, format);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&file_name), &upload.data).await?;

        tracing::debug!("Stored {} bytes at {}", upload.data.len(), file_name);

        Ok(StoredFile {
            url: format!("{}{}/{}", self.public_base_url, UPLOADS_ROUTE, file_name),
            public_id: format!("{}/{}", UPLOADS_ROUTE.trim_start_matches('/'), id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Bytes;

    fn upload(name: &str) -> FileUpload {
        FileUpload {
            file_name: Some(name.to_string()),
            content_type: None,
            data: Bytes::from_static(b"%PDF-1.4 test"),
        }
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path().join("nested"), "http://localhost:3000");

        let stored = store.store(upload("report.pdf")).await.unwrap();
        assert!(stored.url.starts_with("http://localhost:3000/uploads/"));
        assert!(stored.url.ends_with(".pdf"));
        assert!(stored.public_id.starts_with("uploads/"));

        let file_name = stored.url.rsplit('/').next().unwrap();
        let written = std::fs::read(dir.path().join("nested").join(file_name)).unwrap();
        assert_eq!(written, b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_store_assigns_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path(), "http://localhost:3000");

        let first = store.store(upload("a.png")).await.unwrap();
        let second = store.store(upload("a.png")).await.unwrap();
        assert_ne!(first.public_id, second.public_id);
    }

    #[tokio::test]
    async fn test_store_rejects_unlisted_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path(), "http://localhost:3000");

        let result = store.store(upload("notes.txt")).await;
        assert_matches!(result, Err(StorageError::UnsupportedFormat(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

//! Uploads Module
//!
//! File upload endpoint and the storage providers behind it.
//!
//! # Module Structure
//!
//! ```text
//! uploads/
//! ├── mod.rs        - Module exports
//! ├── handlers.rs   - POST /api/dashboard
//! ├── storage.rs    - MediaStore trait and format allow-list
//! ├── cloudinary.rs - Cloudinary signed-upload provider
//! └── disk.rs       - Local directory provider
//! ```
//!
//! The provider is chosen once at startup from `MediaConfig`.

/// Upload handler
pub mod handlers;

/// Storage trait and shared types
pub mod storage;

/// Cloudinary provider
pub mod cloudinary;

/// Local disk provider
pub mod disk;

pub use cloudinary::CloudinaryStore;
pub use disk::DiskStore;
pub use handlers::{upload_file, UploadResponse};
pub use storage::{FileUpload, MediaStore, StorageError, StoredFile, ALLOWED_FORMATS};

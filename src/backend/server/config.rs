/**
 * Server Configuration
 *
 * This module loads the process-wide configuration once at startup. The
 * resulting `ServerConfig` is immutable and shared by reference through
 * `AppState`; nothing else in the crate reads the environment.
 *
 * # Configuration Sources
 *
 * Values come from environment variables (a `.env` file is loaded by the
 * binary first). Only `JWT_SECRET` is required; everything else has a
 * development default.
 */

use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::backend::auth::passwords::{MAX_COST, MIN_COST};

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Default allowed browser origin
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default request body limit for uploads (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default folder used by both media providers
pub const DEFAULT_MEDIA_FOLDER: &str = "uploads";

/// Default Cloudinary API endpoint
pub const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";

/// Cloudinary credentials and upload target
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    /// Overridable so tests can point at a mock server
    pub api_base: String,
    pub timeout: Duration,
}

/// Which media provider backs the upload endpoint
#[derive(Debug, Clone)]
pub enum MediaConfig {
    Cloudinary(CloudinaryConfig),
    Disk {
        /// Directory files are written to
        dir: PathBuf,
        /// Base URL the stored files are reachable under
        public_base_url: String,
    },
}

/// Immutable process-wide configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Postgres connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    /// Allowed browser origin, already validated as a header value
    pub cors_origin: HeaderValue,
    /// Whether `/api/dashboard` sits behind the bearer-token gate
    pub require_upload_auth: bool,
    pub max_upload_bytes: usize,
    pub media: MediaConfig,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl ServerConfig {
    /// Create a new builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_any = |keys: &[&str]| keys.iter().find_map(|key| get(*key));

        let mut builder = Self::builder();

        if let Some(port) = get("PORT") {
            builder = builder.port(parse("PORT", &port)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse("BCRYPT_COST", &cost)?);
        }
        if let Some(origin) = get("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }
        if let Some(flag) = get("REQUIRE_UPLOAD_AUTH") {
            builder = builder.require_upload_auth(parse_bool("REQUIRE_UPLOAD_AUTH", &flag)?);
        }
        if let Some(limit) = get("MAX_UPLOAD_BYTES") {
            builder = builder.max_upload_bytes(parse("MAX_UPLOAD_BYTES", &limit)?);
        }

        let folder = get("CLOUDINARY_FOLDER").unwrap_or_else(|| DEFAULT_MEDIA_FOLDER.to_string());
        let cloudinary = (
            get_any(&["CLOUDINARY_CLOUD_NAME", "cloud_name"]),
            get_any(&["CLOUDINARY_API_KEY", "api_key"]),
            get_any(&["CLOUDINARY_API_SECRET", "api_secret"]),
        );

        builder = match cloudinary {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => {
                builder.media(MediaConfig::Cloudinary(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                    folder,
                    api_base: CLOUDINARY_API_BASE.to_string(),
                    timeout: Duration::from_secs(30),
                }))
            }
            (None, None, None) => {
                let dir = get("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_MEDIA_FOLDER.to_string());
                builder.disk_media(dir, get("PUBLIC_BASE_URL"))
            }
            _ => {
                return Err(ConfigError::MissingValue(
                    "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together",
                ))
            }
        };

        builder.build()
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

/// Builder for ServerConfig
#[derive(Debug)]
pub struct ServerConfigBuilder {
    port: u16,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    bcrypt_cost: u32,
    cors_origin: String,
    require_upload_auth: bool,
    max_upload_bytes: usize,
    media: Option<MediaConfig>,
    disk_dir: PathBuf,
    public_base_url: Option<String>,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            jwt_secret: None,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            require_upload_auth: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            media: None,
            disk_dir: PathBuf::from(DEFAULT_MEDIA_FOLDER),
            public_base_url: None,
        }
    }
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }

    pub fn require_upload_auth(mut self, required: bool) -> Self {
        self.require_upload_auth = required;
        self
    }

    pub fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    pub fn media(mut self, media: MediaConfig) -> Self {
        self.media = Some(media);
        self
    }

    /// Store uploads on local disk
    ///
    /// Without a base URL, files are addressed under `http://localhost:{port}`.
    pub fn disk_media(mut self, dir: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        self.media = None;
        self.disk_dir = dir.into();
        self.public_base_url = public_base_url;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }

        let cors_origin =
            HeaderValue::from_str(&self.cors_origin).map_err(|_| ConfigError::InvalidValue {
                name: "CORS_ORIGIN",
                value: self.cors_origin.clone(),
            })?;

        let media = match self.media {
            Some(media) => media,
            None => MediaConfig::Disk {
                dir: self.disk_dir,
                public_base_url: self
                    .public_base_url
                    .unwrap_or_else(|| format!("http://localhost:{}", self.port))
                    .trim_end_matches('/')
                    .to_string(),
            },
        };

        Ok(ServerConfig {
            port: self.port,
            database_url: self.database_url,
            jwt_secret,
            bcrypt_cost: self.bcrypt_cost,
            cors_origin,
            require_upload_auth: self.require_upload_auth,
            max_upload_bytes: self.max_upload_bytes,
            media,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.cors_origin, "http://localhost:5173");
        assert!(config.require_upload_auth);
        assert!(config.database_url.is_none());
        assert_matches!(
            config.media,
            MediaConfig::Disk { ref public_base_url, .. } if public_base_url == "http://localhost:3000"
        );
    }

    #[test]
    fn test_missing_jwt_secret() {
        let result = ServerConfig::from_lookup(lookup(&[("PORT", "8080")]));
        assert_matches!(result, Err(ConfigError::MissingValue("JWT_SECRET")));
    }

    #[test]
    fn test_blank_jwt_secret_is_missing() {
        let result = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "  ")]));
        assert_matches!(result, Err(ConfigError::MissingValue("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("PORT", "http")]));
        assert_matches!(result, Err(ConfigError::InvalidValue { name: "PORT", .. }));
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        let result =
            ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("BCRYPT_COST", "2")]));
        assert_matches!(result, Err(ConfigError::InvalidValue { name: "BCRYPT_COST", .. }));
    }

    #[test]
    fn test_invalid_cors_origin() {
        let result = ServerConfig::builder()
            .jwt_secret("s")
            .cors_origin("http://bad\norigin")
            .build();
        assert_matches!(result, Err(ConfigError::InvalidValue { name: "CORS_ORIGIN", .. }));
    }

    #[test]
    fn test_upload_gate_can_be_disabled() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("REQUIRE_UPLOAD_AUTH", "false"),
        ]))
        .unwrap();
        assert!(!config.require_upload_auth);
    }

    #[test]
    fn test_cloudinary_legacy_names() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("cloud_name", "demo"),
            ("api_key", "123"),
            ("api_secret", "abc"),
        ]))
        .unwrap();
        assert_matches!(
            config.media,
            MediaConfig::Cloudinary(ref c) if c.cloud_name == "demo" && c.folder == "uploads"
        );
    }

    #[test]
    fn test_partial_cloudinary_credentials() {
        let result = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
        ]));
        assert_matches!(result, Err(ConfigError::MissingValue(_)));
    }

    #[test]
    fn test_public_base_url_trailing_slash() {
        let config = ServerConfig::builder()
            .jwt_secret("s")
            .disk_media("/tmp/files", Some("https://files.example.com/".to_string()))
            .build()
            .unwrap();
        assert_matches!(
            config.media,
            MediaConfig::Disk { ref public_base_url, .. } if public_base_url == "https://files.example.com"
        );
    }
}

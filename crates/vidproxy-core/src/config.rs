//! Configuration module
//!
//! Configuration is read once at startup from the environment (and a `.env` file
//! when present). Values that are fixed in this version (URL expiries, the title
//! metadata key) still live on the config so handlers never reach for globals.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BUCKET, DEFAULT_CORS_ORIGIN, LOOKUP_URL_EXPIRY, TITLE_METADATA_KEY, UPLOAD_URL_EXPIRY,
};
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 5000;
const MAX_VIDEO_SIZE_MB: usize = 500;

/// HTTP-facing settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origin: String,
    pub environment: String,
    pub max_video_size_bytes: usize,
}

/// Object storage settings
#[derive(Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub upload_url_expiry: Duration,
    pub lookup_url_expiry: Duration,
    pub title_metadata_key: String,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("backend", &self.backend)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "***"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .field("upload_url_expiry", &self.upload_url_expiry)
            .field("lookup_url_expiry", &self.lookup_url_expiry)
            .field("title_metadata_key", &self.title_metadata_key)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct VideoProxyConfig {
    pub base: BaseConfig,
    pub storage: StorageConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<VideoProxyConfig>);

impl Config {
    fn inner(&self) -> &VideoProxyConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = VideoProxyConfig::from_vars(|name| env::var(name).ok())?;
        Ok(Config(Box::new(config)))
    }

    /// Build configuration from an arbitrary variable source (used by tests).
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config(Box::new(VideoProxyConfig::from_vars(lookup)?)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origin(&self) -> &str {
        &self.inner().base.cors_origin
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.inner().base.max_video_size_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage.backend
    }

    pub fn s3_bucket(&self) -> &str {
        &self.inner().storage.bucket
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().storage.region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().storage.endpoint.as_deref()
    }

    pub fn aws_access_key_id(&self) -> Option<&str> {
        self.inner().storage.access_key_id.as_deref()
    }

    pub fn aws_secret_access_key(&self) -> Option<&str> {
        self.inner().storage.secret_access_key.as_deref()
    }

    pub fn upload_url_expiry(&self) -> Duration {
        self.inner().storage.upload_url_expiry
    }

    pub fn lookup_url_expiry(&self) -> Duration {
        self.inner().storage.lookup_url_expiry
    }

    pub fn title_metadata_key(&self) -> &str {
        &self.inner().storage.title_metadata_key
    }
}

impl VideoProxyConfig {
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        let environment = non_empty("ENVIRONMENT")
            .or_else(|| non_empty("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match non_empty("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let max_video_size_mb = non_empty("MAX_VIDEO_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_VIDEO_SIZE_MB);

        let backend = match non_empty("STORAGE_BACKEND") {
            Some(name) => name.parse()?,
            None => StorageBackend::S3,
        };

        let base = BaseConfig {
            server_port,
            cors_origin: non_empty("CORS_ORIGIN")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            environment,
            max_video_size_bytes: max_video_size_mb * 1024 * 1024,
        };

        let storage = StorageConfig {
            backend,
            bucket: non_empty("S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            region: non_empty("AWS_REGION").or_else(|| non_empty("S3_REGION")),
            endpoint: non_empty("S3_ENDPOINT"),
            access_key_id: non_empty("AWS_ACCESS_KEY_ID"),
            secret_access_key: non_empty("AWS_SECRET_ACCESS_KEY"),
            upload_url_expiry: UPLOAD_URL_EXPIRY,
            lookup_url_expiry: LOOKUP_URL_EXPIRY,
            title_metadata_key: TITLE_METADATA_KEY.to_string(),
        };

        let config = VideoProxyConfig { base, storage };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.cors_origin == "*" || self.base.cors_origin.contains(',') {
            return Err(anyhow::anyhow!(
                "CORS_ORIGIN must name exactly one origin (got '{}')",
                self.base.cors_origin
            ));
        }

        if self.base.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than 0"));
        }

        if self.storage.backend == StorageBackend::S3 {
            if self.storage.access_key_id.is_none() || self.storage.secret_access_key.is_none() {
                return Err(anyhow::anyhow!(
                    "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set when using S3 storage backend"
                ));
            }
            if self.storage.region.is_none() {
                return Err(anyhow::anyhow!(
                    "AWS_REGION must be set when using S3 storage backend"
                ));
            }
        }

        Ok(())
    }
}

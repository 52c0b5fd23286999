use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub scores: ScoresConfig,

    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    S3,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Bucket holding the images (overridden by `BUCKET_NAME`)
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// AWS region; falls back to the SDK's default provider chain
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services (MinIO, LocalStack)
    #[serde(default)]
    pub endpoint_url: Option<String>,

    #[serde(default)]
    pub force_path_style: bool,

    /// Lifetime of presigned image URLs in seconds (default: 3600)
    #[serde(default = "default_presign_expiry")]
    pub presign_expiry_secs: u64,

    /// Object keys served by the in-memory backend
    #[serde(default)]
    pub memory_keys: Vec<String>,

    /// Base URL the in-memory backend builds image links from
    #[serde(default = "default_memory_base_url")]
    pub memory_base_url: String,
}

fn default_bucket() -> String {
    "my-image-ranking-bucket".to_string()
}

fn default_presign_expiry() -> u64 {
    3600
}

fn default_memory_base_url() -> String {
    "/static/images".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            region: None,
            endpoint_url: None,
            force_path_style: false,
            presign_expiry_secs: default_presign_expiry(),
            memory_keys: Vec::new(),
            memory_base_url: default_memory_base_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoresBackend {
    #[default]
    DynamoDb,
    Memory,
}

/// How a vote is written back to the score store.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Single atomic counter update; concurrent votes are never lost.
    #[default]
    Atomic,
    /// Read the score, then overwrite it; concurrent votes may be lost.
    ReadModifyWrite,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoresConfig {
    #[serde(default)]
    pub backend: ScoresBackend,

    /// Table holding score records (overridden by `DYNAMODB_TABLE`)
    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_key_attribute")]
    pub key_attribute: String,

    #[serde(default = "default_score_attribute")]
    pub score_attribute: String,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub endpoint_url: Option<String>,

    #[serde(default)]
    pub update_mode: UpdateMode,
}

fn default_table() -> String {
    "image_rankings".to_string()
}

fn default_key_attribute() -> String {
    "image_id".to_string()
}

fn default_score_attribute() -> String {
    "score".to_string()
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            backend: ScoresBackend::default(),
            table: default_table(),
            key_attribute: default_key_attribute(),
            score_attribute: default_score_attribute(),
            region: None,
            endpoint_url: None,
            update_mode: UpdateMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingConfig {
    /// Keys requested per storage page
    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Stop after this many pages (default: follow every page)
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Score lookups in flight per listing
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_page_size() -> i32 {
    1000
}

fn default_concurrency() -> usize {
    8
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: None,
            concurrency: default_concurrency(),
        }
    }
}

mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// S3 refuses presigned URLs that live longer than seven days.
const MAX_PRESIGN_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config)?;
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./imagerank.toml",
        "~/.config/imagerank/config.toml",
        "/etc/imagerank/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides on top of file settings
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(bucket) = env_var("BUCKET_NAME") {
        config.storage.bucket = bucket;
    }
    if let Some(table) = env_var("DYNAMODB_TABLE") {
        config.scores.table = table;
    }
    if let Some(host) = env_var("IMAGERANK_HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_var("IMAGERANK_PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid IMAGERANK_PORT value: {port}"))?;
    }
    Ok(())
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            tracing::debug!("{key} set, overriding config");
            Some(value)
        }
        _ => None,
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.storage.backend == StorageBackend::S3 && config.storage.bucket.trim().is_empty() {
        anyhow::bail!("S3 storage requires a bucket name");
    }

    if config.storage.presign_expiry_secs == 0 {
        anyhow::bail!("presign_expiry_secs must be greater than 0");
    }
    if config.storage.presign_expiry_secs > MAX_PRESIGN_EXPIRY_SECS {
        anyhow::bail!(
            "presign_expiry_secs cannot exceed {} (7 days)",
            MAX_PRESIGN_EXPIRY_SECS
        );
    }

    if config.storage.backend == StorageBackend::Memory && config.storage.memory_keys.is_empty() {
        tracing::warn!("In-memory storage has no keys configured; listing will be empty");
    }

    if config.scores.backend == ScoresBackend::DynamoDb {
        if config.scores.table.trim().is_empty() {
            anyhow::bail!("DynamoDB scores require a table name");
        }
        if config.scores.key_attribute.is_empty() || config.scores.score_attribute.is_empty() {
            anyhow::bail!("DynamoDB attribute names cannot be empty");
        }
    }

    if config.listing.page_size <= 0 {
        anyhow::bail!("listing.page_size must be greater than 0");
    }
    if config.listing.max_pages == Some(0) {
        anyhow::bail!("listing.max_pages must be greater than 0 when set");
    }
    if config.listing.concurrency == 0 {
        anyhow::bail!("listing.concurrency must be greater than 0");
    }

    Ok(())
}

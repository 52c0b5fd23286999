//! Shared AWS SDK configuration loading.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Resolve SDK configuration from the default provider chain, with optional
/// region and endpoint overrides from the config file.
///
/// Credentials always come from the provider chain (environment, profile,
/// instance metadata); they are never read from the config file.
pub async fn load_sdk_config(region: Option<&str>, endpoint_url: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    if let Some(endpoint) = endpoint_url {
        tracing::debug!("Using custom AWS endpoint {}", endpoint);
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

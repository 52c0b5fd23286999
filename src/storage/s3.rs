//! S3-backed image store.
//!
//! Keys come from `ListObjectsV2`, one page per call; URLs are presigned
//! `GetObject` requests, so generating them never touches the network.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use imagerank_common::{Error, ObjectPage, Result};

use super::ImageStore;
use crate::aws::load_sdk_config;
use crate::config::StorageConfig;

/// Image store reading from a single S3 bucket.
#[derive(Clone)]
pub struct S3ImageStore {
    client: Client,
    bucket: String,
    page_size: i32,
}

impl S3ImageStore {
    pub fn new(client: Client, bucket: impl Into<String>, page_size: i32) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            page_size,
        }
    }

    /// Build a client from the default AWS provider chain plus the
    /// overrides in `storage`.
    pub async fn from_config(storage: &StorageConfig, page_size: i32) -> Self {
        let sdk_config =
            load_sdk_config(storage.region.as_deref(), storage.endpoint_url.as_deref()).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(storage.force_path_style)
            .build();

        Self::new(Client::from_conf(s3_config), &storage.bucket, page_size)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn list_page(&self, continuation: Option<String>) -> Result<ObjectPage> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(self.page_size)
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(|e| Error::object_store(aws_sdk_s3::Error::from(e)))?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key())
            .map(str::to_string)
            .collect();

        let next_continuation = if output.is_truncated().unwrap_or(false) {
            output.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ObjectPage {
            keys,
            next_continuation,
        })
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(Error::object_store)?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| Error::object_store(aws_sdk_s3::Error::from(e)))?;

        Ok(request.uri().to_string())
    }
}

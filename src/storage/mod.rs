//! Object storage access for the images being ranked.
//!
//! The voting service only needs two things from storage: the object keys, a
//! page at a time, and a time-limited URL for each object. [`ImageStore`]
//! captures exactly that so the S3 client can be swapped for an in-memory
//! store in tests and local runs.

mod memory;
mod s3;

pub use memory::MemoryImageStore;
pub use s3::S3ImageStore;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use imagerank_common::{Error, ObjectPage, Result};

use crate::config::{Config, StorageBackend};

/// Read access to the bucket of images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Short identifier for logs (e.g. `"s3"`).
    fn name(&self) -> &'static str;

    /// Fetch one page of object keys.
    ///
    /// `continuation` is `None` for the first page and otherwise the
    /// `next_continuation` of the previous page.
    async fn list_page(&self, continuation: Option<String>) -> Result<ObjectPage>;

    /// Produce a URL granting read access to `key` for `expires_in`.
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String>;
}

/// Lazily walk the pages of `store`, following continuation tokens.
///
/// Starts at `start` (or the first page when `None`) and ends after the last
/// page or once `max_pages` pages have been yielded. Nothing is fetched until
/// the stream is polled.
pub fn object_pages(
    store: Arc<dyn ImageStore>,
    start: Option<String>,
    max_pages: Option<usize>,
) -> BoxStream<'static, Result<ObjectPage>> {
    enum Cursor {
        At(Option<String>),
        Exhausted,
    }

    stream::try_unfold((Cursor::At(start), 0usize), move |(cursor, fetched)| {
        let store = store.clone();
        async move {
            let Cursor::At(token) = cursor else {
                return Ok::<_, Error>(None);
            };
            if max_pages.is_some_and(|max| fetched >= max) {
                return Ok(None);
            }

            let page = store.list_page(token).await?;
            tracing::trace!(
                store = store.name(),
                page = fetched,
                keys = page.keys.len(),
                "Fetched object page"
            );

            let next = match &page.next_continuation {
                Some(token) => Cursor::At(Some(token.clone())),
                None => Cursor::Exhausted,
            };
            Ok(Some((page, (next, fetched + 1))))
        }
    })
    .boxed()
}

/// Build the image store selected by `config.storage.backend`.
pub async fn build_image_store(config: &Config) -> Arc<dyn ImageStore> {
    match config.storage.backend {
        StorageBackend::S3 => {
            tracing::info!("Using S3 bucket {}", config.storage.bucket);
            Arc::new(S3ImageStore::from_config(&config.storage, config.listing.page_size).await)
        }
        StorageBackend::Memory => {
            tracing::info!(
                "Using in-memory image store with {} keys",
                config.storage.memory_keys.len()
            );
            Arc::new(
                MemoryImageStore::new(config.storage.memory_keys.clone())
                    .with_page_size(config.listing.page_size.max(1) as usize)
                    .with_base_url(config.storage.memory_base_url.clone()),
            )
        }
    }
}

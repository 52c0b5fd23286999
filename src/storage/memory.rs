use std::time::Duration;

use async_trait::async_trait;
use imagerank_common::{Error, ObjectPage, Result};
use parking_lot::RwLock;

use super::ImageStore;

const DEFAULT_PAGE_SIZE: usize = 1000;

/// Image store holding its keys in memory.
///
/// Continuation tokens are the index of the first key on the next page, so a
/// walk can be resumed from any token this store handed out. URLs point at
/// `{base_url}/{key}` and carry the requested expiry as a query parameter.
pub struct MemoryImageStore {
    keys: RwLock<Vec<String>>,
    page_size: usize,
    base_url: String,
}

impl MemoryImageStore {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys: RwLock::new(keys),
            page_size: DEFAULT_PAGE_SIZE,
            base_url: "/static/images".to_string(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Append a key, as if an object had been uploaded.
    pub fn insert(&self, key: impl Into<String>) {
        self.keys.write().push(key.into());
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_page(&self, continuation: Option<String>) -> Result<ObjectPage> {
        let start = match continuation {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| Error::object_store(format!("invalid continuation token: {token}")))?,
            None => 0,
        };

        let keys = self.keys.read();
        let start = start.min(keys.len());
        let end = (start + self.page_size).min(keys.len());

        Ok(ObjectPage {
            keys: keys[start..end].to_vec(),
            next_continuation: (end < keys.len()).then(|| end.to_string()),
        })
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        Ok(format!(
            "{}/{}?expires={}",
            self.base_url.trim_end_matches('/'),
            key,
            expires_in.as_secs()
        ))
    }
}

//! The voting service: list images with their scores, and record votes.
//!
//! Both operations are thin compositions over an [`ImageStore`] and a
//! [`ScoreStore`], which are handed in at construction time.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use imagerank_common::{Error, ImageEntry, Result, VoteDirection};

use crate::config::{Config, UpdateMode};
use crate::scores::{build_score_store, ScoreStore};
use crate::storage::{build_image_store, object_pages, ImageStore};

/// Tunables for [`VotingService`].
#[derive(Debug, Clone)]
pub struct VotingSettings {
    /// Lifetime of the access URLs in a listing.
    pub presign_expiry: Duration,
    /// How votes are written back.
    pub update_mode: UpdateMode,
    /// Stop listing after this many storage pages.
    pub max_pages: Option<usize>,
    /// Score lookups in flight per listing.
    pub concurrency: usize,
}

impl Default for VotingSettings {
    fn default() -> Self {
        Self {
            presign_expiry: Duration::from_secs(3600),
            update_mode: UpdateMode::Atomic,
            max_pages: None,
            concurrency: 8,
        }
    }
}

impl From<&Config> for VotingSettings {
    fn from(config: &Config) -> Self {
        Self {
            presign_expiry: Duration::from_secs(config.storage.presign_expiry_secs),
            update_mode: config.scores.update_mode,
            max_pages: config.listing.max_pages,
            concurrency: config.listing.concurrency.max(1),
        }
    }
}

pub struct VotingService {
    images: Arc<dyn ImageStore>,
    scores: Arc<dyn ScoreStore>,
    settings: VotingSettings,
}

impl VotingService {
    pub fn new(
        images: Arc<dyn ImageStore>,
        scores: Arc<dyn ScoreStore>,
        settings: VotingSettings,
    ) -> Self {
        Self {
            images,
            scores,
            settings,
        }
    }

    /// Construct the stores named in `config` and wire them into a service.
    pub async fn from_config(config: &Config) -> Self {
        let images = build_image_store(config).await;
        let scores = build_score_store(config).await;
        Self::new(images, scores, VotingSettings::from(config))
    }

    /// List every image with its access URL and current score.
    ///
    /// Entries come back in storage enumeration order. Score lookups and URL
    /// signing for different keys overlap, up to `settings.concurrency`.
    pub async fn list(&self) -> Result<Vec<ImageEntry>> {
        let entries: Vec<ImageEntry> =
            object_pages(self.images.clone(), None, self.settings.max_pages)
                .map_ok(|page| stream::iter(page.keys).map(Ok::<_, Error>))
                .try_flatten()
                .map_ok(|key| self.entry_for(key))
                .try_buffered(self.settings.concurrency)
                .try_collect()
                .await?;

        tracing::debug!(
            images = self.images.name(),
            scores = self.scores.name(),
            count = entries.len(),
            "Listed images"
        );
        Ok(entries)
    }

    /// Current score for `key`, 0 when no record exists.
    pub async fn score(&self, key: &str) -> Result<i64> {
        Ok(self.scores.get(key).await?.unwrap_or(0))
    }

    /// Apply one vote to `key` and return the new score.
    ///
    /// The key is not checked against storage; voting on a key with no image
    /// creates a score record for it anyway.
    pub async fn vote(&self, key: &str, direction: VoteDirection) -> Result<i64> {
        if key.is_empty() {
            return Err(Error::validation("image_key is required"));
        }

        let delta = direction.delta();
        let score = match self.settings.update_mode {
            UpdateMode::Atomic => self.scores.add(key, delta).await?,
            UpdateMode::ReadModifyWrite => {
                let current = self.score(key).await?;
                let next = current
                    .checked_add(delta)
                    .ok_or_else(|| Error::invalid_record(key, "score overflow"))?;
                self.scores.put(key, next).await?;
                next
            }
        };

        tracing::info!(image_key = key, %direction, score, "Vote recorded");
        Ok(score)
    }

    async fn entry_for(&self, key: String) -> Result<ImageEntry> {
        let (score, url) = tokio::try_join!(
            self.score(&key),
            self.images.presigned_url(&key, self.settings.presign_expiry)
        )?;

        Ok(ImageEntry { key, url, score })
    }
}

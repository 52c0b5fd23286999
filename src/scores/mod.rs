//! Score records in the key-value store.
//!
//! One record per image key holding an integer score. A missing record means
//! a score of 0; records are created by the first vote and never deleted.

mod dynamo;
mod memory;

pub use dynamo::DynamoScoreStore;
pub use memory::MemoryScoreStore;

use std::sync::Arc;

use async_trait::async_trait;
use imagerank_common::Result;

use crate::config::{Config, ScoresBackend};

/// Read/write access to score records.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Short identifier for logs (e.g. `"dynamodb"`).
    fn name(&self) -> &'static str;

    /// Current score for `key`, `None` when no record exists.
    async fn get(&self, key: &str) -> Result<Option<i64>>;

    /// Overwrite the record for `key` unconditionally.
    async fn put(&self, key: &str, score: i64) -> Result<()>;

    /// Atomically add `delta` to the score for `key`, creating the record at
    /// 0 first if needed. Returns the updated score.
    async fn add(&self, key: &str, delta: i64) -> Result<i64>;
}

/// Build the score store selected by `config.scores.backend`.
pub async fn build_score_store(config: &Config) -> Arc<dyn ScoreStore> {
    match config.scores.backend {
        ScoresBackend::DynamoDb => {
            tracing::info!("Using DynamoDB table {}", config.scores.table);
            Arc::new(DynamoScoreStore::from_config(&config.scores).await)
        }
        ScoresBackend::Memory => {
            tracing::info!("Using in-memory score store");
            Arc::new(MemoryScoreStore::new())
        }
    }
}

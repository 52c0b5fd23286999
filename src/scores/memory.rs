use async_trait::async_trait;
use dashmap::DashMap;
use imagerank_common::{Error, Result};

use super::ScoreStore;

/// Score store backed by a concurrent map.
///
/// `add` runs under the map's per-shard lock, so concurrent votes on the same
/// key are all counted.
#[derive(Default)]
pub struct MemoryScoreStore {
    scores: DashMap<String, i64>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_scores<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        Self {
            scores: records.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Number of score records held.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.scores.get(key).map(|score| *score))
    }

    async fn put(&self, key: &str, score: i64) -> Result<()> {
        self.scores.insert(key.to_string(), score);
        Ok(())
    }

    async fn add(&self, key: &str, delta: i64) -> Result<i64> {
        let mut entry = self.scores.entry(key.to_string()).or_insert(0);
        let updated = entry
            .checked_add(delta)
            .ok_or_else(|| Error::invalid_record(key, "score overflow"))?;
        *entry = updated;
        Ok(updated)
    }
}

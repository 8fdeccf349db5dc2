//! In-memory implementation of the topic registry.
//!
//! # Purpose
//! Implements `TopicStore` with a `HashMap` guarded by `tokio::sync::RwLock`.
//! It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//! - as the working set of the file-backed store
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - Mutations hold the write lock across lookup and insert, so concurrent
//!   creates for one key observe a single winner and concurrent updates never
//!   lose each other's writes.
//! - Reads take the read lock and may proceed concurrently.
use super::{StoreError, StoreResult, TopicStore};
use crate::model::TopicConfig;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Whether an upsert created a new record or merged onto an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upsert {
    Created,
    Merged,
}

/// Authoritative topic records keyed by derived key.
///
/// Holds the record-level rules shared by every backend; callers provide the
/// locking.
#[derive(Debug, Default)]
pub(crate) struct TopicTable {
    topics: HashMap<String, TopicConfig>,
}

impl TopicTable {
    pub(crate) fn from_records(records: Vec<TopicConfig>) -> Self {
        let topics = records
            .into_iter()
            .map(|record| (record.key.clone(), record))
            .collect();
        Self { topics }
    }

    pub(crate) fn len(&self) -> usize {
        self.topics.len()
    }

    pub(crate) fn create(&mut self, mut cfg: TopicConfig) -> StoreResult<String> {
        let key = cfg.derive_key()?;
        if self.topics.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        cfg.topic_full_name = cfg.topic_full_name.trim().to_string();
        cfg.cluster_url = cfg.cluster_url.trim().to_string();
        cfg.key = key.clone();
        cfg.created_at = Utc::now();
        cfg.updated_at = cfg.created_at;
        self.topics.insert(key.clone(), cfg);
        Ok(key)
    }

    pub(crate) fn upsert(&mut self, cfg: TopicConfig) -> StoreResult<(String, Upsert)> {
        let key = cfg.derive_key()?;
        let Some(existing) = self.topics.get_mut(&key) else {
            return self.create(cfg).map(|key| (key, Upsert::Created));
        };
        existing.merge_mutable(cfg);
        existing.updated_at = next_update_time(existing.updated_at);
        Ok((key, Upsert::Merged))
    }

    pub(crate) fn get(&self, key: &str) -> StoreResult<TopicConfig> {
        self.topics
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    pub(crate) fn remove(&mut self, key: &str) -> StoreResult<String> {
        self.topics
            .remove(key)
            .map(|_| key.to_string())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    pub(crate) fn records(&self) -> Vec<TopicConfig> {
        self.topics.values().cloned().collect()
    }
}

/// Refreshed `updated_at` that is strictly later than the previous value even
/// when the wall clock has not advanced.
fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

pub(crate) fn record_change(op: &'static str, total: usize) {
    metrics::counter!("relay_topic_changes_total", "op" => op).increment(1);
    metrics::gauge!("relay_topics_total").set(total as f64);
}

/// In-memory topic registry.
///
/// Cloning shares the underlying table, so one instance can back several
/// handlers in the same process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    table: Arc<RwLock<TopicTable>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicStore for InMemoryStore {
    async fn init(&self) -> StoreResult<()> {
        tracing::debug!(backend = self.backend_name(), "topic store initialized");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn sync(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create(&self, cfg: TopicConfig) -> StoreResult<String> {
        let mut table = self.table.write().await;
        let key = table.create(cfg)?;
        record_change("created", table.len());
        Ok(key)
    }

    async fn get_by_key(&self, key: &str) -> StoreResult<TopicConfig> {
        self.table.read().await.get(key)
    }

    async fn update(&self, cfg: TopicConfig) -> StoreResult<String> {
        let mut table = self.table.write().await;
        let (key, outcome) = table.upsert(cfg)?;
        match outcome {
            Upsert::Created => record_change("created", table.len()),
            Upsert::Merged => {
                tracing::info!(%key, "upsert merged topic config");
                record_change("updated", table.len());
            }
        }
        Ok(key)
    }

    async fn delete_by_key(&self, key: &str) -> StoreResult<String> {
        let mut table = self.table.write().await;
        let removed = table.remove(key)?;
        record_change("deleted", table.len());
        Ok(removed)
    }

    async fn load(&self) -> StoreResult<Vec<TopicConfig>> {
        Ok(self.table.read().await.records())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

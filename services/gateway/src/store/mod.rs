//! Topic registry storage.
//!
//! # Purpose
//! Defines the `TopicStore` contract every backend implements and the typed
//! error taxonomy the handler layer maps to caller-facing results.
//!
//! # Key invariants
//! - Keys come from [`derive_key`]; no backend invents its own.
//! - `create` never overwrites; `update` creates on miss and merges on hit.
//! - Backends never retry internally; every failure reaches the caller typed.
use crate::model::{IdentifierError, TopicConfig, derive_key};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

pub mod file;
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("topic already exists: {0}")]
    AlreadyExists(String),
    #[error("topic not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TopicStore: Send + Sync {
    /// Acquire backend resources. Must run once before other operations.
    async fn init(&self) -> StoreResult<()>;
    async fn health_check(&self) -> bool;
    /// Force a consistency checkpoint. A no-op for purely in-memory backends.
    async fn sync(&self) -> StoreResult<()>;
    async fn close(&self) -> StoreResult<()>;

    async fn create(&self, cfg: TopicConfig) -> StoreResult<String>;
    async fn get_by_key(&self, key: &str) -> StoreResult<TopicConfig>;
    async fn update(&self, cfg: TopicConfig) -> StoreResult<String>;
    async fn delete_by_key(&self, key: &str) -> StoreResult<String>;
    async fn load(&self) -> StoreResult<Vec<TopicConfig>>;

    async fn get_by_topic(
        &self,
        topic_full_name: &str,
        cluster_url: &str,
    ) -> StoreResult<TopicConfig> {
        let key = derive_key(topic_full_name, cluster_url)?;
        self.get_by_key(&key).await
    }

    async fn delete(&self, topic_full_name: &str, cluster_url: &str) -> StoreResult<String> {
        let key = derive_key(topic_full_name, cluster_url)?;
        self.delete_by_key(&key).await
    }

    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

pub const MIN_SYNC_INTERVAL: Duration = Duration::from_millis(1);

/// Run `sync` on `store` every `interval` until the task is aborted.
///
/// Failures are logged and retried on the next tick. Intervals below
/// [`MIN_SYNC_INTERVAL`] are raised to it.
pub fn spawn_syncer(store: Arc<dyn TopicStore>, interval: Duration) -> JoinHandle<()> {
    let interval = interval.max(MIN_SYNC_INTERVAL);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(err) = store.sync().await {
                tracing::warn!(backend = store.backend_name(), error = %err, "store sync failed");
                metrics::counter!("relay_store_sync_failures_total").increment(1);
            }
        }
    })
}

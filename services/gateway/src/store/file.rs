//! File-backed topic registry.
//!
//! # Purpose
//! Keeps the working set in memory exactly like [`InMemoryStore`] and
//! checkpoints it to a JSON snapshot on `sync` and `close`. It is the durable
//! backend for single-instance deployments.
//!
//! # Durability and consistency
//! - Changes made after the last `sync` are lost if the process dies; the
//!   service runs a periodic syncer to bound that window.
//! - Snapshots are written to a sibling temp file and renamed over the target,
//!   so a crash mid-write leaves the previous snapshot intact.
//! - `init` refuses snapshots whose stored keys disagree with the key derived
//!   from the record identifiers.
//!
//! [`InMemoryStore`]: super::memory::InMemoryStore
use super::memory::{TopicTable, Upsert, record_change};
use super::{StoreResult, TopicStore};
use crate::model::TopicConfig;
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    topics: Vec<TopicConfig>,
}

pub struct FileStore {
    path: PathBuf,
    table: Arc<RwLock<TopicTable>>,
    dirty: AtomicBool,
    initialized: AtomicBool,
    // Serializes snapshot writers; they share one temp path.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: Arc::new(RwLock::new(TopicTable::default())),
            dirty: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_snapshot(&self) -> anyhow::Result<Vec<TopicConfig>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read topic snapshot {}", self.path.display()));
            }
        };
        let snapshot: Snapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse topic snapshot {}", self.path.display()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            anyhow::bail!("unsupported topic snapshot version {}", snapshot.version);
        }
        for record in &snapshot.topics {
            let derived = record
                .derive_key()
                .with_context(|| format!("snapshot record {} has invalid identifiers", record.key))?;
            if derived != record.key {
                anyhow::bail!("snapshot record key {} does not match its identifiers", record.key);
            }
        }
        Ok(snapshot.topics)
    }

    async fn write_snapshot(&self) -> anyhow::Result<()> {
        let _writer = self.write_lock.lock().await;
        let bytes = {
            let table = self.table.read().await;
            let snapshot = Snapshot {
                version: SNAPSHOT_VERSION,
                topics: table.records(),
            };
            serde_json::to_vec_pretty(&snapshot).context("serialize topic snapshot")?
        };
        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .with_context(|| format!("write topic snapshot {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("replace topic snapshot {}", self.path.display()))?;
        Ok(())
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }
}

#[async_trait]
impl TopicStore for FileStore {
    async fn init(&self) -> StoreResult<()> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        if let Some(parent) = self.parent_dir() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create store directory {}", parent.display()))?;
        }
        let records = self.read_snapshot().await?;
        let count = records.len();
        let mut table = self.table.write().await;
        *table = TopicTable::from_records(records);
        metrics::gauge!("relay_topics_total").set(table.len() as f64);
        drop(table);
        self.initialized.store(true, Ordering::Release);
        tracing::info!(path = %self.path.display(), topics = count, "topic store loaded");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        if !self.initialized.load(Ordering::Acquire) {
            return false;
        }
        match self.parent_dir() {
            Some(parent) => tokio::fs::metadata(parent)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false),
            None => true,
        }
    }

    async fn sync(&self) -> StoreResult<()> {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        if let Err(err) = self.write_snapshot().await {
            self.mark_dirty();
            tracing::error!(error = ?err, "topic snapshot sync failed");
            return Err(err.into());
        }
        tracing::debug!(path = %self.path.display(), "topic snapshot synced");
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        self.sync().await
    }

    async fn create(&self, cfg: TopicConfig) -> StoreResult<String> {
        let mut table = self.table.write().await;
        let key = table.create(cfg)?;
        self.mark_dirty();
        record_change("created", table.len());
        Ok(key)
    }

    async fn get_by_key(&self, key: &str) -> StoreResult<TopicConfig> {
        self.table.read().await.get(key)
    }

    async fn update(&self, cfg: TopicConfig) -> StoreResult<String> {
        let mut table = self.table.write().await;
        let (key, outcome) = table.upsert(cfg)?;
        self.mark_dirty();
        let op = match outcome {
            Upsert::Created => "created",
            Upsert::Merged => "updated",
        };
        record_change(op, table.len());
        Ok(key)
    }

    async fn delete_by_key(&self, key: &str) -> StoreResult<String> {
        let mut table = self.table.write().await;
        let removed = table.remove(key)?;
        self.mark_dirty();
        record_change("deleted", table.len());
        Ok(removed)
    }

    async fn load(&self) -> StoreResult<Vec<TopicConfig>> {
        Ok(self.table.read().await.records())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

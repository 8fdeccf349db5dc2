//! Relay gateway service library crate.
//!
//! # Purpose
//! Exposes the topic registry, the relay handler, the HTTP API surface and
//! configuration for use by the binary and tests.
//!
//! # Notes
//! Module boundaries mirror the layers of a request: `api` adapts HTTP onto
//! `relay`, which authorizes through `relay_authz` and persists via `store`.
pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod observability;
pub mod relay;
pub mod store;

use crate::app::AppState;
use crate::config::{GatewayConfig, StorageBackend};
use crate::relay::{AllowList, JwtTokenIssuer, LogTransport, RelayHandler};
use crate::store::TopicStore;
use crate::store::file::FileStore;
use crate::store::memory::InMemoryStore;
use anyhow::Context;
use relay_authz::AuthorizationEngine;
use std::sync::Arc;

pub const API_VERSION: &str = "v2";

/// Build the shared application state from configuration.
///
/// The store is initialized before it is handed to the handler.
pub async fn build_state(config: &GatewayConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn TopicStore> = match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::new(config.store_path.clone())),
    };
    store
        .init()
        .await
        .with_context(|| format!("initialize {} topic store", store.backend_name()))?;

    let authz = AuthorizationEngine::new(config.super_roles.iter().map(String::as_str));
    let mut handler = RelayHandler::new(
        store,
        Arc::new(authz),
        Arc::new(LogTransport),
        AllowList::new(config.allowed_endpoints.iter().cloned()),
    );
    match config.token_secret.as_deref() {
        Some(secret) => {
            let issuer = JwtTokenIssuer::new(secret.as_bytes(), config.token_ttl)
                .with_context(|| "build token issuer")?;
            handler = handler.with_token_issuer(Arc::new(issuer));
        }
        None => tracing::warn!("no token secret configured; token issuance disabled"),
    }

    Ok(AppState {
        handler,
        api_version: API_VERSION.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config(storage: StorageBackend, store_path: PathBuf) -> GatewayConfig {
        GatewayConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            metrics_bind: "127.0.0.1:0".parse().expect("metrics"),
            storage,
            store_path,
            sync_interval: Duration::from_millis(50),
            super_roles: vec!["superuser".to_string()],
            allowed_endpoints: Vec::new(),
            token_secret: Some("secret".to_string()),
            token_ttl: None,
        }
    }

    #[tokio::test]
    async fn build_state_memory_backend() {
        let state = build_state(&config(StorageBackend::Memory, PathBuf::new()))
            .await
            .expect("state");
        assert_eq!(state.api_version, "v2");
        assert_eq!(state.handler.store().backend_name(), "memory");
        assert!(!state.handler.store().is_durable());
        assert!(state.handler.authz().is_superuser("superuser"));
    }

    #[tokio::test]
    async fn build_state_file_backend_initializes_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("topics.json");
        let state = build_state(&config(StorageBackend::File, path))
            .await
            .expect("state");
        assert!(state.handler.store().is_durable());
        assert!(state.handler.store().health_check().await);
    }

    #[tokio::test]
    async fn build_state_rejects_corrupt_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("topics.json");
        std::fs::write(&path, b"not json").expect("write");
        let err = build_state(&config(StorageBackend::File, path))
            .await
            .expect_err("corrupt snapshot");
        assert!(err.to_string().contains("initialize file topic store"));
    }
}

//! Gateway configuration.
//!
//! Values come from `RELAY_*` environment variables with defaults, then an
//! optional YAML file named by `RELAY_CONFIG` overrides individual keys.
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => bail!("unknown storage backend: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub storage: StorageBackend,
    pub store_path: PathBuf,
    pub sync_interval: Duration,
    pub super_roles: Vec<String>,
    pub allowed_endpoints: Vec<String>,
    pub token_secret: Option<String>,
    pub token_ttl: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
struct GatewayConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    storage: Option<String>,
    store_path: Option<PathBuf>,
    sync_interval_ms: Option<u64>,
    super_roles: Option<Vec<String>>,
    allowed_endpoints: Option<Vec<String>>,
    token_secret: Option<String>,
    token_ttl_secs: Option<u64>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("RELAY_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8085".to_string())
            .parse()
            .with_context(|| "parse RELAY_BIND")?;
        let metrics_bind = std::env::var("RELAY_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9085".to_string())
            .parse()
            .with_context(|| "parse RELAY_METRICS_BIND")?;
        let storage = StorageBackend::parse(
            &std::env::var("RELAY_STORAGE").unwrap_or_else(|_| "memory".to_string()),
        )
        .with_context(|| "parse RELAY_STORAGE")?;
        let store_path = std::env::var("RELAY_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/topics.json"));
        let sync_interval_ms: u64 = std::env::var("RELAY_SYNC_INTERVAL_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .with_context(|| "parse RELAY_SYNC_INTERVAL_MS")?;
        if sync_interval_ms == 0 {
            bail!("RELAY_SYNC_INTERVAL_MS must be > 0");
        }
        let super_roles = split_csv(
            &std::env::var("RELAY_SUPER_ROLES").unwrap_or_else(|_| "superuser".to_string()),
        );
        let allowed_endpoints =
            split_csv(&std::env::var("RELAY_ALLOWED_ENDPOINTS").unwrap_or_default());
        let token_secret = std::env::var("RELAY_TOKEN_SECRET")
            .ok()
            .filter(|value| !value.is_empty());
        let token_ttl = match std::env::var("RELAY_TOKEN_TTL_SECS") {
            Ok(value) => Some(Duration::from_secs(
                value.parse().with_context(|| "parse RELAY_TOKEN_TTL_SECS")?,
            )),
            Err(_) => None,
        };
        Ok(Self {
            bind_addr,
            metrics_bind,
            storage,
            store_path,
            sync_interval: Duration::from_millis(sync_interval_ms),
            super_roles,
            allowed_endpoints,
            token_secret,
            token_ttl,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("RELAY_CONFIG") {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read RELAY_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: GatewayConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse gateway config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        if let Some(value) = override_cfg.storage {
            self.storage = StorageBackend::parse(&value).with_context(|| "parse storage")?;
        }
        if let Some(value) = override_cfg.store_path {
            self.store_path = value;
        }
        if let Some(value) = override_cfg.sync_interval_ms {
            if value == 0 {
                bail!("sync_interval_ms must be > 0");
            }
            self.sync_interval = Duration::from_millis(value);
        }
        if let Some(value) = override_cfg.super_roles {
            self.super_roles = value;
        }
        if let Some(value) = override_cfg.allowed_endpoints {
            self.allowed_endpoints = value;
        }
        if let Some(value) = override_cfg.token_secret {
            self.token_secret = Some(value).filter(|secret| !secret.is_empty());
        }
        if let Some(value) = override_cfg.token_ttl_secs {
            self.token_ttl = Some(Duration::from_secs(value));
        }
        Ok(())
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

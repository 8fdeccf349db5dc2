//! Topic configuration records and webhook descriptors.
//!
//! # Purpose
//! Defines the managed entity of the registry and the request shapes used to
//! address existing records.
use crate::model::key::{IdentifierError, derive_key};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TopicStatus {
    #[default]
    Activated,
    Deactivated,
    Suspended,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionType {
    #[default]
    Exclusive,
    Shared,
    Failover,
    KeyShared,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InitialPosition {
    #[default]
    Latest,
    Earliest,
}

/// Destination descriptor attached to a topic. Stored only; never invoked here.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: String,
    /// Extra request headers as `Name: value` lines.
    pub headers: Vec<String>,
    pub subscription: String,
    pub subscription_type: SubscriptionType,
    pub initial_position: InitialPosition,
    pub webhook_status: TopicStatus,
}

impl WebhookConfig {
    fn validate(&self) -> Result<(), IdentifierError> {
        let host = self
            .url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .ok_or_else(|| IdentifierError::InvalidWebhook(self.url.clone()))?;
        if host.is_empty() || host.starts_with('/') {
            return Err(IdentifierError::InvalidWebhook(self.url.clone()));
        }
        if let Some(header) = self.headers.iter().find(|line| !line.contains(':')) {
            return Err(IdentifierError::InvalidWebhook(format!(
                "header without ':' separator: {header}"
            )));
        }
        Ok(())
    }
}

/// Per-topic relay configuration.
///
/// # Invariants
/// - `key` is derived once from `(topic_full_name, cluster_url)` and never
///   recomputed; inbound payloads leave it empty.
/// - `created_at <= updated_at`.
/// - `tenant` is informational; authorization reads the tenant out of
///   `topic_full_name`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TopicConfig {
    pub key: String,
    pub topic_full_name: String,
    pub cluster_url: String,
    pub token: String,
    pub tenant: String,
    pub topic_status: TopicStatus,
    pub notes: String,
    pub webhooks: Vec<WebhookConfig>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TopicConfig {
    pub fn new(topic_full_name: impl Into<String>, cluster_url: impl Into<String>) -> Self {
        Self {
            topic_full_name: topic_full_name.into(),
            cluster_url: cluster_url.into(),
            ..Self::default()
        }
    }

    /// Registry key for this record's identifiers.
    ///
    /// # Errors
    /// - Any `IdentifierError` raised by [`derive_key`].
    pub fn derive_key(&self) -> Result<String, IdentifierError> {
        derive_key(&self.topic_full_name, &self.cluster_url)
    }

    /// Check an inbound payload before it reaches the registry.
    ///
    /// Returns the derived key on success.
    ///
    /// # Errors
    /// - Identifier errors for the topic name or cluster url.
    /// - `InvalidWebhook` for webhooks without an http(s) url or with a
    ///   malformed header line.
    pub fn validate(&self) -> Result<String, IdentifierError> {
        let key = self.derive_key()?;
        for webhook in &self.webhooks {
            webhook.validate()?;
        }
        Ok(key)
    }

    /// Copy the caller-mutable fields of `incoming` onto this record.
    pub(crate) fn merge_mutable(&mut self, incoming: TopicConfig) {
        self.token = incoming.token;
        self.tenant = incoming.tenant;
        self.notes = incoming.notes;
        self.topic_status = incoming.topic_status;
        self.webhooks = incoming.webhooks;
    }
}

/// Topic identifiers as sent in lookup and delete request bodies.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct TopicNames {
    pub topic_full_name: String,
    pub cluster_url: String,
}

/// How a caller addresses an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicRef {
    Key(String),
    Names(TopicNames),
}

impl TopicRef {
    /// Resolve to a registry key, deriving it from names when needed.
    ///
    /// # Errors
    /// - Identifier errors when names do not derive a key or the raw key is blank.
    pub fn resolve_key(&self) -> Result<String, IdentifierError> {
        match self {
            TopicRef::Key(key) if key.trim().is_empty() => Err(IdentifierError::MissingKey),
            TopicRef::Key(key) => Ok(key.trim().to_string()),
            TopicRef::Names(names) => derive_key(&names.topic_full_name, &names.cluster_url),
        }
    }
}

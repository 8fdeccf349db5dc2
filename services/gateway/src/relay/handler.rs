//! Request orchestration for relay and registry operations.
//!
//! # Ordering
//! - Lookups resolve the record before authorizing, so a missing record
//!   reports `NotFound` even to callers that could not read it.
//! - Creates and updates authorize against the payload's topic name. Reads
//!   and deletes authorize against the stored record's topic name.
use crate::model::{TopicConfig, TopicRef};
use crate::relay::allow_list::{AllowList, RelayMetadata};
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::token::TokenIssuer;
use crate::relay::transport::{SendMode, Transport};
use crate::store::TopicStore;
use bytes::Bytes;
use relay_authz::AuthorizationEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct RelayHandler {
    store: Arc<dyn TopicStore>,
    authz: Arc<AuthorizationEngine>,
    transport: Arc<dyn Transport>,
    allow_list: AllowList,
    token_issuer: Option<Arc<dyn TokenIssuer>>,
}

impl RelayHandler {
    pub fn new(
        store: Arc<dyn TopicStore>,
        authz: Arc<AuthorizationEngine>,
        transport: Arc<dyn Transport>,
        allow_list: AllowList,
    ) -> Self {
        Self {
            store,
            authz,
            transport,
            allow_list,
            token_issuer: None,
        }
    }

    pub fn with_token_issuer(mut self, issuer: Arc<dyn TokenIssuer>) -> Self {
        self.token_issuer = Some(issuer);
        self
    }

    pub fn store(&self) -> &Arc<dyn TopicStore> {
        &self.store
    }

    pub fn authz(&self) -> &AuthorizationEngine {
        &self.authz
    }

    /// Forward a payload to the broker named in `metadata`.
    ///
    /// # Errors
    /// - `Unauthorized` when the credential, destination or endpoint is
    ///   missing or the endpoint is not allow-listed.
    /// - `ServiceUnavailable` when the transport fails. No retry is attempted.
    pub async fn relay(
        &self,
        metadata: &RelayMetadata,
        payload: Bytes,
        mode: SendMode,
    ) -> RelayResult<()> {
        let target = self.allow_list.extract(metadata)?;
        let size = payload.len();
        self.transport
            .send(
                &target.endpoint,
                &target.credential,
                &target.destination,
                payload,
                mode,
            )
            .await
            .map_err(|err| {
                tracing::warn!(
                    endpoint = %target.endpoint,
                    destination = %target.destination,
                    error = %err,
                    "relay send failed"
                );
                metrics::counter!("relay_send_failures_total").increment(1);
                RelayError::ServiceUnavailable(format!(
                    "failed to publish to {}: {err}",
                    target.destination
                ))
            })?;
        metrics::counter!("relay_messages_total", "mode" => mode_label(mode)).increment(1);
        tracing::debug!(
            destination = %target.destination,
            bytes = size,
            async_send = mode.is_async(),
            "relayed payload"
        );
        Ok(())
    }

    /// Register a new topic and return the stored record.
    pub async fn create_topic(&self, subjects: &str, cfg: TopicConfig) -> RelayResult<TopicConfig> {
        cfg.validate()?;
        self.require_topic_access(cfg.topic_full_name.trim(), subjects)?;
        let key = self.store.create(cfg).await?;
        tracing::info!(key = %key, "topic created");
        Ok(self.store.get_by_key(&key).await?)
    }

    /// Create or merge a topic and return the stored record.
    pub async fn update_topic(&self, subjects: &str, cfg: TopicConfig) -> RelayResult<TopicConfig> {
        cfg.validate()?;
        self.require_topic_access(cfg.topic_full_name.trim(), subjects)?;
        let key = self.store.update(cfg).await?;
        tracing::info!(key = %key, "topic upserted");
        Ok(self.store.get_by_key(&key).await?)
    }

    pub async fn get_topic(&self, subjects: &str, topic: &TopicRef) -> RelayResult<TopicConfig> {
        let key = topic.resolve_key()?;
        let record = self.store.get_by_key(&key).await?;
        self.require_topic_access(&record.topic_full_name, subjects)?;
        Ok(record)
    }

    /// Remove a topic and return its key.
    pub async fn delete_topic(&self, subjects: &str, topic: &TopicRef) -> RelayResult<String> {
        let key = topic.resolve_key()?;
        let record = self.store.get_by_key(&key).await?;
        self.require_topic_access(&record.topic_full_name, subjects)?;
        let key = self.store.delete_by_key(&key).await?;
        tracing::info!(key = %key, "topic deleted");
        Ok(key)
    }

    /// Every record the caller may read, ordered by topic name.
    pub async fn list_topics(&self, subjects: &str) -> RelayResult<Vec<TopicConfig>> {
        let mut records: Vec<TopicConfig> = self
            .store
            .load()
            .await?
            .into_iter()
            .filter(|record| self.authz.authorize_for_topic(&record.topic_full_name, subjects))
            .collect();
        records.sort_by(|a, b| {
            (a.topic_full_name.as_str(), a.cluster_url.as_str())
                .cmp(&(b.topic_full_name.as_str(), b.cluster_url.as_str()))
        });
        Ok(records)
    }

    /// Mint a token for `subject`. Only superusers may call this.
    ///
    /// # Errors
    /// - `Unauthorized` when no caller subject holds a superuser role.
    /// - `Internal` when no issuer is configured or signing fails.
    pub async fn issue_token(&self, subjects: &str, subject: &str) -> RelayResult<String> {
        if !self.authz.is_superuser(subjects) {
            return Err(RelayError::Unauthorized(
                "token issuance requires a superuser role".to_string(),
            ));
        }
        let issuer = self
            .token_issuer
            .as_ref()
            .ok_or_else(|| RelayError::Internal(anyhow::anyhow!("token issuer not configured")))?;
        let token = issuer
            .issue_token(subject)
            .map_err(|err| RelayError::Internal(anyhow::Error::new(err)))?;
        tracing::info!(subject, "issued subject token");
        Ok(token)
    }

    fn require_topic_access(&self, topic_full_name: &str, subjects: &str) -> RelayResult<()> {
        if self.authz.authorize_for_topic(topic_full_name, subjects) {
            Ok(())
        } else {
            Err(RelayError::Forbidden(format!(
                "subjects are not permitted on {topic_full_name}"
            )))
        }
    }
}

impl std::fmt::Debug for RelayHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayHandler")
            .field("backend", &self.store.backend_name())
            .field("authz", &self.authz)
            .field("allow_list", &self.allow_list)
            .field("token_issuer", &self.token_issuer.is_some())
            .finish()
    }
}

fn mode_label(mode: SendMode) -> &'static str {
    if mode.is_async() { "async" } else { "sync" }
}

//! Deterministic registry key derivation.
//!
//! # Purpose
//! Maps a `(topic_full_name, cluster_url)` pair to the stable key every
//! registry operation addresses records by.
//!
//! # Key invariants
//! - Pure and restart-stable: no salt, no process state.
//! - Inputs are trimmed before hashing, so incidental whitespace around an
//!   identifier resolves to the same record.
//! - The same function serves create, lookup, update and delete paths.
use relay_authz::MIN_TOPIC_SEGMENTS;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("missing topic key")]
    MissingKey,
    #[error("missing topic full name")]
    MissingTopicName,
    #[error("missing cluster url")]
    MissingClusterUrl,
    #[error("identifier contains whitespace: {0}")]
    Whitespace(String),
    #[error("malformed topic full name: {0}")]
    MalformedTopicName(String),
    #[error("invalid webhook: {0}")]
    InvalidWebhook(String),
}

/// Derive the registry key for a topic on a cluster.
///
/// The key is the lowercase hex SHA-256 of `topic | cluster_url`.
///
/// # Errors
/// - `MissingTopicName` / `MissingClusterUrl` for blank inputs.
/// - `Whitespace` when either identifier embeds whitespace.
/// - `MalformedTopicName` when the name has fewer than four `/` segments or an
///   empty final segment.
pub fn derive_key(topic_full_name: &str, cluster_url: &str) -> Result<String, IdentifierError> {
    let topic = topic_full_name.trim();
    let url = cluster_url.trim();
    if topic.is_empty() {
        return Err(IdentifierError::MissingTopicName);
    }
    if url.is_empty() {
        return Err(IdentifierError::MissingClusterUrl);
    }
    for value in [topic, url] {
        if value.chars().any(char::is_whitespace) {
            return Err(IdentifierError::Whitespace(value.to_string()));
        }
    }
    let segments: Vec<&str> = topic.split('/').collect();
    if segments.len() < MIN_TOPIC_SEGMENTS || segments.last().is_some_and(|name| name.is_empty()) {
        return Err(IdentifierError::MalformedTopicName(topic.to_string()));
    }

    let mut hasher = Sha256::new();
    hasher.update(topic.as_bytes());
    hasher.update(b"|");
    hasher.update(url.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: &str = "persistent://acme/ns/orders";
    const URL: &str = "pulsar://broker.acme:6650";

    #[test]
    fn derive_key_is_stable() {
        let a = derive_key(TOPIC, URL).expect("key");
        let b = derive_key(TOPIC, URL).expect("key");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn derive_key_changes_with_inputs() {
        let a = derive_key(TOPIC, URL).expect("key");
        let b = derive_key("persistent://acme/ns/payments", URL).expect("key");
        let c = derive_key(TOPIC, "pulsar://broker.other:6650").expect("key");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn derive_key_separates_fields() {
        // Concatenation without a separator would collide on these pairs.
        let a = derive_key("s/n/t/ab", "c://x").expect("key");
        let b = derive_key("s/n/t/a", "bc://x").expect("key");
        assert_ne!(a, b);
    }

    #[test]
    fn derive_key_trims_surrounding_whitespace() {
        let a = derive_key(TOPIC, URL).expect("key");
        let b = derive_key(&format!("  {TOPIC}\n"), &format!(" {URL} ")).expect("key");
        assert_eq!(a, b);
    }

    #[test]
    fn derive_key_rejects_bad_identifiers() {
        assert_eq!(derive_key("", URL), Err(IdentifierError::MissingTopicName));
        assert_eq!(derive_key("   ", URL), Err(IdentifierError::MissingTopicName));
        assert_eq!(derive_key(TOPIC, ""), Err(IdentifierError::MissingClusterUrl));
        assert!(matches!(
            derive_key("scheme/ns", URL),
            Err(IdentifierError::MalformedTopicName(_))
        ));
        assert!(matches!(
            derive_key("scheme/ns/acme/", URL),
            Err(IdentifierError::MalformedTopicName(_))
        ));
        assert!(matches!(
            derive_key("scheme/ns/acme/my topic", URL),
            Err(IdentifierError::Whitespace(_))
        ));
    }
}

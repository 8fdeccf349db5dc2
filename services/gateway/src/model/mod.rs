//! Gateway data model.
//!
//! # Purpose
//! Re-exports the topic configuration record, its webhook descriptors, and the
//! deterministic key derivation used by the store and handler layers.
mod key;
mod topic;

pub use key::{IdentifierError, derive_key};
pub use topic::{
    InitialPosition, SubscriptionType, TopicConfig, TopicNames, TopicRef, TopicStatus,
    WebhookConfig,
};

//! Tenant-scoped subject authorization for the relay gateway.
//!
//! # Purpose
//! Decides whether a caller, identified only by the comma-separated subject
//! claims its verified token carried, may act on a topic owned by a tenant.
//!
//! # How it fits
//! The gateway service resolves a topic record, then asks this crate whether
//! the caller's subjects satisfy the tenant encoded in the topic name. The
//! crate performs no I/O and holds no mutable state, so one engine can be
//! shared across every request handler.
//!
//! # Key invariants
//! - Decisions fail closed: malformed topic names, empty tenant segments and
//!   empty subject lists never authorize.
//! - The tenant is always recomputed from the topic name (segment index 2),
//!   never taken from a record's declared tenant field.
//! - Subject parsing is string-convention based; changing split rules changes
//!   who is authorized.
//!
//! # Examples
//! ```rust
//! use relay_authz::AuthorizationEngine;
//!
//! let engine = AuthorizationEngine::new(["superuser"]);
//! assert!(engine.authorize_for_topic("persistent/ns/acme/orders", "acme-prod"));
//! assert!(!engine.authorize_for_topic("persistent/ns/acme/orders", "globex-prod"));
//! assert!(engine.authorize("acme", "superuser"));
//! ```
//!
//! # Common pitfalls
//! - Subjects with several hyphens only match a tenant made of every segment
//!   but the last (`acme-beta-prod` matches `acme-beta`, not `acme`).
//! - A subject with no hyphen only matches by direct equality.

mod engine;
mod errors;
mod evaluator;
mod topic;

pub use engine::AuthorizationEngine;
pub use errors::{AuthzError, AuthzResult};
pub use evaluator::{SUBJECT_DELIMITER, SuffixTenantEvaluator, TenantEvaluator};
pub use topic::{MIN_TOPIC_SEGMENTS, TENANT_SEGMENT_INDEX, tenant_segment};

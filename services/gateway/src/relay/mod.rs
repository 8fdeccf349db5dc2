//! Relay request handling.
//!
//! # Purpose
//! Orchestrates registry and relay requests: resolve keys, authorize caller
//! subjects against topic tenants, call the registry or the transport, and
//! map every outcome onto [`RelayError`].
//!
//! # Collaborators
//! - [`Transport`]: publishes payloads to the broker endpoint.
//! - [`AllowList`]: extracts and vets relay credentials from inbound metadata.
//! - [`TokenIssuer`]: mints tokens for subjects on behalf of superusers.
//!
//! All collaborators are injected at construction; nothing here is global.
pub mod allow_list;
pub mod error;
pub mod handler;
pub mod token;
pub mod transport;

pub use allow_list::{AllowList, RelayMetadata, RelayTarget};
pub use error::{RelayError, RelayResult};
pub use handler::RelayHandler;
pub use token::{JwtTokenIssuer, TokenError, TokenIssuer};
pub use transport::{LogTransport, SendMode, Transport};

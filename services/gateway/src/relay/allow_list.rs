//! Relay credential extraction and endpoint allow-listing.
use crate::relay::error::{RelayError, RelayResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Raw relay metadata as lifted from an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayMetadata {
    /// `Authorization` value, either `Bearer <token>` or a bare token.
    pub authorization: Option<String>,
    pub topic_full_name: Option<String>,
    pub endpoint: Option<String>,
}

/// Vetted relay target handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTarget {
    pub credential: String,
    pub destination: String,
    pub endpoint: String,
}

/// Endpoints the gateway may relay to.
///
/// An empty list permits any non-empty endpoint.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    endpoints: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let endpoints = endpoints
            .into_iter()
            .map(Into::into)
            .map(|endpoint: String| endpoint.trim().to_string())
            .filter(|endpoint| !endpoint.is_empty())
            .collect();
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn permits(&self, endpoint: &str) -> bool {
        self.endpoints.is_empty() || self.endpoints.iter().any(|allowed| allowed == endpoint)
    }

    /// Pull the credential, destination and endpoint out of request metadata.
    ///
    /// # Errors
    /// - `RelayError::Unauthorized` when any field is missing or blank, or the
    ///   endpoint is not allow-listed.
    pub fn extract(&self, metadata: &RelayMetadata) -> RelayResult<RelayTarget> {
        let endpoint = non_blank(metadata.endpoint.as_deref())
            .ok_or_else(|| RelayError::Unauthorized("missing cluster endpoint".to_string()))?;
        if !self.permits(endpoint) {
            return Err(RelayError::Unauthorized(format!(
                "cluster endpoint {endpoint} is not allowed"
            )));
        }
        let destination = non_blank(metadata.topic_full_name.as_deref())
            .ok_or_else(|| RelayError::Unauthorized("missing topic full name".to_string()))?;
        let credential = metadata
            .authorization
            .as_deref()
            .map(str::trim_start)
            .map(|value| value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| RelayError::Unauthorized("missing authorization token".to_string()))?;
        Ok(RelayTarget {
            credential: credential.to_string(),
            destination: destination.to_string(),
            endpoint: endpoint.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

use crate::{AuthzError, AuthzResult};

/// Fewest `/`-delimited segments a topic name needs to carry a tenant.
pub const MIN_TOPIC_SEGMENTS: usize = 4;

/// Position of the tenant in `<scheme>/<namespace-class>/<tenant>/<topic>`.
pub const TENANT_SEGMENT_INDEX: usize = 2;

/// Extract the owning tenant from a hierarchical topic name.
///
/// # Errors
/// - `AuthzError::InvalidTopicName` when fewer than four segments are present.
/// - `AuthzError::EmptyTenant` when the tenant segment is empty.
pub fn tenant_segment(topic_full_name: &str) -> AuthzResult<&str> {
    let parts: Vec<&str> = topic_full_name.split('/').collect();
    if parts.len() < MIN_TOPIC_SEGMENTS {
        return Err(AuthzError::InvalidTopicName(topic_full_name.to_string()));
    }
    let tenant = parts[TENANT_SEGMENT_INDEX];
    if tenant.is_empty() {
        return Err(AuthzError::EmptyTenant(topic_full_name.to_string()));
    }
    Ok(tenant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_segment_reads_third_segment() {
        assert_eq!(tenant_segment("scheme/ns/acme/topic1"), Ok("acme"));
        // Pulsar style names keep the tenant at index 2 because of the `//`.
        assert_eq!(
            tenant_segment("persistent://acme/ns/topic1"),
            Ok("acme")
        );
    }

    #[test]
    fn tenant_segment_rejects_short_names() {
        assert!(matches!(
            tenant_segment("scheme/ns"),
            Err(AuthzError::InvalidTopicName(_))
        ));
        assert!(matches!(
            tenant_segment(""),
            Err(AuthzError::InvalidTopicName(_))
        ));
    }

    #[test]
    fn tenant_segment_rejects_empty_tenant() {
        assert!(matches!(
            tenant_segment("scheme/ns//topic1"),
            Err(AuthzError::EmptyTenant(_))
        ));
    }
}

//! Tenant-extraction strategies.
//!
//! Deployments encode the tenant into subject claims differently, so the
//! engine consults a replaceable [`TenantEvaluator`] after the superuser and
//! direct-match checks have failed.

/// Separator between the tenant and the instance suffix in a subject.
pub const SUBJECT_DELIMITER: char = '-';

/// Decides whether a single subject token belongs to the required tenant.
pub trait TenantEvaluator: Send + Sync {
    fn eval_tenant(&self, required_tenant: &str, subject: &str) -> bool;
}

impl<F> TenantEvaluator for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn eval_tenant(&self, required_tenant: &str, subject: &str) -> bool {
        self(required_tenant, subject)
    }
}

/// Default strategy for subjects shaped like `<tenant>-<suffix>`.
///
/// The last hyphen-delimited segment (an environment or cluster qualifier) is
/// discarded and the remainder, rejoined with `-`, must equal the required
/// tenant exactly. A subject without a hyphen leaves an empty remainder and
/// never matches here; whole-subject equality is the engine's direct-match
/// rule.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuffixTenantEvaluator;

impl SuffixTenantEvaluator {
    /// Strip the final `-` segment from a subject.
    pub fn extract_tenant(subject: &str) -> &str {
        match subject.rfind(SUBJECT_DELIMITER) {
            Some(idx) => &subject[..idx],
            None => "",
        }
    }
}

impl TenantEvaluator for SuffixTenantEvaluator {
    fn eval_tenant(&self, required_tenant: &str, subject: &str) -> bool {
        let tenant = Self::extract_tenant(subject);
        !tenant.is_empty() && tenant == required_tenant
    }
}

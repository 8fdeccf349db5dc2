//! Subject matching against tenant requirements.
use crate::evaluator::{SuffixTenantEvaluator, TenantEvaluator};
use crate::topic::tenant_segment;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Separator between subjects carried in a single claim/header value.
const SUBJECTS_DELIMITER: char = ',';

/// Evaluates caller subjects against the tenant that owns a topic.
///
/// # What it does
/// Holds the configured superuser roles and the tenant-extraction strategy.
/// Every check walks the caller's subjects in order and short-circuits on the
/// first subject that is a superuser role, equals the tenant, or satisfies the
/// strategy.
///
/// # Invariants
/// - Superuser roles are never empty strings.
/// - An empty required tenant can only be satisfied by a superuser role.
#[derive(Clone)]
pub struct AuthorizationEngine {
    super_roles: HashSet<String>,
    evaluator: Arc<dyn TenantEvaluator>,
}

impl AuthorizationEngine {
    /// Build an engine with the default `<tenant>-<suffix>` strategy.
    pub fn new<I, S>(super_roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let super_roles = super_roles
            .into_iter()
            .map(Into::into)
            .map(|role: String| role.trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        Self {
            super_roles,
            evaluator: Arc::new(SuffixTenantEvaluator),
        }
    }

    /// Build an engine from a comma-separated role list such as `admin,ops`.
    pub fn from_csv(super_roles: &str) -> Self {
        Self::new(super_roles.split(SUBJECTS_DELIMITER))
    }

    /// Replace the tenant-extraction strategy.
    pub fn with_evaluator<E>(mut self, evaluator: E) -> Self
    where
        E: TenantEvaluator + 'static,
    {
        self.evaluator = Arc::new(evaluator);
        self
    }

    pub fn super_roles(&self) -> impl Iterator<Item = &str> {
        self.super_roles.iter().map(String::as_str)
    }

    pub fn is_super_role(&self, subject: &str) -> bool {
        self.super_roles.contains(subject)
    }

    /// True when any of the comma-separated subjects is a superuser role.
    pub fn is_superuser(&self, subjects: &str) -> bool {
        subjects
            .split(SUBJECTS_DELIMITER)
            .any(|subject| self.is_super_role(subject))
    }

    /// Check the caller's subjects against a required tenant.
    pub fn authorize(&self, required_tenant: &str, subjects: &str) -> bool {
        for subject in subjects.split(SUBJECTS_DELIMITER) {
            if self.is_super_role(subject) {
                tracing::debug!(subject, "authorized by superuser role");
                return true;
            }
            if required_tenant.is_empty() {
                continue;
            }
            if subject == required_tenant {
                tracing::debug!(tenant = required_tenant, "authorized by direct subject match");
                return true;
            }
            if self.evaluator.eval_tenant(required_tenant, subject) {
                tracing::debug!(
                    tenant = required_tenant,
                    subject,
                    "authorized by tenant extraction"
                );
                return true;
            }
        }
        false
    }

    /// Check the caller's subjects against the tenant encoded in a topic name.
    ///
    /// Fails closed when the name has fewer than four `/` segments or an empty
    /// tenant segment.
    pub fn authorize_for_topic(&self, topic_full_name: &str, subjects: &str) -> bool {
        match tenant_segment(topic_full_name) {
            Ok(tenant) => self.authorize(tenant, subjects),
            Err(err) => {
                tracing::info!(error = %err, "topic authorization denied");
                false
            }
        }
    }
}

impl fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationEngine")
            .field("super_roles", &self.super_roles)
            .finish_non_exhaustive()
    }
}

impl Default for AuthorizationEngine {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AuthorizationEngine {
        AuthorizationEngine::new(["superadmin", "ops"])
    }

    #[test]
    fn superuser_role_bypasses_tenant() {
        let engine = engine();
        assert!(engine.authorize("acme", "superadmin"));
        assert!(engine.authorize("globex", "superadmin"));
        assert!(engine.authorize("", "ops"));
    }

    #[test]
    fn direct_subject_match() {
        assert!(engine().authorize("acme", "acme"));
    }

    #[test]
    fn extraction_strips_final_segment() {
        let engine = engine();
        assert!(engine.authorize("acme", "acme-prod"));
        assert!(!engine.authorize("acme", "acme-beta-prod"));
        assert!(engine.authorize("acme-beta", "acme-beta-prod"));
    }

    #[test]
    fn any_subject_in_list_may_match() {
        let engine = engine();
        assert!(engine.authorize("acme", "globex-prod,acme-prod"));
        assert!(engine.authorize("acme", "reader,superadmin"));
        assert!(!engine.authorize("acme", "globex-prod,initech"));
    }

    #[test]
    fn empty_inputs_fail_closed() {
        let engine = engine();
        assert!(!engine.authorize("acme", ""));
        assert!(!engine.authorize("acme", ",,"));
        assert!(!engine.authorize("", ""));
        assert!(!engine.authorize("", "acme"));
    }

    #[test]
    fn subjects_are_not_trimmed() {
        assert!(!engine().authorize("acme", "globex, acme"));
    }

    #[test]
    fn authorize_for_topic_uses_tenant_segment() {
        let engine = engine();
        assert!(engine.authorize_for_topic("scheme/ns/acme/topic1", "acme-prod"));
        assert!(!engine.authorize_for_topic("scheme/ns/globex/topic1", "acme-prod"));
        assert!(!engine.authorize_for_topic("scheme/ns", "acme-prod"));
        assert!(!engine.authorize_for_topic("scheme/ns", "superadmin"));
        assert!(!engine.authorize_for_topic("scheme/ns//topic1", "acme-prod"));
        assert!(engine.authorize_for_topic("persistent://acme/ns/topic1", "acme"));
    }

    #[test]
    fn custom_evaluator_replaces_default() {
        let engine = AuthorizationEngine::new(["root"])
            .with_evaluator(|tenant: &str, subject: &str| subject == format!("tenant:{tenant}"));
        assert!(engine.authorize("acme", "tenant:acme"));
        assert!(!engine.authorize("acme", "acme-prod"));
        assert!(engine.authorize("acme", "root"));
    }

    #[test]
    fn roles_from_csv_ignore_blanks() {
        let engine = AuthorizationEngine::from_csv(" admin , ,ops");
        let mut roles: Vec<&str> = engine.super_roles().collect();
        roles.sort_unstable();
        assert_eq!(roles, vec!["admin", "ops"]);
        assert!(engine.is_superuser("reader,ops"));
        assert!(!engine.is_superuser("reader"));
        assert!(!AuthorizationEngine::default().is_superuser(""));
    }
}

//! Gateway HTTP API module.
//!
//! # Purpose
//! Exposes route handler modules and the helper that reads caller subjects
//! from request headers.
pub mod error;
pub mod openapi;
pub mod relay;
pub mod system;
pub mod tokens;
pub mod topics;
pub mod types;

use axum::http::HeaderMap;

/// Header carrying the caller's comma-separated subjects, set upstream by the
/// JWT verifier.
pub const SUBJECTS_HEADER: &str = "injectedSubs";

/// Caller subjects for this request. A missing or non-UTF-8 header yields an
/// empty list, which never authorizes anything.
pub(crate) fn caller_subjects(headers: &HeaderMap) -> String {
    header_value(headers, SUBJECTS_HEADER).unwrap_or_default()
}

pub(crate) fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn caller_subjects_defaults_to_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(caller_subjects(&headers), "");
        headers.insert(SUBJECTS_HEADER, HeaderValue::from_static("acme-prod,superuser"));
        assert_eq!(caller_subjects(&headers), "acme-prod,superuser");
    }
}

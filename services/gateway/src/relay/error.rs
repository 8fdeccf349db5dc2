//! Caller-facing error taxonomy for relay and registry requests.
use crate::model::IdentifierError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),
    #[error("topic already exists: {0}")]
    AlreadyExists(String),
    #[error("topic not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error(transparent)]
    Internal(anyhow::Error),
}

pub type RelayResult<T> = Result<T, RelayError>;

impl From<StoreError> for RelayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(key) => RelayError::AlreadyExists(key),
            StoreError::NotFound(key) => RelayError::NotFound(key),
            StoreError::InvalidIdentifier(err) => RelayError::InvalidIdentifier(err),
            StoreError::Internal(err) => RelayError::Internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_one_to_one() {
        assert!(matches!(
            RelayError::from(StoreError::AlreadyExists("k".into())),
            RelayError::AlreadyExists(key) if key == "k"
        ));
        assert!(matches!(
            RelayError::from(StoreError::NotFound("k".into())),
            RelayError::NotFound(_)
        ));
        assert!(matches!(
            RelayError::from(StoreError::InvalidIdentifier(IdentifierError::MissingClusterUrl)),
            RelayError::InvalidIdentifier(IdentifierError::MissingClusterUrl)
        ));
        assert!(matches!(
            RelayError::from(StoreError::Internal(anyhow::anyhow!("disk"))),
            RelayError::Internal(_)
        ));
    }
}

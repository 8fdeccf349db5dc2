//! Subject token minting.
//!
//! Tokens are HS256 JWTs signed with a shared secret. Claims are `sub`, `iat`
//! and, when a TTL is configured, `exp`.
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token subject is empty")]
    EmptySubject,
    #[error("token signing key is empty")]
    EmptySecret,
    #[error("system clock is before the unix epoch")]
    Clock,
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Mints credentials for a subject.
pub trait TokenIssuer: Send + Sync {
    fn issue_token(&self, subject: &str) -> Result<String, TokenError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectClaims {
    pub sub: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

pub struct JwtTokenIssuer {
    key: EncodingKey,
    ttl: Option<Duration>,
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        Ok(Self {
            key: EncodingKey::from_secret(secret),
            ttl,
        })
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

impl std::fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("JwtTokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Clock)?;
        let iat = now.as_secs() as i64;
        let claims = SubjectClaims {
            sub: subject.to_string(),
            iat,
            exp: self.ttl.map(|ttl| iat + ttl.as_secs() as i64),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)?;
        Ok(token)
    }
}

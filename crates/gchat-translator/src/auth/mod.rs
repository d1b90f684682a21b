//! Authentication of inbound Google Chat requests.
//!
//! Google Chat signs every webhook call with an ID token whose `iss` is the
//! Chat service account and whose `aud` is the Chat API. [`IdentityVerifier`]
//! checks both after a [`TokenVerifier`] has validated the signature.

pub mod google;

use std::future::Future;

use serde::Deserialize;
use tracing::{error, warn};

pub use google::GoogleTokenVerifier;

/// Claims read from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub sub: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(String),
    #[error("no signing key for kid {0}")]
    UnknownKey(String),
    #[error("token rejected: {0}")]
    Rejected(String),
}

/// Signature and claim validation of a bearer token for a given audience.
pub trait TokenVerifier: Send + Sync + 'static {
    fn verify_token(
        &self,
        token: &str,
        audience: &str,
    ) -> impl Future<Output = Result<Claims, TokenError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid(Claims),
    Invalid(InvalidReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    IssuerMismatch { actual: String },
    AudienceMismatch { actual: String },
    Unverifiable(TokenError),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }
}

/// Accepts a token only when it verifies and was issued by the expected
/// account for the expected audience. Never fails to the caller.
pub struct IdentityVerifier<V> {
    verifier: V,
    expected_issuer: String,
    audience: String,
}

impl<V: TokenVerifier> IdentityVerifier<V> {
    pub fn new(verifier: V, expected_issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            verifier,
            expected_issuer: expected_issuer.into(),
            audience: audience.into(),
        }
    }

    pub async fn check(&self, token: &str) -> Verification {
        let claims = match self.verifier.verify_token(token, &self.audience).await {
            Ok(claims) => claims,
            Err(e) => {
                error!(error = %e, "Token verification failed");
                return Verification::Invalid(InvalidReason::Unverifiable(e));
            }
        };

        if claims.iss != self.expected_issuer {
            warn!(
                expected = %self.expected_issuer,
                actual = %claims.iss,
                "Token issuer mismatch"
            );
            return Verification::Invalid(InvalidReason::IssuerMismatch { actual: claims.iss });
        }

        if claims.aud != self.audience {
            warn!(
                expected = %self.audience,
                actual = %claims.aud,
                "Token audience mismatch"
            );
            return Verification::Invalid(InvalidReason::AudienceMismatch { actual: claims.aud });
        }

        Verification::Valid(claims)
    }

    pub async fn verify(&self, token: &str) -> bool {
        self.check(token).await.is_valid()
    }
}

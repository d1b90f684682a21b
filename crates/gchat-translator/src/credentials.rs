//! Service-account OAuth2 access tokens for calling Google APIs.
//!
//! A JWT assertion signed with the account's private key is exchanged at the
//! key's token URI (RFC 7523 JWT-bearer grant). Tokens are not cached.

use std::future::Future;
use std::path::{Path, PathBuf};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, get_current_timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TRANSLATION_SCOPE: &str = "https://www.googleapis.com/auth/cloud-translation";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("failed to read credentials file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid service account key: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    #[error("token exchange failed: {0}")]
    Exchange(String),
}

/// The fields of a Google service-account JSON key this crate needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CredentialsError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Source of bearer tokens for outbound Google API calls.
pub trait AccessTokenSource: Send + Sync + 'static {
    fn access_token(&self) -> impl Future<Output = Result<String, CredentialsError>> + Send;
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct ServiceAccountAuth {
    http: reqwest::Client,
    client_email: String,
    key_id: Option<String>,
    token_uri: String,
    signing_key: EncodingKey,
}

impl ServiceAccountAuth {
    /// Fails when the private key is not a valid RSA PEM.
    pub fn new(key: ServiceAccountKey) -> Result<Self, CredentialsError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| CredentialsError::InvalidKey(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            client_email: key.client_email,
            key_id: key.private_key_id,
            token_uri: key.token_uri,
            signing_key,
        })
    }

    fn assertion(&self) -> Result<String, CredentialsError> {
        let iat = get_current_timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: TRANSLATION_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();
        encode(&header, &claims, &self.signing_key)
            .map_err(|e| CredentialsError::InvalidKey(e.to_string()))
    }
}

impl AccessTokenSource for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String, CredentialsError> {
        let assertion = self.assertion()?;

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| CredentialsError::Exchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialsError::Exchange(format!("{status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialsError::Exchange(e.to_string()))?;
        debug!(client_email = %self.client_email, "Obtained access token");
        Ok(token.access_token)
    }
}

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use tracing::debug;

use super::{Claims, TokenError, TokenVerifier};

/// Verifies Google-signed ID tokens against the published JWKS.
///
/// Keys are fetched on every call. Only RS256 is accepted regardless of the
/// token header.
#[derive(Clone)]
pub struct GoogleTokenVerifier {
    http: reqwest::Client,
    certs_url: String,
}

impl GoogleTokenVerifier {
    pub fn new(certs_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), certs_url)
    }

    pub fn with_client(http: reqwest::Client, certs_url: impl Into<String>) -> Self {
        Self {
            http,
            certs_url: certs_url.into(),
        }
    }

    async fn fetch_keys(&self) -> Result<JwkSet, TokenError> {
        self.http
            .get(&self.certs_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TokenError::KeyFetch(e.to_string()))?
            .json::<JwkSet>()
            .await
            .map_err(|e| TokenError::KeyFetch(e.to_string()))
    }
}

impl TokenVerifier for GoogleTokenVerifier {
    async fn verify_token(&self, token: &str, audience: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| TokenError::Malformed("missing kid".to_string()))?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| TokenError::UnknownKey(kid.clone()))?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| TokenError::KeyFetch(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[audience]);

        let data = decode::<Claims>(token, &key, &validation)
            .map_err(|e| TokenError::Rejected(e.to_string()))?;
        debug!(kid = %kid, iss = %data.claims.iss, "Token signature verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PRIVATE_KEY: &[u8] = include_bytes!("../../tests/fixtures/test_rsa_private.pem");
    const JWKS: &str = include_str!("../../tests/fixtures/test_jwks.json");
    const AUDIENCE: &str = "https://chat.googleapis.com";
    const ISSUER: &str = "chat@system.gserviceaccount.com";

    fn sign(kid: Option<&str>, claims: serde_json::Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(str::to_string);
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY).unwrap();
        encode(&header, &claims, &key).unwrap()
    }

    fn claims_for(aud: &str, exp: u64) -> serde_json::Value {
        json!({
            "iss": ISSUER,
            "aud": aud,
            "sub": "1234",
            "iat": get_current_timestamp(),
            "exp": exp,
        })
    }

    async fn jwks_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/certs"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(JWKS, "application/json"))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn valid_token_returns_claims() {
        let server = jwks_server().await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));
        let token = sign(
            Some("test-key-1"),
            claims_for(AUDIENCE, get_current_timestamp() + 600),
        );

        let claims = verifier.verify_token(&token, AUDIENCE).await.unwrap();
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.aud, AUDIENCE);
        assert_eq!(claims.sub.as_deref(), Some("1234"));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let server = jwks_server().await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));
        let token = sign(
            Some("test-key-1"),
            claims_for("https://example.com", get_current_timestamp() + 600),
        );

        let err = verifier.verify_token(&token, AUDIENCE).await.unwrap_err();
        assert!(matches!(err, TokenError::Rejected(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let server = jwks_server().await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));
        let token = sign(
            Some("test-key-1"),
            claims_for(AUDIENCE, get_current_timestamp() - 3600),
        );

        let err = verifier.verify_token(&token, AUDIENCE).await.unwrap_err();
        assert!(matches!(err, TokenError::Rejected(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unknown_kid_is_reported() {
        let server = jwks_server().await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));
        let token = sign(
            Some("rotated-away"),
            claims_for(AUDIENCE, get_current_timestamp() + 600),
        );

        assert_eq!(
            verifier.verify_token(&token, AUDIENCE).await.unwrap_err(),
            TokenError::UnknownKey("rotated-away".to_string())
        );
    }

    #[tokio::test]
    async fn hmac_signed_token_is_rejected() {
        let server = jwks_server().await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some("test-key-1".to_string());
        let token = encode(
            &header,
            &claims_for(AUDIENCE, get_current_timestamp() + 600),
            &EncodingKey::from_secret(b"shared"),
        )
        .unwrap();

        let err = verifier.verify_token(&token, AUDIENCE).await.unwrap_err();
        assert!(matches!(err, TokenError::Rejected(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn garbage_is_malformed_without_fetching_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(JWKS, "application/json"))
            .expect(0)
            .mount(&server)
            .await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));

        let err = verifier.verify_token("not-a-jwt", AUDIENCE).await.unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_kid_is_malformed() {
        let server = jwks_server().await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));
        let token = sign(None, claims_for(AUDIENCE, get_current_timestamp() + 600));

        assert_eq!(
            verifier.verify_token(&token, AUDIENCE).await.unwrap_err(),
            TokenError::Malformed("missing kid".to_string())
        );
    }

    #[tokio::test]
    async fn certs_endpoint_failure_is_key_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/certs"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let verifier = GoogleTokenVerifier::new(format!("{}/certs", server.uri()));
        let token = sign(
            Some("test-key-1"),
            claims_for(AUDIENCE, get_current_timestamp() + 600),
        );

        let err = verifier.verify_token(&token, AUDIENCE).await.unwrap_err();
        assert!(matches!(err, TokenError::KeyFetch(_)), "got {err:?}");
    }
}

//! Mock collaborators for testing without Google endpoints.
//!
//! Enabled with the `test-support` feature:
//!
//! ```toml
//! [dev-dependencies]
//! gchat-translator = { path = "...", features = ["test-support"] }
//! ```

use std::sync::{Arc, Mutex};

use crate::auth::{Claims, TokenError, TokenVerifier};
use crate::credentials::{AccessTokenSource, CredentialsError};
use crate::translate::{TranslationError, TranslationGateway};

// ── MockTokenVerifier ─────────────────────────────────────────────────────────

/// Returns a fixed verification result and records every token it sees.
#[derive(Clone)]
pub struct MockTokenVerifier {
    result: Arc<Mutex<Result<Claims, TokenError>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockTokenVerifier {
    pub fn accepting(claims: Claims) -> Self {
        Self::with_result(Ok(claims))
    }

    pub fn rejecting(error: TokenError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<Claims, TokenError>) -> Self {
        Self {
            result: Arc::new(Mutex::new(result)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn audiences(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, a)| a.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl TokenVerifier for MockTokenVerifier {
    async fn verify_token(&self, token: &str, audience: &str) -> Result<Claims, TokenError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), audience.to_string()));
        self.result.lock().unwrap().clone()
    }
}

// ── MockTranslationGateway ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCall {
    pub text: String,
    pub target_language: Option<String>,
}

/// Scripted translation gateway.
///
/// By default every translation succeeds with `"translated"` and detection
/// reports `"English"`.
#[derive(Clone)]
pub struct MockTranslationGateway {
    translation: Arc<Mutex<Result<String, TranslationError>>>,
    detected: Arc<Mutex<String>>,
    translate_calls: Arc<Mutex<Vec<TranslateCall>>>,
    detect_calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTranslationGateway {
    fn default() -> Self {
        Self {
            translation: Arc::new(Mutex::new(Ok("translated".to_string()))),
            detected: Arc::new(Mutex::new("English".to_string())),
            translate_calls: Arc::new(Mutex::new(Vec::new())),
            detect_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockTranslationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate_to(&self, text: impl Into<String>) {
        *self.translation.lock().unwrap() = Ok(text.into());
    }

    pub fn fail_with(&self, error: TranslationError) {
        *self.translation.lock().unwrap() = Err(error);
    }

    pub fn detect_as(&self, language: impl Into<String>) {
        *self.detected.lock().unwrap() = language.into();
    }

    pub fn translate_calls(&self) -> Vec<TranslateCall> {
        self.translate_calls.lock().unwrap().clone()
    }

    pub fn detect_calls(&self) -> Vec<String> {
        self.detect_calls.lock().unwrap().clone()
    }
}

impl TranslationGateway for MockTranslationGateway {
    async fn translate(
        &self,
        text: &str,
        target_language: Option<&str>,
    ) -> Result<String, TranslationError> {
        self.translate_calls.lock().unwrap().push(TranslateCall {
            text: text.to_string(),
            target_language: target_language.map(str::to_string),
        });
        self.translation.lock().unwrap().clone()
    }

    async fn detect_language(&self, text: &str) -> String {
        self.detect_calls.lock().unwrap().push(text.to_string());
        self.detected.lock().unwrap().clone()
    }
}

// ── StaticAccessToken ─────────────────────────────────────────────────────────

/// Always hands out the same bearer token.
#[derive(Clone)]
pub struct StaticAccessToken(String);

impl StaticAccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl AccessTokenSource for StaticAccessToken {
    async fn access_token(&self) -> Result<String, CredentialsError> {
        Ok(self.0.clone())
    }
}

//! Google Cloud Translation v3 client.

use std::future::Future;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, warn};

use crate::credentials::AccessTokenSource;
use crate::languages::{is_supported, language_name, supported_codes};

/// Returned by [`TranslationGateway::detect_language`] when detection fails.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Unsupported language: {code}. Supported languages: {supported}")]
    UnsupportedLanguage { code: String, supported: String },
    #[error("Translation service error: {0}")]
    Service(String),
}

impl TranslationError {
    pub fn unsupported(code: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            code: code.into(),
            supported: supported_codes(),
        }
    }
}

pub trait TranslationGateway: Send + Sync + 'static {
    /// `None` resolves to the configured default target language.
    fn translate(
        &self,
        text: &str,
        target_language: Option<&str>,
    ) -> impl Future<Output = Result<String, TranslationError>> + Send;

    /// English name of the detected language, its raw code when not in the
    /// supported set, or [`UNKNOWN_LANGUAGE`]. Never fails.
    fn detect_language(&self, text: &str) -> impl Future<Output = String> + Send;
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    languages: Vec<DetectedLanguage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectedLanguage {
    #[serde(default)]
    language_code: String,
}

pub struct GoogleTranslator<A> {
    http: reqwest::Client,
    auth: A,
    parent: String,
    base_url: String,
    default_target_language: String,
}

impl<A: AccessTokenSource> GoogleTranslator<A> {
    pub fn new(
        auth: A,
        project_id: &str,
        default_target_language: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth,
            parent: format!("projects/{project_id}/locations/global"),
            base_url: crate::config::DEFAULT_TRANSLATE_BASE_URL.to_string(),
            default_target_language: default_target_language.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/v3/{}:{method}", self.base_url, self.parent)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, String> {
        let token = self.auth.access_token().await.map_err(|e| e.to_string())?;

        let response = self
            .http
            .post(self.endpoint(method))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{status}: {body}"));
        }

        response.json::<T>().await.map_err(|e| e.to_string())
    }

    async fn translate_text(&self, text: &str, target: &str) -> Result<String, String> {
        let response: TranslateResponse = self
            .call(
                "translateText",
                json!({
                    "contents": [text],
                    "targetLanguageCode": target,
                    "mimeType": "text/plain",
                }),
            )
            .await?;

        response
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| "No translation returned".to_string())
    }

    async fn detect(&self, text: &str) -> Result<Option<String>, String> {
        let response: DetectResponse = self
            .call(
                "detectLanguage",
                json!({
                    "content": text,
                    "mimeType": "text/plain",
                }),
            )
            .await?;

        Ok(response
            .languages
            .into_iter()
            .next()
            .map(|l| l.language_code)
            .filter(|code| !code.is_empty()))
    }
}

impl<A: AccessTokenSource> TranslationGateway for GoogleTranslator<A> {
    async fn translate(
        &self,
        text: &str,
        target_language: Option<&str>,
    ) -> Result<String, TranslationError> {
        let target = target_language.unwrap_or(self.default_target_language.as_str());
        if !is_supported(target) {
            return Err(TranslationError::unsupported(target));
        }

        self.translate_text(text, target).await.map_err(|e| {
            error!(error = %e, target = %target, "Cloud Translation request failed");
            TranslationError::Service(e)
        })
    }

    async fn detect_language(&self, text: &str) -> String {
        match self.detect(text).await {
            Ok(Some(code)) => language_name(&code)
                .map(str::to_string)
                .unwrap_or(code),
            Ok(None) => UNKNOWN_LANGUAGE.to_string(),
            Err(e) => {
                warn!(error = %e, "Language detection failed");
                UNKNOWN_LANGUAGE.to_string()
            }
        }
    }
}

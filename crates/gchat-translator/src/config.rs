use std::fmt;
use std::path::PathBuf;

use crate::dispatcher::BotSettings;
use crate::env::ReadEnv;

/// Audience Google Chat puts in the bearer tokens it sends to bots.
pub const CHAT_AUDIENCE: &str = "https://chat.googleapis.com";
pub const DEFAULT_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
pub const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translation.googleapis.com";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TARGET_LANGUAGE: &str = "ja";
const DEFAULT_BOT_NAME: &str = "translator";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Configuration for the translator bot.
///
/// Resolved from environment variables:
/// - `GCP_PROJECT_ID`: project that owns the Cloud Translation API (required)
/// - `SERVICE_ACCOUNT_EMAIL`: issuer Google Chat signs its tokens as (required)
/// - `GOOGLE_APPLICATION_CREDENTIALS`: service-account key file (required)
/// - `DEFAULT_TARGET_LANGUAGE`: target when no `to:` directive is given (default: `ja`)
/// - `BOT_NAME`: mention name without `@` (default: `translator`)
/// - `PORT`: HTTP listening port (default: 8080)
/// - `GOOGLE_CERTS_URL`: JWKS used to verify Chat tokens
/// - `TRANSLATE_API_BASE_URL`: Cloud Translation endpoint
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub project_id: String,
    pub service_account_email: String,
    pub credentials_path: PathBuf,
    pub default_target_language: String,
    pub bot_name: String,
    pub port: u16,
    pub audience: String,
    pub certs_url: String,
    pub translate_base_url: String,
}

impl TranslatorConfig {
    pub fn from_env<E: ReadEnv>(env: &E) -> Result<Self, ConfigError> {
        Ok(Self {
            project_id: required(env, "GCP_PROJECT_ID")?,
            service_account_email: required(env, "SERVICE_ACCOUNT_EMAIL")?,
            credentials_path: required(env, "GOOGLE_APPLICATION_CREDENTIALS")?.into(),
            default_target_language: env
                .non_empty("DEFAULT_TARGET_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string()),
            bot_name: env
                .non_empty("BOT_NAME")
                .unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
            port: env
                .non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            audience: CHAT_AUDIENCE.to_string(),
            certs_url: env
                .non_empty("GOOGLE_CERTS_URL")
                .unwrap_or_else(|| DEFAULT_CERTS_URL.to_string()),
            translate_base_url: env
                .non_empty("TRANSLATE_API_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TRANSLATE_BASE_URL.to_string()),
        })
    }

    pub fn bot_settings(&self) -> BotSettings {
        BotSettings {
            bot_name: self.bot_name.clone(),
            default_target_language: self.default_target_language.clone(),
        }
    }
}

impl fmt::Display for TranslatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config(project={}, bot={}, default_lang={})",
            self.project_id, self.bot_name, self.default_target_language
        )
    }
}

/// Log filter fallback, from `LOG_LEVEL` (default: `info`). Used only when
/// `RUST_LOG` is unset. Read on its own so logging can start before the
/// rest of the configuration is validated.
pub fn log_level<E: ReadEnv>(env: &E) -> String {
    env.non_empty("LOG_LEVEL")
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn required<E: ReadEnv>(env: &E, key: &'static str) -> Result<String, ConfigError> {
    env.non_empty(key).ok_or(ConfigError::Missing(key))
}

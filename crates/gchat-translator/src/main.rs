use anyhow::Context;
use gchat_translator::env::SystemEnv;
use gchat_translator::{
    AppState, EventDispatcher, GoogleTokenVerifier, GoogleTranslator, IdentityVerifier,
    ServiceAccountAuth, ServiceAccountKey, TranslatorConfig, config, serve,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::log_level(&SystemEnv))),
        )
        .init();

    let config = TranslatorConfig::from_env(&SystemEnv)?;
    info!("{config}");

    let key = ServiceAccountKey::from_file(&config.credentials_path)?;
    let auth = ServiceAccountAuth::new(key)?;

    let translator = GoogleTranslator::new(auth, &config.project_id, &config.default_target_language)
        .with_base_url(&config.translate_base_url);
    let verifier = IdentityVerifier::new(
        GoogleTokenVerifier::new(&config.certs_url),
        &config.service_account_email,
        &config.audience,
    );
    let dispatcher = EventDispatcher::new(translator, config.bot_settings());

    serve(config.port, AppState::new(verifier, dispatcher))
        .await
        .context("server failed")
}

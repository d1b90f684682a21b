//! HTTP boundary: health check and the Google Chat webhook.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gchat_types::events::EVENT_UNKNOWN;
use gchat_types::{InboundEvent, ReplyPayload};
use serde_json::{Value, json};
use tracing::{error, info, instrument, warn};

use crate::auth::{IdentityVerifier, TokenVerifier};
use crate::dispatcher::EventDispatcher;
use crate::reply::INTERNAL_ERROR;
use crate::translate::TranslationGateway;

const SERVICE_NAME: &str = "Google Chat Translator Bot";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Invalid authorization header")]
    MissingBearer,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid event payload")]
    InvalidPayload,
    #[error("event handling failed: {0}")]
    Internal(String),
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MissingBearer | Self::InvalidToken => {
                (StatusCode::UNAUTHORIZED, json!({ "error": self.to_string() }))
            }
            Self::InvalidPayload => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            Self::Internal(detail) => {
                error!(error = %detail, "Error handling chat event");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "text": INTERNAL_ERROR }))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub struct AppState<V, G> {
    verifier: Arc<IdentityVerifier<V>>,
    dispatcher: Arc<EventDispatcher<G>>,
}

impl<V, G> AppState<V, G> {
    pub fn new(verifier: IdentityVerifier<V>, dispatcher: EventDispatcher<G>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl<V, G> Clone for AppState<V, G> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

pub fn router<V: TokenVerifier, G: TranslationGateway>(state: AppState<V, G>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/chat", post(handle_chat::<V, G>))
        .with_state(state)
}

/// Serves the bot on `0.0.0.0:<port>` until Ctrl-C or SIGTERM.
pub async fn serve<V: TokenVerifier, G: TranslationGateway>(
    port: u16,
    state: AppState<V, G>,
) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Google Chat Translator Bot listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

#[instrument(
    name = "gchat.webhook",
    skip_all,
    fields(event_type = tracing::field::Empty)
)]
async fn handle_chat<V: TokenVerifier, G: TranslationGateway>(
    State(state): State<AppState<V, G>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReplyPayload>, ChatError> {
    let parsed = serde_json::from_slice::<Value>(&body).ok();
    let event_type = parsed
        .as_ref()
        .and_then(|v| v.get("type"))
        .and_then(Value::as_str)
        .unwrap_or(EVENT_UNKNOWN);
    tracing::Span::current().record("event_type", event_type);
    info!("Received event: {event_type}");

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("Missing or non-bearer Authorization header");
            ChatError::MissingBearer
        })?;

    if !state.verifier.verify(token).await {
        return Err(ChatError::InvalidToken);
    }

    let value = parsed.ok_or_else(|| {
        warn!("Event body is not valid JSON");
        ChatError::InvalidPayload
    })?;
    let event = InboundEvent::from_value(&value);

    let dispatcher = Arc::clone(&state.dispatcher);
    let reply = tokio::spawn(async move { dispatcher.dispatch(&event).await })
        .await
        .map_err(|e| ChatError::Internal(e.to_string()))?;

    Ok(Json(reply))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = sigterm => {}
    }
    info!("Shutdown signal received");
}

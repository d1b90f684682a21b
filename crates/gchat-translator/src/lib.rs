//! # gchat-translator
//!
//! Google Chat bot that translates messages with Google Cloud Translation.
//!
//! ## How it works
//!
//! 1. Google Chat sends `POST /chat` with `Authorization: Bearer <ID token>`
//!    and a JSON interaction event.
//! 2. The token is verified against Google's published keys; its issuer must
//!    be `SERVICE_ACCOUNT_EMAIL` and its audience `https://chat.googleapis.com`.
//! 3. The event is routed by type:
//!    - `MESSAGE`: `@<bot> [to:<code>] <text>` is translated and the result
//!      is posted in the originating thread;
//!    - `ADDED_TO_SPACE`: a welcome text, longer for rooms;
//!    - `REMOVED_FROM_SPACE`: empty acknowledgement;
//!    - anything else: a fixed "don't understand" reply.
//! 4. Translation errors are answered in-chat with HTTP 200 so Google Chat
//!    does not retry them.
//!
//! ## Configuration (env vars)
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `GCP_PROJECT_ID` | — | Project owning the Translation API (required) |
//! | `SERVICE_ACCOUNT_EMAIL` | — | Expected token issuer (required) |
//! | `GOOGLE_APPLICATION_CREDENTIALS` | — | Service-account key file (required) |
//! | `DEFAULT_TARGET_LANGUAGE` | `ja` | Target when no `to:` directive is given |
//! | `BOT_NAME` | `translator` | Mention name without `@` |
//! | `PORT` | `8080` | HTTP listening port |
//! | `LOG_LEVEL` | `info` | Log filter when `RUST_LOG` is unset |
//! | `GOOGLE_CERTS_URL` | `https://www.googleapis.com/oauth2/v3/certs` | JWKS for Chat tokens |
//! | `TRANSLATE_API_BASE_URL` | `https://translation.googleapis.com` | Translation API endpoint |

pub mod auth;
pub mod command;
pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod env;
pub mod languages;
pub mod reply;
pub mod server;
pub mod translate;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use auth::{GoogleTokenVerifier, IdentityVerifier, TokenVerifier};
pub use config::TranslatorConfig;
pub use credentials::{ServiceAccountAuth, ServiceAccountKey};
pub use dispatcher::{BotSettings, EventDispatcher};
pub use server::{AppState, router, serve};
pub use translate::{GoogleTranslator, TranslationError, TranslationGateway};

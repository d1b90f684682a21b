//! Routes inbound Google Chat events to their handlers.

use gchat_types::{InboundEvent, MessagePayload, ReplyPayload, Space};
use tracing::{error, info, warn};

use crate::command::{extract_directive, strip_mention};
use crate::reply;
use crate::translate::TranslationGateway;

/// Values the handlers need from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    /// Mention name, without the leading `@`.
    pub bot_name: String,
    pub default_target_language: String,
}

pub struct EventDispatcher<G> {
    gateway: G,
    settings: BotSettings,
}

impl<G: TranslationGateway> EventDispatcher<G> {
    pub fn new(gateway: G, settings: BotSettings) -> Self {
        Self { gateway, settings }
    }

    /// Every event gets a reply; unknown types get a fixed explanation.
    pub async fn dispatch(&self, event: &InboundEvent) -> ReplyPayload {
        match event {
            InboundEvent::Message { message, .. } => self.handle_message(message).await,
            InboundEvent::AddedToSpace { space } => self.handle_added_to_space(space.as_ref()),
            InboundEvent::RemovedFromSpace { space } => {
                info!(
                    space = space.as_ref().and_then(|s| s.name.as_deref()).unwrap_or(""),
                    "Bot removed from space"
                );
                ReplyPayload::empty()
            }
            InboundEvent::Unknown { event_type } => {
                warn!(event_type = %event_type, "Unknown event type");
                ReplyPayload::text(reply::UNKNOWN_EVENT)
            }
        }
    }

    pub async fn handle_message(&self, message: &MessagePayload) -> ReplyPayload {
        let thread = message.thread.clone();
        let text = strip_mention(&message.text, &self.settings.bot_name);

        if text.is_empty() {
            return ReplyPayload::in_thread(thread, reply::usage(&self.settings.bot_name));
        }

        let request = extract_directive(&text);
        let target = request.target_language.as_deref();

        let (translated, source_language) = tokio::join!(
            self.gateway.translate(&request.text, target),
            self.gateway.detect_language(&request.text),
        );

        match translated {
            Ok(translated) => {
                let resolved = target.unwrap_or(self.settings.default_target_language.as_str());
                info!(source = %source_language, target = %resolved, "Translated message");
                ReplyPayload::in_thread(
                    thread,
                    reply::translation(&source_language, resolved, &translated),
                )
            }
            Err(e) => {
                error!(error = %e, "Translation error");
                ReplyPayload::in_thread(thread, reply::translation_failed(&e))
            }
        }
    }

    pub fn handle_added_to_space(&self, space: Option<&Space>) -> ReplyPayload {
        let default_language = &self.settings.default_target_language;
        let text = if space.is_some_and(Space::is_room) {
            reply::room_welcome(&self.settings.bot_name, default_language)
        } else {
            reply::direct_welcome(default_language)
        };
        ReplyPayload::text(text)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

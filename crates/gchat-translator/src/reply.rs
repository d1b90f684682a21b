//! Reply texts the bot sends back to Google Chat.

use std::fmt::Display;

pub const UNKNOWN_EVENT: &str = "I don't understand this event type.";

/// Sent with HTTP 500. Never includes the underlying error.
pub const INTERNAL_ERROR: &str = "Sorry, an error occurred while processing your request.";

const FEATURED_LANGUAGES: &str = "en, es, fr, de, it, pt, ja, ko, zh, ar, hi, ru";

pub fn usage(bot_name: &str) -> String {
    format!(
        "Please provide text to translate. Usage: `@{bot_name} <text>` or `@{bot_name} to:<language> <text>`"
    )
}

pub fn translation(source_language: &str, target_language: &str, translated: &str) -> String {
    format!("**Translation ({source_language} → {target_language}):**\n{translated}")
}

pub fn translation_failed(error: &impl Display) -> String {
    format!("Sorry, I couldn't translate that. Error: {error}")
}

/// Multi-line help posted when the bot joins a room.
pub fn room_welcome(bot_name: &str, default_language: &str) -> String {
    format!(
        "Hello! I'm the Google Chat Translator Bot.\n\n\
         **How to use me:**\n\
         • `@{bot_name} <text>` - Translate to {default_language}\n\
         • `@{bot_name} to:es <text>` - Translate to Spanish\n\
         • `@{bot_name} to:fr <text>` - Translate to French\n\n\
         I support many languages including: {FEATURED_LANGUAGES}"
    )
}

/// Short greeting for direct messages and any other space type.
pub fn direct_welcome(default_language: &str) -> String {
    format!(
        "Hello! Send me any text and I'll translate it to {default_language}. \
         Use `to:<language_code>` to specify a target language."
    )
}

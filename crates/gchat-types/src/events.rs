use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const EVENT_MESSAGE: &str = "MESSAGE";
pub const EVENT_ADDED_TO_SPACE: &str = "ADDED_TO_SPACE";
pub const EVENT_REMOVED_FROM_SPACE: &str = "REMOVED_FROM_SPACE";
pub const EVENT_UNKNOWN: &str = "UNKNOWN";

// ── Descriptors ─────────────────────────────────────────────────────────────

/// Kind of space the bot lives in. Only the welcome text depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    /// Named room with several members.
    Room,
    /// One-to-one conversation with the bot (`DM`).
    DirectMessage,
    /// Anything else Google Chat may send (`SPACE`, `GROUP_CHAT`, ...).
    Other,
}

impl SpaceType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ROOM" => Self::Room,
            "DM" => Self::DirectMessage,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    /// Resource name, e.g. `spaces/AAAA`.
    pub name: Option<String>,
    pub space_type: Option<SpaceType>,
}

impl Space {
    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Some(Self {
            name: str_field(value, "name"),
            space_type: value
                .get("type")
                .and_then(Value::as_str)
                .map(SpaceType::parse),
        })
    }

    pub fn is_room(&self) -> bool {
        self.space_type == Some(SpaceType::Room)
    }
}

/// Thread reference echoed back so replies land in the originating thread.
///
/// Fields other than string `name`/`threadKey` are kept in `extra` so the
/// reply carries the inbound object unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Thread {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        let mut extra = fields.clone();
        let name = take_str(&mut extra, "name");
        let thread_key = take_str(&mut extra, "threadKey");
        Self {
            name,
            thread_key,
            extra,
        }
    }
}

/// Removes `key` only when it holds a string.
fn take_str(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    let value = fields.get(key)?.as_str()?.to_owned();
    fields.remove(key);
    Some(value)
}

/// Text of a `MESSAGE` event plus the thread it was posted in.
///
/// `text` may be empty: Google Chat omits it for attachments-only messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePayload {
    pub text: String,
    pub thread: Thread,
}

impl MessagePayload {
    fn from_value(value: &Value) -> Self {
        Self {
            text: str_field(value, "text").unwrap_or_default(),
            thread: value
                .get("thread")
                .map(Thread::from_value)
                .unwrap_or_default(),
        }
    }
}

// ── Inbound events ──────────────────────────────────────────────────────────

/// An interaction event POSTed by Google Chat to the bot endpoint.
///
/// Built with [`InboundEvent::from_value`], which never fails: absent or
/// wrongly typed fields degrade to empty values so handlers never re-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Message {
        message: MessagePayload,
        space: Option<Space>,
    },
    AddedToSpace {
        space: Option<Space>,
    },
    RemovedFromSpace {
        space: Option<Space>,
    },
    Unknown {
        /// Raw `type` as received, or `UNKNOWN` when missing.
        event_type: String,
    },
}

impl InboundEvent {
    pub fn from_value(value: &Value) -> Self {
        let space = value.get("space").and_then(Space::from_value);

        match value.get("type").and_then(Value::as_str) {
            Some(EVENT_MESSAGE) => Self::Message {
                message: value
                    .get("message")
                    .map(MessagePayload::from_value)
                    .unwrap_or_default(),
                space,
            },
            Some(EVENT_ADDED_TO_SPACE) => Self::AddedToSpace { space },
            Some(EVENT_REMOVED_FROM_SPACE) => Self::RemovedFromSpace { space },
            Some(other) => Self::Unknown {
                event_type: other.to_string(),
            },
            None => Self::Unknown {
                event_type: EVENT_UNKNOWN.to_string(),
            },
        }
    }

    /// Event type as Google Chat names it, for logs.
    pub fn event_type(&self) -> &str {
        match self {
            Self::Message { .. } => EVENT_MESSAGE,
            Self::AddedToSpace { .. } => EVENT_ADDED_TO_SPACE,
            Self::RemovedFromSpace { .. } => EVENT_REMOVED_FROM_SPACE,
            Self::Unknown { event_type } => event_type,
        }
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

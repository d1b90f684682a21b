use serde::{Deserialize, Serialize};

use crate::events::Thread;

/// Synchronous response body for a Google Chat interaction event.
///
/// Serializes to `{}` when both fields are absent, which Chat treats as a
/// silent acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ReplyPayload {
    /// Silent acknowledgement.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Plain text reply posted at the top level of the space.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            thread: None,
            text: Some(text.into()),
        }
    }

    /// Text reply posted into `thread`.
    pub fn in_thread(thread: Thread, text: impl Into<String>) -> Self {
        Self {
            thread: Some(thread),
            text: Some(text.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.thread.is_none() && self.text.is_none()
    }
}

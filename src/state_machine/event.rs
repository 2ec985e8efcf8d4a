//! Events that can occur in a conversation

use chrono::{DateTime, Utc};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserMessage {
        text: String,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },

    // Timer events
    ReplyReady {
        ticket: u64,
        generation: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage {
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn reset() -> Self {
        Event::Reset { at: Utc::now() }
    }
}

//! Conversation state types

use crate::assistant::Reply;
use crate::conversation::{Conversation, Message};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay before a reply is delivered, unless configured otherwise
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// A reply that has been decided but not yet delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReply {
    pub ticket: u64,
    pub reply: Reply,
}

/// Conversation state
///
/// The reply to a user message is computed when the message arrives, from
/// the history as it stood before that message; it is only appended once
/// its timer fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvState {
    pub conversation: Conversation,
    /// Replies waiting on their delay, oldest first
    pub pending: Vec<PendingReply>,
    /// Bumped on every reset; replies scheduled under an older
    /// generation are dropped on arrival
    pub generation: u64,
    pub next_ticket: u64,
}

impl ConvState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            conversation: Conversation::new(now),
            pending: Vec::new(),
            generation: 0,
            next_ticket: 1,
        }
    }

    /// The assistant is "typing" while any reply is outstanding
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }
}

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    pub conversation_id: String,
    pub reply_delay: Duration,
}

impl ConvContext {
    pub fn new(conversation_id: impl Into<String>, reply_delay: Duration) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            reply_delay,
        }
    }
}

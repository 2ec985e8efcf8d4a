//! Effects produced by state transitions

use crate::conversation::Message;
use std::time::Duration;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A message was appended to the history
    AppendMessage { message: Message },

    /// Deliver the pending reply `ticket` after `delay`
    ScheduleReply {
        ticket: u64,
        generation: u64,
        delay: Duration,
    },

    /// Abort every scheduled reply timer
    CancelPendingReplies,

    /// Typing indicator changed (or was re-asserted)
    NotifyTyping { typing: bool },

    /// History was replaced with a fresh greeting
    NotifyReset { messages: Vec<Message> },
}

impl Effect {
    pub fn append(message: Message) -> Self {
        Effect::AppendMessage { message }
    }

    pub fn typing(typing: bool) -> Self {
        Effect::NotifyTyping { typing }
    }
}

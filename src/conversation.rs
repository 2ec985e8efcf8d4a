//! Conversation history types
//!
//! A conversation is an append-only list of messages. Messages are never
//! mutated or removed once pushed; resetting a conversation replaces it
//! with a freshly seeded one.

use crate::assistant::Reply;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting every conversation starts with
pub const GREETING: &str =
    "Hi there! I'm your YouTube Learning Assistant. What would you like to learn today?";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Bot replies whose text embeds a `[label](path)` reference
    #[serde(default)]
    pub has_link: bool,
}

impl Message {
    pub fn user(id: u64, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            sender: Sender::User,
            text: text.into(),
            timestamp,
            has_link: false,
        }
    }

    pub fn bot(id: u64, text: impl Into<String>, has_link: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            sender: Sender::Bot,
            text: text.into(),
            timestamp,
            has_link,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

/// Ordered chat history with its own id sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    /// Start a conversation seeded with the greeting
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![Message::bot(1, GREETING, false, now)],
            next_id: 2,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_user(&mut self, text: impl Into<String>, now: DateTime<Utc>) -> Message {
        let id = self.take_id();
        let message = Message::user(id, text, now);
        self.messages.push(message.clone());
        message
    }

    pub fn push_reply(&mut self, reply: &Reply, now: DateTime<Utc>) -> Message {
        let id = self.take_id();
        let message = Message::bot(id, reply.text.clone(), reply.has_link, now);
        self.messages.push(message.clone());
        message
    }
}

/// Empty or whitespace-only input is never submitted
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

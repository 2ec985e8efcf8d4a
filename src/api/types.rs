//! API request and response types

use crate::assistant::{format_links, Segment, Topic};
use crate::conversation::{Message, Sender};
use crate::runtime::Snapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message as sent to the browser
///
/// Linked bot replies come pre-split into segments so the page never parses
/// the link syntax itself.
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub has_link: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            text: message.text.clone(),
            timestamp: message.timestamp,
            has_link: message.has_link,
            segments: message.has_link.then(|| format_links(&message.text)),
        }
    }
}

pub fn message_views(messages: &[Message]) -> Vec<MessageView> {
    messages.iter().map(MessageView::from).collect()
}

/// Response with a conversation's messages
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub messages: Vec<MessageView>,
    pub typing: bool,
}

impl ConversationResponse {
    pub fn new(id: String, snapshot: &Snapshot) -> Self {
        Self {
            id,
            messages: message_views(&snapshot.messages),
            typing: snapshot.typing,
        }
    }
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// False when the input was blank and nothing was sent
    pub queued: bool,
}

/// Response for reset action
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub ok: bool,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Prior message supplied to the stateless matcher
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub has_link: bool,
}

/// Request to run the matcher without a stored conversation
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    /// Defaults to just the greeting
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub text: String,
    pub has_link: bool,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Serialize)]
pub struct TopicInfo {
    pub topic: Topic,
    pub name: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<TopicInfo>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

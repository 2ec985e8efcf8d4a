//! Runtime for executing conversations
//!
//! Every conversation runs as its own task. The manager keeps its handle
//! until the page deletes it or no stream has been attached for the idle
//! timeout.

mod executor;

pub use executor::ConversationRuntime;

use crate::conversation::Message;
use crate::state_machine::{ConvContext, ConvState, Event};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::time::Instant;

/// How long a conversation may go without a stream subscriber
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

type HandleMap = RwLock<HashMap<String, ConversationHandle>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Conversation not found: {0}")]
    NotFound(String),
    #[error("Conversation {0} is no longer running")]
    Closed(String),
}

/// Events sent to stream subscribers
#[derive(Debug, Clone)]
pub enum SseEvent {
    Init { snapshot: Snapshot },
    Message { message: Message },
    Typing { typing: bool },
    Reset { messages: Vec<Message> },
    Error { message: String },
}

/// Point-in-time view of a conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub messages: Vec<Message>,
    pub typing: bool,
}

impl Snapshot {
    pub fn of(state: &ConvState) -> Self {
        Self {
            messages: state.messages().to_vec(),
            typing: state.is_typing(),
        }
    }
}

/// Handle to interact with a running conversation
pub struct ConversationHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub broadcast_tx: broadcast::Sender<SseEvent>,
    pub snapshot_rx: watch::Receiver<Snapshot>,
}

/// Manager for all conversation runtimes
pub struct RuntimeManager {
    reply_delay: Duration,
    idle_timeout: Duration,
    runtimes: Arc<HandleMap>,
}

impl RuntimeManager {
    pub fn new(reply_delay: Duration) -> Self {
        Self::with_idle_timeout(reply_delay, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(reply_delay: Duration, idle_timeout: Duration) -> Self {
        Self {
            reply_delay,
            idle_timeout,
            runtimes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start a new conversation seeded with the greeting
    pub async fn create(&self) -> (String, Snapshot) {
        let id = uuid::Uuid::new_v4().to_string();
        let context = ConvContext::new(&id, self.reply_delay);
        let state = ConvState::new(Utc::now());
        let snapshot = Snapshot::of(&state);

        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot.clone());

        let runtime = ConversationRuntime::new(
            context,
            state,
            event_rx,
            event_tx.downgrade(),
            broadcast_tx.clone(),
            snapshot_tx,
        );

        let conv_id = id.clone();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(conv_id = %conv_id, "Conversation runtime finished");
        });

        self.runtimes.write().await.insert(
            id.clone(),
            ConversationHandle {
                event_tx,
                broadcast_tx: broadcast_tx.clone(),
                snapshot_rx,
            },
        );
        tracing::info!(conv_id = %id, "Conversation created");

        tokio::spawn(reap_when_idle(
            Arc::downgrade(&self.runtimes),
            id.clone(),
            broadcast_tx,
            self.idle_timeout,
        ));

        (id, snapshot)
    }

    /// Send an event to a conversation
    pub async fn send_event(
        &self,
        conversation_id: &str,
        event: Event,
    ) -> Result<(), RuntimeError> {
        let event_tx = {
            let runtimes = self.runtimes.read().await;
            let handle = runtimes
                .get(conversation_id)
                .ok_or_else(|| RuntimeError::NotFound(conversation_id.to_string()))?;
            handle.event_tx.clone()
        };
        event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::Closed(conversation_id.to_string()))
    }

    /// Current messages and typing indicator
    pub async fn snapshot(&self, conversation_id: &str) -> Result<Snapshot, RuntimeError> {
        let runtimes = self.runtimes.read().await;
        let handle = runtimes
            .get(conversation_id)
            .ok_or_else(|| RuntimeError::NotFound(conversation_id.to_string()))?;
        let snapshot = handle.snapshot_rx.borrow().clone();
        Ok(snapshot)
    }

    /// Subscribe to conversation updates
    ///
    /// The snapshot is taken after subscribing, so no update falls between
    /// the two.
    pub async fn subscribe(
        &self,
        conversation_id: &str,
    ) -> Result<(Snapshot, broadcast::Receiver<SseEvent>), RuntimeError> {
        let runtimes = self.runtimes.read().await;
        let handle = runtimes
            .get(conversation_id)
            .ok_or_else(|| RuntimeError::NotFound(conversation_id.to_string()))?;
        let rx = handle.broadcast_tx.subscribe();
        let snapshot = handle.snapshot_rx.borrow().clone();
        Ok((snapshot, rx))
    }

    /// Drop a conversation; its runtime stops once the handle is gone
    pub async fn remove(&self, conversation_id: &str) -> Result<(), RuntimeError> {
        if self.runtimes.write().await.remove(conversation_id).is_none() {
            return Err(RuntimeError::NotFound(conversation_id.to_string()));
        }
        tracing::info!(conv_id = %conversation_id, "Conversation removed");
        Ok(())
    }
}

/// Drop a conversation once nothing has streamed it for `idle_timeout`
///
/// The clock starts at creation, so a conversation that is never opened
/// is reaped too. Removing the handle ends the runtime task.
async fn reap_when_idle(
    runtimes: Weak<HandleMap>,
    id: String,
    broadcast_tx: broadcast::Sender<SseEvent>,
    idle_timeout: Duration,
) {
    let tick = (idle_timeout / 4).max(Duration::from_millis(10));
    let mut idle_since = Instant::now();

    loop {
        tokio::time::sleep(tick).await;
        let Some(runtimes) = runtimes.upgrade() else {
            return;
        };
        if !runtimes.read().await.contains_key(&id) {
            return;
        }
        if broadcast_tx.receiver_count() > 0 {
            idle_since = Instant::now();
            continue;
        }
        if idle_since.elapsed() < idle_timeout {
            continue;
        }

        if runtimes.write().await.remove(&id).is_some() {
            tracing::info!(conv_id = %id, "Idle conversation reaped");
        }
        return;
    }
}

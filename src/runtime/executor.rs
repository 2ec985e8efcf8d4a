//! Conversation runtime executor

use super::{SseEvent, Snapshot};
use crate::state_machine::{transition, ConvContext, ConvState, Effect, Event};
use chrono::Utc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Applies events to one conversation and carries out the resulting effects
pub struct ConversationRuntime {
    context: ConvContext,
    state: ConvState,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so that dropping the manager's handle ends the event loop
    event_tx: mpsc::WeakSender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    snapshot_tx: watch::Sender<Snapshot>,
    /// Token to cancel scheduled reply timers
    reply_cancel_token: CancellationToken,
}

impl ConversationRuntime {
    pub fn new(
        context: ConvContext,
        state: ConvState,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        broadcast_tx: broadcast::Sender<SseEvent>,
        snapshot_tx: watch::Sender<Snapshot>,
    ) -> Self {
        Self {
            context,
            state,
            event_rx,
            event_tx,
            broadcast_tx,
            snapshot_tx,
            reply_cancel_token: CancellationToken::new(),
        }
    }

    pub async fn run(mut self) {
        tracing::info!(conv_id = %self.context.conversation_id, "Starting conversation runtime");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        self.reply_cancel_token.cancel();
        tracing::info!(conv_id = %self.context.conversation_id, "Conversation runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    conv_id = %self.context.conversation_id,
                    error = %e,
                    "Rejected event"
                );
                let _ = self.broadcast_tx.send(SseEvent::Error {
                    message: e.to_string(),
                });
                return;
            }
        };

        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
        self.snapshot_tx.send_replace(Snapshot::of(&self.state));
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { message } => {
                tracing::debug!(
                    conv_id = %self.context.conversation_id,
                    message_id = message.id,
                    sender = ?message.sender,
                    has_link = message.has_link,
                    "Message appended"
                );
                let _ = self.broadcast_tx.send(SseEvent::Message { message });
            }

            Effect::ScheduleReply {
                ticket,
                generation,
                delay,
            } => {
                let event_tx = self.event_tx.clone();
                let cancel = self.reply_cancel_token.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        () = tokio::time::sleep(delay) => {
                            if let Some(tx) = event_tx.upgrade() {
                                let _ = tx
                                    .send(Event::ReplyReady { ticket, generation, at: Utc::now() })
                                    .await;
                            }
                        }
                    }
                });
            }

            Effect::CancelPendingReplies => {
                let token =
                    std::mem::replace(&mut self.reply_cancel_token, CancellationToken::new());
                token.cancel();
            }

            Effect::NotifyTyping { typing } => {
                let _ = self.broadcast_tx.send(SseEvent::Typing { typing });
            }

            Effect::NotifyReset { messages } => {
                tracing::info!(conv_id = %self.context.conversation_id, "Conversation reset");
                let _ = self.broadcast_tx.send(SseEvent::Reset { messages });
            }
        }
    }
}

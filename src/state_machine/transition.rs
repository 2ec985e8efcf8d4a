//! Pure state transition function

use super::state::PendingReply;
use super::{ConvContext, ConvState, Effect, Event};
use crate::assistant::respond;
use crate::conversation::{is_blank, Conversation};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// State unchanged, nothing to do
    fn unchanged(state: &ConvState) -> Self {
        Self::new(state.clone())
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Reply {0} is not pending")]
    UnknownReply(u64),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs, it always produces the same outputs, with no I/O
/// side effects. Timestamps come in on the events.
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // Blank input never reaches the history or the assistant
        Event::UserMessage { text, .. } if is_blank(&text) => {
            Ok(TransitionResult::unchanged(state))
        }

        // Sends are accepted while replies are pending; each gets its own timer
        Event::UserMessage { text, at } => {
            let reply = respond(state.messages(), &text);

            let mut next = state.clone();
            let message = next.conversation.push_user(text, at);
            let ticket = next.next_ticket;
            next.next_ticket += 1;
            next.pending.push(PendingReply { ticket, reply });
            let generation = next.generation;

            Ok(TransitionResult::new(next)
                .with_effect(Effect::append(message))
                .with_effect(Effect::ScheduleReply {
                    ticket,
                    generation,
                    delay: context.reply_delay,
                })
                .with_effect(Effect::typing(true)))
        }

        // Timer from before a reset
        Event::ReplyReady { generation, .. } if generation < state.generation => {
            Ok(TransitionResult::unchanged(state))
        }

        Event::ReplyReady { generation, .. } if generation > state.generation => {
            Err(TransitionError::InvalidTransition(format!(
                "reply from generation {generation} while at {}",
                state.generation
            )))
        }

        Event::ReplyReady { ticket, at, .. } => {
            let Some(index) = state.pending.iter().position(|p| p.ticket == ticket) else {
                return Err(TransitionError::UnknownReply(ticket));
            };

            let mut next = state.clone();
            let pending = next.pending.remove(index);
            let message = next.conversation.push_reply(&pending.reply, at);
            let typing = next.is_typing();

            Ok(TransitionResult::new(next)
                .with_effect(Effect::append(message))
                .with_effect(Effect::typing(typing)))
        }

        Event::Reset { at } => {
            let next = ConvState {
                conversation: Conversation::new(at),
                pending: Vec::new(),
                generation: state.generation + 1,
                next_ticket: state.next_ticket,
            };
            let messages = next.messages().to_vec();

            Ok(TransitionResult::new(next)
                .with_effect(Effect::CancelPendingReplies)
                .with_effect(Effect::NotifyReset { messages })
                .with_effect(Effect::typing(false)))
        }
    }
}

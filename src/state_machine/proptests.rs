//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::conversation::Sender;
use chrono::Utc;
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ConvContext {
    ConvContext::new("test-conv", Duration::ZERO)
}

fn apply(state: &ConvState, event: Event) -> ConvState {
    transition(state, &test_context(), event)
        .expect("transition should succeed")
        .new_state
}

fn deliver(state: &ConvState, ticket: u64) -> ConvState {
    apply(
        state,
        Event::ReplyReady {
            ticket,
            generation: state.generation,
            at: Utc::now(),
        },
    )
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}"
}

fn arb_keyword() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("machine learning".to_string()),
        Just("JavaScript".to_string()),
        Just("js".to_string()),
        Just("guitar".to_string()),
        Just("music".to_string()),
        Just("beginner".to_string()),
        Just("expert".to_string()),
        Just("week".to_string()),
        Just("cooking".to_string()),
    ]
}

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{1,30}".prop_filter("non-blank", |s| !s.trim().is_empty()),
        (arb_keyword(), "[a-z ]{0,10}").prop_map(|(k, tail)| format!("{k}{tail}")),
    ]
}

#[derive(Debug, Clone)]
enum Action {
    Send(String),
    DeliverOldest,
    Reset,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => arb_input().prop_map(Action::Send),
        3 => Just(Action::DeliverOldest),
        1 => Just(Action::Reset),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn blank_input_never_changes_state(
        inputs in proptest::collection::vec(arb_input(), 0..4),
        blank in arb_blank(),
    ) {
        let mut state = ConvState::new(Utc::now());
        for input in inputs {
            state = apply(&state, Event::user_message(input));
        }

        let result = transition(&state, &test_context(), Event::user_message(blank)).unwrap();
        prop_assert_eq!(&result.new_state, &state);
        prop_assert!(result.effects.is_empty());
    }

    #[test]
    fn each_send_appends_one_user_message(input in arb_input()) {
        let state = ConvState::new(Utc::now());
        let result =
            transition(&state, &test_context(), Event::user_message(input.clone())).unwrap();

        prop_assert_eq!(result.new_state.messages().len(), state.messages().len() + 1);
        let last = result.new_state.messages().last().unwrap();
        prop_assert_eq!(last.sender, Sender::User);
        prop_assert_eq!(&last.text, &input);
        prop_assert_eq!(result.new_state.pending.len(), 1);
    }

    #[test]
    fn typing_iff_reply_pending(actions in proptest::collection::vec(arb_action(), 0..25)) {
        let mut state = ConvState::new(Utc::now());
        let mut users = 0usize;
        let mut bots = 0usize;

        for action in actions {
            match action {
                Action::Send(text) => {
                    state = apply(&state, Event::user_message(text));
                    users += 1;
                }
                Action::DeliverOldest => {
                    if let Some(first) = state.pending.first() {
                        let ticket = first.ticket;
                        state = deliver(&state, ticket);
                        bots += 1;
                    }
                }
                Action::Reset => {
                    state = apply(&state, Event::reset());
                    users = 0;
                    bots = 0;
                }
            }

            prop_assert_eq!(state.is_typing(), !state.pending.is_empty());
            // greeting + one per send + one per delivered reply
            prop_assert_eq!(state.messages().len(), 1 + users + bots);
            prop_assert_eq!(state.pending.len(), users - bots);
        }
    }

    #[test]
    fn ids_strictly_increase(actions in proptest::collection::vec(arb_action(), 0..25)) {
        let mut state = ConvState::new(Utc::now());
        for action in actions {
            state = match action {
                Action::Send(text) => apply(&state, Event::user_message(text)),
                Action::DeliverOldest => match state.pending.first().map(|p| p.ticket) {
                    Some(ticket) => deliver(&state, ticket),
                    None => state,
                },
                Action::Reset => apply(&state, Event::reset()),
            };
        }

        let ids: Vec<u64> = state.messages().iter().map(|m| m.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn stale_replies_are_ignored_after_reset(
        inputs in proptest::collection::vec(arb_input(), 1..5),
    ) {
        let mut state = ConvState::new(Utc::now());
        for input in inputs {
            state = apply(&state, Event::user_message(input));
        }
        let stale: Vec<(u64, u64)> = state
            .pending
            .iter()
            .map(|p| (p.ticket, state.generation))
            .collect();

        let reset = apply(&state, Event::reset());
        for (ticket, generation) in stale {
            let result = transition(
                &reset,
                &test_context(),
                Event::ReplyReady { ticket, generation, at: Utc::now() },
            ).unwrap();
            prop_assert_eq!(&result.new_state, &reset);
            prop_assert!(result.effects.is_empty());
        }
    }

    #[test]
    fn follow_ups_always_link(
        topic in prop_oneof![Just("machine learning"), Just("js"), Just("guitar")],
        detail in arb_input(),
    ) {
        let state = ConvState::new(Utc::now());
        let sent = apply(&state, Event::user_message(topic));
        let answered = deliver(&sent, 1);
        let follow = apply(&answered, Event::user_message(detail));
        let done = deliver(&follow, 2);

        let last = done.messages().last().unwrap();
        prop_assert!(last.is_bot());
        prop_assert!(last.has_link);
        prop_assert!(last.text.starts_with("Thanks for sharing more details!"), "{}", last.text);
    }
}

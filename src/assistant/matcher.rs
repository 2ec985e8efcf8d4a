//! Reply selection
//!
//! The first linked bot reply in a conversation pins its topic; once the
//! history holds more than the greeting and one exchange, every later
//! message is treated as extra detail about that topic.

use super::topic::{Topic, LEARNING_HUB_PATH};
use crate::conversation::Message;
use serde::{Deserialize, Serialize};

/// Reply given when no topic can be recognized
pub const CLARIFYING_REPLY: &str = "I'd be happy to help you learn that! To create a personalized learning path for you, could you provide more details about what specific topic you're interested in? It would also help to know your current skill level and learning goals.";

const BEGINNER_CUES: &[&str] = &["beginner", "new to", "starting", "basic"];
const ADVANCED_CUES: &[&str] = &["advanced", "experienced", "expert"];
const TIMEFRAME_CUES: &[&str] = &["hour", "day", "week", "month"];

const BEGINNER_FOCUS: &str =
    " I've focused on beginner-friendly content that will help you build a solid foundation.";
const ADVANCED_FOCUS: &str =
    " I've included more advanced topics that will challenge your existing knowledge.";
const SCHEDULE_ADJUSTED: &str = " The schedule has been adjusted to fit your available time.";

/// Assistant output for one user turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    /// True when `text` embeds a `[label](path)` span
    pub has_link: bool,
}

/// Produce the reply to `input` given the history as it stood when the
/// user sent it (the new user message itself is not part of `history`).
pub fn respond(history: &[Message], input: &str) -> Reply {
    let is_follow_up = history.len() > 2;
    let first_linked = history.iter().find(|m| m.is_bot() && m.has_link);

    match first_linked {
        Some(linked) if is_follow_up => follow_up(&linked.text, input),
        _ => first_contact(input),
    }
}

fn first_contact(input: &str) -> Reply {
    match Topic::detect(&input.to_lowercase()) {
        Some(topic) => Reply {
            text: format!(
                "Great! I have created the following learning path for you [here]({}). To tailor your learning path better to your specific needs, feel free to share more details such as your learning goal, your current knowledge level, or how long you want to learn for.",
                topic.path()
            ),
            has_link: true,
        },
        None => Reply {
            text: CLARIFYING_REPLY.to_string(),
            has_link: false,
        },
    }
}

fn follow_up(linked_text: &str, input: &str) -> Reply {
    // Unknown topics read "your topic learning path" and point at the hub
    let (name, path) = Topic::mentioned_in(linked_text)
        .map_or(("topic", LEARNING_HUB_PATH), |t| (t.display_name(), t.path()));

    let lowered = input.to_lowercase();
    let beginner = contains_any(&lowered, BEGINNER_CUES);
    let advanced = contains_any(&lowered, ADVANCED_CUES);
    let timeframe = contains_any(&lowered, TIMEFRAME_CUES);

    let mut text = format!(
        "Thanks for sharing more details! I've updated your {name} learning path [here]({path})."
    );
    if beginner && !advanced {
        text.push_str(BEGINNER_FOCUS);
    } else if advanced {
        text.push_str(ADVANCED_FOCUS);
    }
    if timeframe {
        text.push_str(SCHEDULE_ADJUSTED);
    }

    Reply {
        text,
        has_link: true,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

//! Canned learning assistant
//!
//! Keyword matching over the chat history, shared by every surface that
//! talks to the assistant (the page widgets and the stateless JSON API).

mod links;
mod matcher;
mod topic;

pub use links::{format_links, Segment};
pub use matcher::{respond, Reply};
pub use topic::Topic;

//! Markdown-style link spans in assistant replies

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `[label](path)`
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("fail to create a regex for links")
});

/// A piece of rendered message text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String },
    Link { label: String, path: String },
}

impl Segment {
    fn text(text: &str) -> Self {
        Segment::Text {
            text: text.to_string(),
        }
    }
}

/// Split `text` into plain and link segments, left to right.
///
/// Text without any `[label](path)` span comes back as a single text
/// segment holding the original string.
pub fn format_links(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in LINK_PATTERN.captures_iter(text) {
        let (Some(whole), Some(label), Some(path)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::text(text.get(last..whole.start()).unwrap_or_default()));
        }
        segments.push(Segment::Link {
            label: label.as_str().to_string(),
            path: path.as_str().to_string(),
        });
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::text(text.get(last..).unwrap_or_default()));
    }
    if segments.is_empty() {
        segments.push(Segment::text(text));
    }
    segments
}

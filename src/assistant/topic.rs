//! Topics the assistant can build a learning path for

use serde::{Deserialize, Serialize};

/// Landing page used when a follow-up cannot name its topic
pub const LEARNING_HUB_PATH: &str = "/learning";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    MachineLearning,
    Javascript,
    Guitar,
}

impl Topic {
    /// Matching priority: earlier topics win when several match
    pub const ALL: [Topic; 3] = [Topic::MachineLearning, Topic::Javascript, Topic::Guitar];

    /// Last path segment of the topic's learning-path page
    pub fn slug(self) -> &'static str {
        match self {
            Topic::MachineLearning => "machinelearning",
            Topic::Javascript => "javascript",
            Topic::Guitar => "guitar",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Topic::MachineLearning => "/learning-paths/machinelearning",
            Topic::Javascript => "/learning-paths/javascript",
            Topic::Guitar => "/learning-paths/guitar",
        }
    }

    /// Name used inside follow-up replies
    pub fn display_name(self) -> &'static str {
        match self {
            Topic::MachineLearning => "Machine learning",
            Topic::Javascript => "JavaScript",
            Topic::Guitar => "Guitar",
        }
    }

    /// Lowercase keywords that select this topic from user input
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::MachineLearning => &["machine learning"],
            Topic::Javascript => &["javascript", "js"],
            Topic::Guitar => &["guitar", "music"],
        }
    }

    pub fn from_slug(slug: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.slug() == slug)
    }

    /// First topic whose keyword occurs in the lowercased input
    pub fn detect(lowered_input: &str) -> Option<Topic> {
        Topic::ALL
            .into_iter()
            .find(|t| t.keywords().iter().any(|k| lowered_input.contains(k)))
    }

    /// Recover the topic a previously sent reply was about
    ///
    /// Checks the topic's name and its path slug, in priority order.
    pub fn mentioned_in(reply_text: &str) -> Option<Topic> {
        let lowered = reply_text.to_lowercase();
        Topic::ALL.into_iter().find(|t| {
            lowered.contains(&t.display_name().to_lowercase()) || lowered.contains(t.path())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_priority() {
        assert_eq!(
            Topic::detect("machine learning or javascript?"),
            Some(Topic::MachineLearning)
        );
        assert_eq!(Topic::detect("node js please"), Some(Topic::Javascript));
        assert_eq!(Topic::detect("javascript and guitar"), Some(Topic::Javascript));
        assert_eq!(Topic::detect("some music theory"), Some(Topic::Guitar));
        assert_eq!(Topic::detect("cooking"), None);
    }

    #[test]
    fn test_mentioned_in_uses_path_or_name() {
        assert_eq!(
            Topic::mentioned_in("see [here](/learning-paths/machinelearning)."),
            Some(Topic::MachineLearning)
        );
        assert_eq!(
            Topic::mentioned_in("your JavaScript learning path"),
            Some(Topic::Javascript)
        );
        assert_eq!(Topic::mentioned_in("nothing relevant"), None);
    }

    #[test]
    fn test_slug_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_slug(topic.slug()), Some(topic));
            assert!(topic.path().ends_with(topic.slug()));
        }
        assert_eq!(Topic::from_slug("cooking"), None);
    }
}

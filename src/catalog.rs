//! Sample content shown on the learning hub page

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LearningPathSummary {
    pub id: u32,
    pub title: &'static str,
    /// Percent complete
    pub progress: u8,
    pub last_accessed: &'static str,
    pub total_videos: u32,
    pub completed_videos: u32,
    pub path: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub title: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub topics: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub current_paths: Vec<LearningPathSummary>,
    pub suggestions: Vec<Suggestion>,
    pub categories: Vec<Category>,
}

pub fn catalog() -> Catalog {
    Catalog {
        current_paths: vec![
            LearningPathSummary {
                id: 1,
                title: "Introduction to Machine Learning",
                progress: 8,
                last_accessed: "2 days ago",
                total_videos: 12,
                completed_videos: 1,
                path: "/learning-paths/machinelearning",
            },
            LearningPathSummary {
                id: 2,
                title: "American History Deep Dive",
                progress: 60,
                last_accessed: "Yesterday",
                total_videos: 8,
                completed_videos: 5,
                // There is no history page; "Continue Learning" lands on ML
                path: "/learning-paths/machinelearning",
            },
        ],
        suggestions: vec![
            Suggestion {
                title: "Finding the Right Path",
                description: "Ask the Learning Assistant to suggest courses based on your skill level and goals.",
                example: "I want to learn JavaScript for web development.",
            },
            Suggestion {
                title: "Track Your Progress",
                description: "The Learning Assistant can tell you where you left off and what to study next.",
                example: "What's my progress in the Python course?",
            },
            Suggestion {
                title: "Get Personalized Recommendations",
                description: "Share your learning preferences to get tailored content suggestions.",
                example: "I have 30 minutes daily to practice guitar.",
            },
        ],
        categories: vec![
            Category {
                name: "Programming",
                topics: &["Python", "JavaScript", "Web Development", "Data Science"],
            },
            Category {
                name: "Music",
                topics: &["Guitar", "Piano", "Music Theory", "Singing"],
            },
            Category {
                name: "Business",
                topics: &["Marketing", "Entrepreneurship", "Finance", "Leadership"],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::Topic;

    #[test]
    fn test_paths_point_at_known_pages() {
        for summary in catalog().current_paths {
            let slug = summary.path.trim_start_matches("/learning-paths/");
            assert!(Topic::from_slug(slug).is_some(), "{}", summary.path);
            assert!(summary.completed_videos <= summary.total_videos);
            assert!(summary.progress <= 100);
        }
    }

    #[test]
    fn test_categories_have_four_topics() {
        let catalog = catalog();
        assert_eq!(catalog.categories.len(), 3);
        assert!(catalog.categories.iter().all(|c| c.topics.len() == 4));
    }
}

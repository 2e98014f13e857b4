//! Intent Classifier
//!
//! Maps free text to an [`Intent`] by ordered substring tests on the
//! lowercased input. The first matching rule wins, so rule order is part of
//! the contract: "can you summarize this video" is a summary request when a
//! video is loaded, not a request for video help.

use serde::{Deserialize, Serialize};

/// What the user is asking for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Summarize the loaded video
    Summary,
    /// Study notes from the loaded video
    Notes,
    /// Practice questions about the loaded video
    Quiz,
    /// Explain the loaded video
    Explanation,
    /// How to load and use videos
    VideoHelp,
    /// Course recommendations
    CourseRecommendation,
    /// Learning progress and scores
    ProgressSummary,
    /// Earned achievements and badges
    AchievementSummary,
    /// What the assistant can do
    GenericHelp,
    /// Nothing matched
    Fallback,
}

type Rule = (Intent, &'static [&'static str]);

/// Only consulted while a video is loaded
const VIDEO_RULES: &[Rule] = &[
    (Intent::Summary, &["summary", "summarize"]),
    (Intent::Notes, &["notes", "study"]),
    (Intent::Quiz, &["question", "quiz"]),
    (Intent::Explanation, &["explain", "understand"]),
];

const GENERAL_RULES: &[Rule] = &[
    (Intent::VideoHelp, &["video", "watch", "youtube", "vimeo"]),
    (Intent::CourseRecommendation, &["course", "learn"]),
    (Intent::ProgressSummary, &["progress", "score"]),
    (Intent::AchievementSummary, &["achievement", "badge"]),
    (Intent::GenericHelp, &["help", "support"]),
];

impl Intent {
    /// Classify user input.
    ///
    /// Video-specific rules run first when `has_video_context` is set; if
    /// none of them match, the general rules still apply.
    pub fn classify(input: &str, has_video_context: bool) -> Self {
        let input = input.to_lowercase();

        if has_video_context {
            if let Some(intent) = first_match(VIDEO_RULES, &input) {
                return intent;
            }
        }

        first_match(GENERAL_RULES, &input).unwrap_or(Intent::Fallback)
    }

    /// Whether this intent is only reachable with a loaded video
    pub fn requires_video(&self) -> bool {
        VIDEO_RULES.iter().any(|(intent, _)| intent == self)
    }

    /// All intents in evaluation order, fallback last
    pub fn all() -> &'static [Intent] {
        &[
            Intent::Summary,
            Intent::Notes,
            Intent::Quiz,
            Intent::Explanation,
            Intent::VideoHelp,
            Intent::CourseRecommendation,
            Intent::ProgressSummary,
            Intent::AchievementSummary,
            Intent::GenericHelp,
            Intent::Fallback,
        ]
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Intent::Summary => "summary",
            Intent::Notes => "notes",
            Intent::Quiz => "quiz",
            Intent::Explanation => "explanation",
            Intent::VideoHelp => "video_help",
            Intent::CourseRecommendation => "course_recommendation",
            Intent::ProgressSummary => "progress_summary",
            Intent::AchievementSummary => "achievement_summary",
            Intent::GenericHelp => "generic_help",
            Intent::Fallback => "fallback",
        };
        write!(f, "{}", name)
    }
}

fn first_match(rules: &[Rule], lowered: &str) -> Option<Intent> {
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(intent, _)| *intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_context_takes_priority() {
        assert_eq!(
            Intent::classify("can you summarize this", true),
            Intent::Summary
        );
        assert_eq!(
            Intent::classify("Can you provide a summary of the key points from this video?", true),
            Intent::Summary
        );
    }

    #[test]
    fn test_video_rules_in_order() {
        assert_eq!(Intent::classify("make me study notes", true), Intent::Notes);
        assert_eq!(Intent::classify("QUIZ me", true), Intent::Quiz);
        assert_eq!(Intent::classify("I don't understand", true), Intent::Explanation);
        // summary is tested before notes
        assert_eq!(Intent::classify("summary and notes", true), Intent::Summary);
    }

    #[test]
    fn test_video_context_falls_through() {
        assert_eq!(
            Intent::classify("what course should I take", true),
            Intent::CourseRecommendation
        );
        assert_eq!(Intent::classify("hello", true), Intent::Fallback);
    }

    #[test]
    fn test_quiz_without_video_is_fallback() {
        assert_eq!(Intent::classify("give me a quiz", false), Intent::Fallback);
    }

    #[test]
    fn test_summary_without_video_is_video_help() {
        assert_eq!(
            Intent::classify("summarize this video", false),
            Intent::VideoHelp
        );
    }

    #[test]
    fn test_general_rules() {
        assert_eq!(Intent::classify("How do I watch?", false), Intent::VideoHelp);
        assert_eq!(
            Intent::classify("I want to LEARN rust", false),
            Intent::CourseRecommendation
        );
        assert_eq!(Intent::classify("my score?", false), Intent::ProgressSummary);
        assert_eq!(
            Intent::classify("show badges", false),
            Intent::AchievementSummary
        );
        assert_eq!(Intent::classify("need support", false), Intent::GenericHelp);
        assert_eq!(Intent::classify("", false), Intent::Fallback);
    }

    #[test]
    fn test_overlapping_keywords_use_rule_order() {
        assert_eq!(
            Intent::classify("course progress", false),
            Intent::CourseRecommendation
        );
        assert_eq!(
            Intent::classify("help me with my progress", false),
            Intent::ProgressSummary
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        for (input, video) in [("quiz", true), ("badge", false), ("anything", true)] {
            assert_eq!(
                Intent::classify(input, video),
                Intent::classify(input, video)
            );
        }
    }

    #[test]
    fn test_requires_video() {
        assert!(Intent::Quiz.requires_video());
        assert!(!Intent::VideoHelp.requires_video());
        assert!(!Intent::Fallback.requires_video());
    }
}

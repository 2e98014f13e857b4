//! Canned Responses
//!
//! The reply texts the classifier selects among. They are plain fixtures:
//! the defaults below can be overridden per field from the `[responses]`
//! table of the config file without touching classification.

use serde::{Deserialize, Serialize};

use super::intent::Intent;

/// One reply text per [`Intent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseCatalog {
    pub summary: String,
    pub notes: String,
    pub quiz: String,
    pub explanation: String,
    pub video_help: String,
    pub course_recommendation: String,
    pub progress_summary: String,
    pub achievement_summary: String,
    pub generic_help: String,
    pub fallback: String,
}

impl ResponseCatalog {
    /// Reply text for an intent
    pub fn respond(&self, intent: Intent) -> &str {
        match intent {
            Intent::Summary => &self.summary,
            Intent::Notes => &self.notes,
            Intent::Quiz => &self.quiz,
            Intent::Explanation => &self.explanation,
            Intent::VideoHelp => &self.video_help,
            Intent::CourseRecommendation => &self.course_recommendation,
            Intent::ProgressSummary => &self.progress_summary,
            Intent::AchievementSummary => &self.achievement_summary,
            Intent::GenericHelp => &self.generic_help,
            Intent::Fallback => &self.fallback,
        }
    }

    /// Classify `input` and return the matching reply
    pub fn reply(&self, input: &str, has_video_context: bool) -> &str {
        self.respond(Intent::classify(input, has_video_context))
    }
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self {
            summary: "Based on the video content, here are the key points:\n\n\
                      • Main topic overview and objectives\n\
                      • Important concepts and definitions\n\
                      • Practical examples and applications\n\
                      • Key takeaways for your learning\n\n\
                      Would you like me to elaborate on any specific section?"
                .to_string(),
            notes: "Here are structured study notes from the video:\n\n\
                    📝 **Key Concepts:**\n\
                    • [Concept 1] - Brief explanation\n\
                    • [Concept 2] - Brief explanation\n\n\
                    💡 **Important Points:**\n\
                    • Critical information to remember\n\
                    • Practical applications\n\n\
                    ❓ **Questions to Consider:**\n\
                    • How does this relate to your current courses?\n\
                    • What are the real-world applications?"
                .to_string(),
            quiz: "Here are practice questions based on the video:\n\n\
                   1. What is the main concept discussed in the video?\n\
                   2. How can you apply this knowledge practically?\n\
                   3. What are the key benefits mentioned?\n\
                   4. Can you explain the relationship between [concept A] and [concept B]?\n\n\
                   Would you like me to provide answers or create more questions?"
                .to_string(),
            explanation: "I'd be happy to explain any part of the video! The content covers \
                          several important topics that connect well with your learning goals. \
                          Which specific concept would you like me to break down further?"
                .to_string(),
            video_help: "You can paste any video link in the Video Player section above, and \
                         I'll help you understand the content! I can provide summaries, key \
                         points, study notes, and answer questions about the video material."
                .to_string(),
            course_recommendation: "I can help you find the perfect course! Based on your \
                                    progress, I recommend focusing on advanced topics in your \
                                    current subjects. Would you like me to suggest specific courses?"
                .to_string(),
            progress_summary: "Your learning progress is impressive! You've completed 75% of \
                               your current courses with an average score of 87%. Keep up the \
                               great work!"
                .to_string(),
            achievement_summary: "You've earned 12 achievements so far! Your latest badge was \
                                  'Quick Learner' for completing 5 lessons in one day. What's \
                                  your next goal?"
                .to_string(),
            generic_help: "I'm here to help with your learning journey! I can assist with course \
                           recommendations, progress tracking, study tips, video analysis, and \
                           answering questions about your dashboard."
                .to_string(),
            fallback: "That's an interesting question! I'm here to help with your learning \
                       journey. Feel free to ask about courses, progress, achievements, video \
                       content, or any study-related topics."
                .to_string(),
        }
    }
}

/// Opening bot message of every new transcript
pub const GREETING: &str = "Hello! I'm your learning assistant. How can I help you today? \
You can also paste video links in the video player section and I'll help you understand \
the content!";

/// Bot message appended after a video is loaded
pub const VIDEO_LOADED: &str = "Great! I've loaded the video in the player. I can now help you with:\n\n\
• Understanding key concepts\n\
• Creating study notes\n\
• Generating practice questions\n\
• Explaining difficult topics\n\
• Connecting to your courses\n\n\
Feel free to ask me anything about the video content!";

/// Quick prompts offered once a video is loaded, as (label, prompt)
pub const VIDEO_QUICK_PROMPTS: &[(&str, &str)] = &[
    ("Summary", "Can you provide a summary of the key points from this video?"),
    ("Notes", "Can you create study notes from this video content?"),
    ("Questions", "Can you generate practice questions based on this video?"),
    ("Explain", "Can you explain the main concepts from this video?"),
];

//! Quick Assistant
//!
//! The compact assistant shown outside the chat page. It has no video
//! context and points the user at the right dashboard page instead of
//! answering in depth.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reply delay of the quick assistant
pub const QUICK_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuickIntent {
    Courses,
    Progress,
    Achievements,
    Help,
    Fallback,
}

impl QuickIntent {
    pub fn classify(input: &str) -> Self {
        let input = input.to_lowercase();

        if input.contains("course") {
            QuickIntent::Courses
        } else if input.contains("progress") {
            QuickIntent::Progress
        } else if input.contains("achievement") {
            QuickIntent::Achievements
        } else if input.contains("help") {
            QuickIntent::Help
        } else {
            QuickIntent::Fallback
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            QuickIntent::Courses => "Check your Courses page for recommendations!",
            QuickIntent::Progress => {
                "Your progress looks great! Visit the Progress page for details."
            }
            QuickIntent::Achievements => "You have new achievements! Check the Achievements page.",
            QuickIntent::Help => "I'm here to help! Visit the Chat page for detailed assistance.",
            QuickIntent::Fallback => "For detailed help, visit the Chat page. Quick question?",
        }
    }
}

/// Classify and reply in one step
pub fn quick_reply(input: &str) -> &'static str {
    QuickIntent::classify(input).reply()
}

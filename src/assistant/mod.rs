//! Learning Assistant
//!
//! Keyword-driven reply selection:
//!
//! - **intent**: ordered keyword rules mapping text to an [`Intent`]
//! - **responses**: the canned reply texts ([`ResponseCatalog`])
//! - **quick**: the compact quick assistant
//! - **emotion**: voice/face emotion fusion and the tutoring system prompt
//! - **history**: bounded per-conversation message windows
//!
//! ```text
//! input ──lowercase──> video rules (if video loaded) ──> general rules ──> fallback
//!                                   │                        │
//!                                   └──────── Intent ────────┘
//!                                                │
//!                                        ResponseCatalog ──> reply text
//! ```

pub mod emotion;
pub mod history;
pub mod intent;
pub mod quick;
pub mod responses;

use std::sync::LazyLock;

pub use emotion::{Emotion, EmotionalState, StudentProfile, UnknownEmotion};
pub use history::{HistoryBuffer, HistoryStore, MAX_HISTORY_MESSAGES};
pub use intent::Intent;
pub use quick::{quick_reply, QuickIntent, QUICK_REPLY_DELAY};
pub use responses::{ResponseCatalog, GREETING, VIDEO_LOADED, VIDEO_QUICK_PROMPTS};

static DEFAULT_CATALOG: LazyLock<ResponseCatalog> = LazyLock::new(ResponseCatalog::default);

/// Classify `input` against the default catalog and return the reply text
pub fn classify(input: &str, has_video_context: bool) -> &'static str {
    DEFAULT_CATALOG.reply(input, has_video_context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_uses_default_catalog() {
        let catalog = ResponseCatalog::default();
        assert_eq!(classify("can you summarize this", true), catalog.summary);
        assert_eq!(classify("quiz", false), catalog.fallback);
        assert_eq!(classify("quiz", false), classify("quiz", false));
    }
}

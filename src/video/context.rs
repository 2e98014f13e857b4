//! Active video context

use serde::{Deserialize, Serialize};

use super::recognizer::{recognize, Platform};

/// The currently loaded video. At most one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContext {
    /// Raw text the user submitted
    pub url: String,
    pub title: String,
    pub platform: Platform,
    pub video_id: String,
}

impl VideoContext {
    /// Build a context from user input, or `None` if it is not a video link
    pub fn from_url(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        let found = recognize(&url)?;

        Some(Self {
            title: found.platform.display_title().to_string(),
            platform: found.platform,
            video_id: found.video_id,
            url,
        })
    }

    /// Player URL for the loaded video
    pub fn embed_url(&self) -> String {
        self.platform.embed_url(&self.video_id)
    }
}

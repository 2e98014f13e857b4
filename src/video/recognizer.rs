//! Video Link Recognizer
//!
//! Detects YouTube and Vimeo links inside free text and extracts the
//! platform-specific video identifier.
//!
//! # Recognized shapes
//!
//! ```text
//! [http(s)://][www.]youtube.com/watch?v=<11 chars of [A-Za-z0-9_-]>
//! [http(s)://][www.]youtu.be/<11 chars of [A-Za-z0-9_-]>
//! [http(s)://][www.]vimeo.com/<digits>
//! ```
//!
//! The search is unanchored, so a link embedded in a sentence still matches.
//! YouTube is tested before Vimeo.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static YOUTUBE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})")
        .expect("youtube pattern is valid")
});

static VIMEO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?vimeo\.com/(\d+)").expect("vimeo pattern is valid")
});

/// Video hosting platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Vimeo,
}

impl Platform {
    /// Get all platforms in recognition priority order
    pub fn all() -> &'static [Platform] {
        &[Platform::YouTube, Platform::Vimeo]
    }

    /// Wire tag (`youtube` / `vimeo`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Vimeo => "vimeo",
        }
    }

    /// Human-readable platform name
    pub fn label(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Vimeo => "Vimeo",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youtube" => Ok(Platform::YouTube),
            "vimeo" => Ok(Platform::Vimeo),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

/// Platform tag that is neither `youtube` nor `vimeo`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown video platform: {0}")]
pub struct UnknownPlatform(pub String);

/// A recognized video link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMatch {
    pub platform: Platform,
    /// Identifier captured verbatim from the link
    pub video_id: String,
}

/// Recognize a video link in `text`.
///
/// Returns `None` when neither platform pattern matches. This is a
/// classification, not a validation: nothing is fetched.
pub fn recognize(text: &str) -> Option<VideoMatch> {
    if let Some(caps) = YOUTUBE_PATTERN.captures(text) {
        return Some(VideoMatch {
            platform: Platform::YouTube,
            video_id: caps[1].to_string(),
        });
    }

    VIMEO_PATTERN.captures(text).map(|caps| VideoMatch {
        platform: Platform::Vimeo,
        video_id: caps[1].to_string(),
    })
}

/// Check whether `text` contains a recognized video link
pub fn is_video_link(text: &str) -> bool {
    recognize(text).is_some()
}

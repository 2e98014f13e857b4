//! Embed URL and display title derivation

use super::recognizer::Platform;

impl Platform {
    /// Embeddable player URL for a video on this platform
    pub fn embed_url(&self, video_id: &str) -> String {
        match self {
            Platform::YouTube => format!("https://www.youtube.com/embed/{}", video_id),
            Platform::Vimeo => format!("https://player.vimeo.com/video/{}", video_id),
        }
    }

    /// Fixed display title; no metadata is fetched
    pub fn display_title(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube Video",
            Platform::Vimeo => "Vimeo Video",
        }
    }
}

/// Embed URL for a platform tag.
///
/// Unknown tags yield an empty string, which callers treat as
/// "cannot render" and show a placeholder instead.
pub fn embed_url(platform: &str, video_id: &str) -> String {
    platform
        .parse::<Platform>()
        .map(|p| p.embed_url(video_id))
        .unwrap_or_default()
}

/// Display title for a platform tag (`"Video"` for unknown tags)
pub fn display_title(platform: &str) -> &'static str {
    platform
        .parse::<Platform>()
        .map(|p| p.display_title())
        .unwrap_or("Video")
}

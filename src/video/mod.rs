//! Video Links
//!
//! - **recognizer**: detect YouTube/Vimeo links and extract the video id
//! - **embed**: player URL and display title per platform
//! - **context**: the single active `VideoContext`
//!
//! # Example
//!
//! ```rust
//! use tutorly::video::{recognize, Platform};
//!
//! let found = recognize("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
//! assert_eq!(found.platform, Platform::YouTube);
//! assert_eq!(
//!     found.platform.embed_url(&found.video_id),
//!     "https://www.youtube.com/embed/dQw4w9WgXcQ"
//! );
//! ```

pub mod context;
pub mod embed;
pub mod recognizer;

pub use context::VideoContext;
pub use embed::{display_title, embed_url};
pub use recognizer::{is_video_link, recognize, Platform, UnknownPlatform, VideoMatch};

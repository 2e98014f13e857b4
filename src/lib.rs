//! # Tutorly
//!
//! Learning assistant core for a learning dashboard: keyword intent
//! classification, video link recognition, emotion-aware tutoring prompts,
//! and chat session management with JSON export/import.
//!
//! ## Modules
//!
//! - [`assistant`]: ordered keyword rules, canned replies, emotion-aware prompts
//! - [`video`]: YouTube/Vimeo link recognition and embed URLs
//! - [`chat`]: live transcript, saved sessions, export/import
//! - [`capabilities`]: injected speech capture and document transport
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use tutorly::{classify, recognize, Platform};
//!
//! let found = recognize("https://vimeo.com/12345678").unwrap();
//! assert_eq!(found.platform, Platform::Vimeo);
//! assert_eq!(found.video_id, "12345678");
//!
//! let reply = classify("can you summarize this", true);
//! assert!(reply.starts_with("Based on the video content"));
//! ```

pub mod assistant;
pub mod capabilities;
pub mod chat;
pub mod config;
pub mod video;

pub use assistant::{
    classify, quick_reply, Emotion, EmotionalState, HistoryBuffer, HistoryStore, Intent,
    QuickIntent, ResponseCatalog, StudentProfile,
};

pub use video::{display_title, embed_url, recognize, Platform, VideoContext, VideoMatch};

pub use chat::{
    ChatError, ChatManager, ChatMessage, ChatResult, ChatSession, ExportDocument,
    ImportDocument, ImportSummary, Sender,
};

pub use capabilities::{CaptureError, DocumentStore, FsDocumentStore, SpeechCapture, VoiceInput};

pub use config::{AssistantConfig, Config, ConfigError, ExportConfig, LoggingConfig};

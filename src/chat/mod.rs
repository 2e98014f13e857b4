//! Chat Sessions
//!
//! - **types**: `ChatMessage`, `ChatSession`, `Sender`
//! - **manager**: live transcript, saved sessions, active video
//! - **export**: export/import documents
//! - **error**: error types
//!
//! # Data flow
//!
//! ```text
//! send_message ──> transcript += user ──(delay)──> classify ──> transcript += bot
//! load_video   ──> recognize ──> VideoContext ──> transcript += confirmation
//! save_session ──> snapshot copy ──> sessions
//! export_json  ──> { sessions, currentMessages, exportDate }
//! import_json  ──> parse fully ──> replace present fields
//! ```

mod error;
mod export;
mod manager;
mod types;

pub use error::{ChatError, ChatResult};
pub use export::{ExportDocument, ImportDocument};
pub use manager::{ChatManager, ImportSummary};
pub use types::{ChatMessage, ChatSession, Sender};

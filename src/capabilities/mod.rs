//! Injected Capabilities
//!
//! Host facilities the core uses but does not own:
//! - Speech-to-text capture ([`SpeechCapture`], driven through [`VoiceInput`])
//! - Document transport for export/import ([`DocumentStore`])

mod documents;
mod speech;

pub use documents::{DocumentStore, FsDocumentStore};
pub use speech::{CaptureError, SpeechCapture, VoiceInput};

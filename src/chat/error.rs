//! Chat error types
//!
//! Errors surfaced to the user as notices. None of them leave the manager
//! in a partially updated state.

use thiserror::Error;

/// Errors that can occur in chat session management
#[derive(Error, Debug)]
pub enum ChatError {
    /// Blank message or video URL
    #[error("Input is empty")]
    EmptyInput,

    /// Submitted text is not a YouTube or Vimeo link
    #[error("Please enter a valid YouTube or Vimeo URL")]
    UnrecognizedVideo(String),

    /// No saved session with this id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Import document could not be parsed
    #[error("Error importing chat data. Please check the file format. ({0})")]
    MalformedImport(String),

    /// Export document could not be rendered
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Reading or writing a document failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

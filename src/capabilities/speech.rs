//! Voice Input
//!
//! Speech-to-text is an injected capability. [`VoiceInput`] owns the
//! listening flag and the text input field and applies capture events:
//!
//! ```text
//! start_listening ──> listening ──on_result──> input = transcript, idle
//!                         │
//!                         ├──stop_listening──> idle (late results dropped)
//!                         └──on_error / on_end──> idle
//! ```

use thiserror::Error;

/// Errors reported by a speech capture backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Speech capture unavailable: {0}")]
    Unavailable(String),

    #[error("Speech capture failed: {0}")]
    Failed(String),
}

/// A speech-to-text backend.
///
/// Results and failures are delivered back through
/// [`VoiceInput::on_result`], [`VoiceInput::on_error`] and
/// [`VoiceInput::on_end`].
pub trait SpeechCapture: Send {
    /// Begin one capture session
    fn start(&mut self) -> Result<(), CaptureError>;

    /// End the current capture session early
    fn stop(&mut self);
}

/// Input field with optional voice capture
pub struct VoiceInput<S: SpeechCapture> {
    capture: Option<S>,
    listening: bool,
    input: String,
}

impl<S: SpeechCapture> VoiceInput<S> {
    /// Create with a capture backend, or `None` when speech is unsupported
    pub fn new(capture: Option<S>) -> Self {
        Self {
            capture,
            listening: false,
            input: String::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.capture.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Take the current input, leaving the field empty
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Start listening. No-op while already listening.
    ///
    /// Without a backend this reports [`CaptureError::Unavailable`]; a
    /// backend that fails to start leaves the flag cleared.
    pub fn start_listening(&mut self) -> Result<(), CaptureError> {
        if self.listening {
            return Ok(());
        }
        let Some(capture) = self.capture.as_mut() else {
            return Err(CaptureError::Unavailable(
                "no speech capture backend".to_string(),
            ));
        };

        self.listening = true;
        capture.start().inspect_err(|e| {
            tracing::debug!(error = %e, "Speech capture did not start");
            self.listening = false;
        })
    }

    /// Stop listening early; any result arriving afterwards is discarded
    pub fn stop_listening(&mut self) {
        if !self.listening {
            return;
        }
        if let Some(capture) = self.capture.as_mut() {
            capture.stop();
        }
        self.listening = false;
    }

    /// A transcript arrived from the backend
    pub fn on_result(&mut self, transcript: &str) {
        if !self.listening {
            tracing::debug!("Dropping speech result received after stop");
            return;
        }
        self.input = transcript.to_string();
        self.listening = false;
    }

    pub fn on_error(&mut self, error: CaptureError) {
        tracing::debug!(error = %error, "Speech capture error");
        self.listening = false;
    }

    pub fn on_end(&mut self) {
        self.listening = false;
    }
}

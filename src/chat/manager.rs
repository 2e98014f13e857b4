//! Chat Session Manager
//!
//! Owns the live transcript, the saved sessions, and the active video. All
//! mutation goes through `&mut self`, so there is exactly one writer.
//!
//! # Example
//!
//! ```rust,no_run
//! use tutorly::chat::ChatManager;
//! use tutorly::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut chat = ChatManager::from_config(&Config::default());
//!
//!     chat.load_video("https://youtu.be/dQw4w9WgXcQ")?;
//!     let reply = chat.send_message("Can you summarize this?").await?;
//!     println!("{}", reply.text);
//!
//!     chat.save_session();
//!     std::fs::write("chat.json", chat.export_json()?)?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use crate::assistant::{
    Emotion, HistoryBuffer, HistoryStore, Intent, ResponseCatalog, StudentProfile, VIDEO_LOADED,
};
use crate::capabilities::DocumentStore;
use crate::config::Config;
use crate::video::VideoContext;

use super::error::{ChatError, ChatResult};
use super::export::{ExportDocument, ImportDocument};
use super::types::{ChatMessage, ChatSession};

/// What an import replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of sessions imported, if the document had `sessions`
    pub sessions: Option<usize>,
    /// Number of messages imported, if the document had `currentMessages`
    pub messages: Option<usize>,
}

/// History key of a transcript that has not been saved yet
const DRAFT_CONVERSATION: &str = "draft";

/// Live chat state plus saved sessions
pub struct ChatManager {
    messages: Vec<ChatMessage>,
    sessions: Vec<ChatSession>,
    current_session_id: Option<String>,
    video: Option<VideoContext>,
    typing: bool,
    greeting: String,
    responses: ResponseCatalog,
    reply_delay: Duration,
    profile: StudentProfile,
    history: HistoryStore,
}

impl ChatManager {
    /// Create a manager whose transcript starts with `greeting`
    pub fn new(greeting: impl Into<String>, responses: ResponseCatalog, reply_delay: Duration) -> Self {
        let greeting = greeting.into();
        Self {
            messages: vec![ChatMessage::bot(greeting.clone())],
            sessions: Vec::new(),
            current_session_id: None,
            video: None,
            typing: false,
            greeting,
            responses,
            reply_delay,
            profile: StudentProfile::default(),
            history: HistoryStore::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.assistant.greeting.clone(),
            config.responses.clone(),
            config.assistant.response_delay(),
        )
        .with_profile(config.profile.clone())
    }

    pub fn with_profile(mut self, profile: StudentProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session_id.as_deref()
    }

    pub fn video(&self) -> Option<&VideoContext> {
        self.video.as_ref()
    }

    pub fn has_video_context(&self) -> bool {
        self.video.is_some()
    }

    /// True while a reply is pending
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn responses(&self) -> &ResponseCatalog {
        &self.responses
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    /// Record the latest voice and facial readings
    pub fn set_emotions(&mut self, voice: Emotion, face: Emotion) {
        self.profile.voice_emotion = voice;
        self.profile.facial_emotion = face;
        tracing::debug!(%voice, %face, focus = %self.profile.state().focus(), "Emotions updated");
    }

    /// System prompt for the next turn
    pub fn system_prompt(&self) -> String {
        self.profile.system_prompt()
    }

    fn conversation_key(&self) -> &str {
        self.current_session_id.as_deref().unwrap_or(DRAFT_CONVERSATION)
    }

    /// Recent-message window of the current conversation
    pub fn history(&self) -> Option<&HistoryBuffer> {
        self.history.get(self.conversation_key())
    }

    /// Append a message to the live transcript
    pub fn push_message(&mut self, message: ChatMessage) {
        tracing::trace!(id = %message.id, sender = %message.sender, "Message appended");
        self.messages.push(message);
    }

    /// Build the bot reply to `text` using the current video flag
    pub fn reply_to(&self, text: &str) -> ChatMessage {
        let intent = Intent::classify(text, self.has_video_context());
        tracing::debug!(%intent, has_video = self.has_video_context(), "Classified message");
        ChatMessage::bot(self.responses.respond(intent))
    }

    /// Send a user message and wait for the bot reply.
    ///
    /// The user message is appended immediately; the reply follows after the
    /// configured delay. Dropping the future cancels the reply.
    pub async fn send_message(&mut self, text: &str) -> ChatResult<ChatMessage> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let message = ChatMessage::user(text);
        let key = self.conversation_key().to_string();
        self.history.record(&key, message.clone());
        self.push_message(message);

        if !self.reply_delay.is_zero() {
            let _typing = TypingGuard::new(&mut self.typing);
            tokio::time::sleep(self.reply_delay).await;
        }

        let reply = self.reply_to(text);
        self.history.record(&key, reply.clone());
        self.push_message(reply.clone());

        Ok(reply)
    }

    /// Load a video link into the player.
    ///
    /// An unrecognized link changes nothing.
    pub fn load_video(&mut self, url: &str) -> ChatResult<&VideoContext> {
        if url.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let context =
            VideoContext::from_url(url).ok_or_else(|| ChatError::UnrecognizedVideo(url.to_string()))?;

        tracing::info!(
            platform = %context.platform,
            video_id = %context.video_id,
            "Video loaded"
        );

        self.push_message(ChatMessage::bot(VIDEO_LOADED).video(&context.url, &context.title));
        Ok(&*self.video.insert(context))
    }

    /// Snapshot the live transcript into a new saved session.
    ///
    /// Returns `None` when the transcript holds nothing beyond the greeting.
    pub fn save_session(&mut self) -> Option<&ChatSession> {
        if self.messages.len() <= 1 {
            return None;
        }

        let session = ChatSession::snapshot(&self.messages);
        tracing::info!(
            session_id = %session.id,
            messages = session.len(),
            "Session saved"
        );

        match self.current_session_id.as_deref() {
            Some(previous) => self.history.fork(previous, &session.id),
            None => self.history.rename(DRAFT_CONVERSATION, &session.id),
        }
        self.current_session_id = Some(session.id.clone());
        self.sessions.push(session);
        self.sessions.last()
    }

    /// Replace the live transcript with a copy of a saved session
    pub fn load_session(&mut self, id: &str) -> ChatResult<()> {
        let session = self
            .sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ChatError::SessionNotFound(id.to_string()))?;

        self.messages = session.messages.clone();
        self.current_session_id = Some(session.id.clone());
        self.typing = false;

        tracing::info!(session_id = %id, messages = self.messages.len(), "Session loaded");
        Ok(())
    }

    /// Start over: greeting only, no current session, no video
    pub fn new_chat(&mut self) {
        self.messages = vec![ChatMessage::bot(self.greeting.clone())];
        self.current_session_id = None;
        self.video = None;
        self.typing = false;
        self.history.remove(DRAFT_CONVERSATION);
        tracing::debug!("New chat started");
    }

    /// Snapshot of all sessions and the live transcript
    pub fn export_document(&self) -> ExportDocument {
        ExportDocument::new(self.sessions.clone(), self.messages.clone())
    }

    /// Export document rendered as pretty JSON
    pub fn export_json(&self) -> ChatResult<String> {
        self.export_document().to_json()
    }

    /// Parse and apply an import document.
    ///
    /// Malformed input leaves every piece of state untouched.
    pub fn import_json(&mut self, text: &str) -> ChatResult<ImportSummary> {
        let document = ImportDocument::parse(text).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected import document");
        })?;
        if document.is_empty() {
            tracing::warn!("Import document carries neither sessions nor currentMessages");
        }
        Ok(self.apply_import(document))
    }

    /// Replace whichever parts of the state the document carries
    pub fn apply_import(&mut self, document: ImportDocument) -> ImportSummary {
        let mut summary = ImportSummary::default();
        self.typing = false;
        self.history.clear();

        if let Some(sessions) = document.sessions {
            summary.sessions = Some(sessions.len());
            self.sessions = sessions;
        }
        if let Some(messages) = document.current_messages {
            summary.messages = Some(messages.len());
            self.messages = messages;
        }

        tracing::info!(
            sessions = ?summary.sessions,
            messages = ?summary.messages,
            "Chat data imported"
        );
        summary
    }

    /// Export through a document store, returning where it was written
    pub async fn export_to(&self, store: &dyn DocumentStore) -> ChatResult<String> {
        let document = self.export_document();
        let json = document.to_json()?;
        let location = store
            .write_document(json.as_bytes(), &document.suggested_file_name())
            .await?;
        Ok(location)
    }

    /// Import the document a store provides
    pub async fn import_from(&mut self, store: &dyn DocumentStore) -> ChatResult<ImportSummary> {
        let bytes = store.read_document().await?;
        let text = String::from_utf8(bytes).map_err(|e| ChatError::MalformedImport(e.to_string()))?;
        self.import_json(&text)
    }
}

/// Holds the typing flag up for as long as it lives, including when the
/// pending reply is dropped
struct TypingGuard<'a>(&'a mut bool);

impl<'a> TypingGuard<'a> {
    fn new(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl Default for ChatManager {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{GREETING, MAX_HISTORY_MESSAGES};
    use crate::capabilities::FsDocumentStore;
    use crate::chat::Sender;
    use crate::video::Platform;
    use tempfile::tempdir;

    fn manager() -> ChatManager {
        ChatManager::new(GREETING, ResponseCatalog::default(), Duration::ZERO)
    }

    #[test]
    fn test_starts_with_greeting() {
        let chat = manager();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::Bot);
        assert_eq!(chat.messages()[0].text, GREETING);
        assert!(chat.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_appends_user_then_bot() {
        let mut chat = manager();
        let reply = chat.send_message("how is my progress?").await.unwrap();

        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[1].text, "how is my progress?");
        assert!(chat.messages()[1].is_from_user());
        assert_eq!(chat.messages()[2], reply);
        assert_eq!(reply.text, chat.responses().progress_summary);
        assert!(!chat.is_typing());
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let mut chat = manager();
        assert!(matches!(
            chat.send_message("   ").await,
            Err(ChatError::EmptyInput)
        ));
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let mut chat = ChatManager::new(
            GREETING,
            ResponseCatalog::default(),
            Duration::from_millis(1500),
        );

        let started = tokio::time::Instant::now();
        chat.send_message("help").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_reply_leaves_user_message() {
        let mut chat = ChatManager::new(
            GREETING,
            ResponseCatalog::default(),
            Duration::from_millis(1500),
        );

        let pending = tokio::time::timeout(Duration::from_millis(10), chat.send_message("help"));
        assert!(pending.await.is_err());

        assert_eq!(chat.messages().len(), 2);
        assert!(chat.messages()[1].is_from_user());
        assert!(!chat.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reply_never_lands_later() {
        let mut chat = ChatManager::new(
            GREETING,
            ResponseCatalog::default(),
            Duration::from_millis(1500),
        );

        let pending = tokio::time::timeout(Duration::from_millis(10), chat.send_message("help"));
        assert!(pending.await.is_err());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!chat.is_typing());
        assert_eq!(chat.messages().len(), 2);

        let id = chat.save_session().unwrap().id.clone();
        chat.load_session(&id).unwrap();
        assert!(!chat.is_typing());

        let reply = chat.send_message("help").await.unwrap();
        assert_eq!(reply.text, chat.responses().generic_help);
        assert!(!chat.is_typing());
    }

    #[tokio::test]
    async fn test_video_context_changes_replies() {
        let mut chat = manager();
        let before = chat.send_message("can you summarize this").await.unwrap();
        assert_eq!(before.text, chat.responses().fallback);

        chat.load_video("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .unwrap();
        let after = chat.send_message("can you summarize this").await.unwrap();
        assert_eq!(after.text, chat.responses().summary);
    }

    #[test]
    fn test_load_video_appends_confirmation() {
        let mut chat = manager();
        let ctx = chat.load_video("https://vimeo.com/12345678").unwrap();
        assert_eq!(ctx.platform, Platform::Vimeo);
        assert_eq!(ctx.video_id, "12345678");

        let last = chat.messages().last().unwrap();
        assert_eq!(last.text, VIDEO_LOADED);
        assert_eq!(last.video_url.as_deref(), Some("https://vimeo.com/12345678"));
        assert_eq!(last.video_title.as_deref(), Some("Vimeo Video"));
    }

    #[test]
    fn test_load_video_replaces_previous() {
        let mut chat = manager();
        chat.load_video("https://vimeo.com/1").unwrap();
        chat.load_video("youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(chat.video().unwrap().platform, Platform::YouTube);
    }

    #[test]
    fn test_unrecognized_video_changes_nothing() {
        let mut chat = manager();
        let err = chat.load_video("https://example.com/clip").unwrap_err();
        assert!(matches!(err, ChatError::UnrecognizedVideo(_)));
        assert!(chat.video().is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_save_requires_conversation() {
        let mut chat = manager();
        assert!(chat.save_session().is_none());
        assert!(chat.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_saved_session_is_isolated() {
        let mut chat = manager();
        chat.send_message("hello").await.unwrap();
        let id = chat.save_session().unwrap().id.clone();
        assert_eq!(chat.current_session_id(), Some(id.as_str()));

        chat.send_message("course?").await.unwrap();
        assert_eq!(chat.messages().len(), 5);
        assert_eq!(chat.sessions()[0].messages.len(), 3);

        chat.load_session(&id).unwrap();
        assert_eq!(chat.messages().len(), 3);

        chat.send_message("more").await.unwrap();
        assert_eq!(chat.sessions()[0].messages.len(), 3);
    }

    #[test]
    fn test_load_unknown_session() {
        let mut chat = manager();
        assert!(matches!(
            chat.load_session("nope"),
            Err(ChatError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_new_chat_resets() {
        let mut chat = manager();
        chat.load_video("youtu.be/dQw4w9WgXcQ").unwrap();
        chat.send_message("quiz").await.unwrap();
        chat.save_session();

        chat.new_chat();
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.video().is_none());
        assert!(chat.current_session_id().is_none());
        assert_eq!(chat.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let mut chat = manager();
        chat.load_video("https://vimeo.com/12345678").unwrap();
        chat.send_message("explain it").await.unwrap();
        chat.save_session();
        chat.send_message("badge?").await.unwrap();

        let json = chat.export_json().unwrap();

        let mut other = manager();
        let summary = other.import_json(&json).unwrap();
        assert_eq!(summary.sessions, Some(1));
        assert_eq!(summary.messages, Some(chat.messages().len()));
        assert_eq!(other.sessions(), chat.sessions());
        assert_eq!(other.messages(), chat.messages());
    }

    #[tokio::test]
    async fn test_import_without_sessions_keeps_sessions() {
        let mut chat = manager();
        chat.send_message("hello").await.unwrap();
        chat.save_session();
        let sessions = chat.sessions().to_vec();

        let summary = chat
            .import_json(
                r#"{"currentMessages": [
                    {"id": "9", "text": "imported", "sender": "user", "timestamp": "2024-05-01T10:00:00Z"}
                ]}"#,
            )
            .unwrap();

        assert_eq!(summary.sessions, None);
        assert_eq!(chat.sessions(), sessions.as_slice());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].text, "imported");
    }

    #[tokio::test]
    async fn test_malformed_import_changes_nothing() {
        let mut chat = manager();
        chat.send_message("hello").await.unwrap();
        chat.save_session();
        let messages = chat.messages().to_vec();

        let err = chat
            .import_json(r#"{"sessions": [], "currentMessages": "broken"}"#)
            .unwrap_err();
        assert!(matches!(err, ChatError::MalformedImport(_)));
        assert_eq!(chat.sessions().len(), 1);
        assert_eq!(chat.messages(), messages.as_slice());
    }

    #[tokio::test]
    async fn test_empty_import_keeps_state() {
        let mut chat = manager();
        chat.send_message("hello").await.unwrap();
        chat.save_session();

        let summary = chat.import_json("{}").unwrap();
        assert_eq!(summary, ImportSummary::default());
        assert_eq!(chat.sessions().len(), 1);
        assert_eq!(chat.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_history_window_is_bounded() {
        let mut chat = manager();
        for i in 0..8 {
            chat.send_message(&format!("question {}", i)).await.unwrap();
        }

        let history = chat.history().unwrap();
        assert_eq!(history.len(), MAX_HISTORY_MESSAGES);
        assert_eq!(history.messages().next().unwrap().text, "question 3");
        assert_eq!(chat.messages().len(), 17);
    }

    #[tokio::test]
    async fn test_history_follows_sessions() {
        let mut chat = manager();
        chat.send_message("hello").await.unwrap();
        let id = chat.save_session().unwrap().id.clone();
        assert_eq!(chat.history().unwrap().len(), 2);

        chat.new_chat();
        assert!(chat.history().is_none());

        chat.load_session(&id).unwrap();
        assert_eq!(chat.history().unwrap().len(), 2);
    }

    #[test]
    fn test_emotions_shape_system_prompt() {
        let mut chat = manager().with_profile(StudentProfile {
            likes: Some("music".to_string()),
            ..Default::default()
        });
        assert!(chat.system_prompt().contains("The student is currently Neutral."));

        chat.set_emotions(Emotion::Sad, Emotion::Happy);
        let prompt = chat.system_prompt();
        assert!(prompt.contains("Voice is SAD, Face is HAPPY."));
        assert!(prompt.contains("emotional focus (Confusion)"));
        assert!(prompt.contains("* **Likes/Interests**: music\n"));
    }

    #[tokio::test]
    async fn test_export_to_and_import_from_store() {
        let dir = tempdir().unwrap();
        let mut chat = manager();
        chat.send_message("score").await.unwrap();
        chat.save_session();

        let store = FsDocumentStore::new(dir.path());
        let location = chat.export_to(&store).await.unwrap();

        let mut other = manager();
        let summary = other
            .import_from(&store.with_source(&location))
            .await
            .unwrap();
        assert_eq!(summary.sessions, Some(1));
        assert_eq!(other.messages(), chat.messages());
    }
}

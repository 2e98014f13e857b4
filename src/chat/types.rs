//! Chat data types
//!
//! - `ChatMessage`: one immutable transcript entry
//! - `ChatSession`: a saved snapshot of a transcript
//! - `Sender`: who wrote a message
//!
//! Field names serialize in camelCase so exported documents stay
//! compatible with documents produced by the web dashboard.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// A single transcript entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
}

impl ChatMessage {
    /// Create a message stamped with the current time
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            created_at: Utc::now(),
            video_url: None,
            video_title: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// Builder method: attach a video reference
    pub fn video(mut self, url: impl Into<String>, title: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self.video_title = Some(title.into());
        self
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// A saved transcript snapshot. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub name: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Snapshot `messages` into a new session named after today's date
    pub fn snapshot(messages: &[ChatMessage]) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: format!(
                "Chat {}",
                created_at.with_timezone(&Local).format("%Y-%m-%d")
            ),
            messages: messages.to_vec(),
            created_at,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let msg = ChatMessage::bot("loaded").video("https://vimeo.com/1", "Vimeo Video");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["sender"], "bot");
        assert_eq!(json["videoUrl"], "https://vimeo.com/1");
        assert_eq!(json["videoTitle"], "Vimeo Video");
        assert!(json["timestamp"].is_string());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_message_without_video_omits_fields() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert!(json.get("videoUrl").is_none());
        assert!(json.get("videoTitle").is_none());
    }

    #[test]
    fn test_message_parses_browser_document() {
        let msg: ChatMessage = serde_json::from_str(
            r#"{"id":"1","text":"Hello!","sender":"bot","timestamp":"2024-05-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(msg.id, "1");
        assert_eq!(msg.sender, Sender::Bot);
        assert!(msg.video_url.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ChatMessage::user("a").id, ChatMessage::user("a").id);
    }

    #[test]
    fn test_snapshot_copies_messages() {
        let mut live = vec![ChatMessage::bot("hello"), ChatMessage::user("hi")];
        let session = ChatSession::snapshot(&live);
        live.push(ChatMessage::user("later"));

        assert_eq!(session.len(), 2);
        assert!(session.name.starts_with("Chat "));
    }
}

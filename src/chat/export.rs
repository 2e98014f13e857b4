//! Export / Import documents
//!
//! Export shape:
//!
//! ```json
//! {
//!   "sessions": [ { "id": "...", "name": "...", "messages": [...], "createdAt": "..." } ],
//!   "currentMessages": [ { "id": "...", "text": "...", "sender": "user", "timestamp": "..." } ],
//!   "exportDate": "2024-05-01T10:00:00Z"
//! }
//! ```
//!
//! On import both `sessions` and `currentMessages` are optional; other
//! top-level keys (including `exportDate`) are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{ChatError, ChatResult};
use super::types::{ChatMessage, ChatSession};

/// Document produced by an export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub sessions: Vec<ChatSession>,
    pub current_messages: Vec<ChatMessage>,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    pub fn new(sessions: Vec<ChatSession>, current_messages: Vec<ChatMessage>) -> Self {
        Self {
            sessions,
            current_messages,
            export_date: Utc::now(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> ChatResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChatError::Serialization(e.to_string()))
    }

    /// Suggested file name, e.g. `chat-export-2024-05-01.json`
    pub fn suggested_file_name(&self) -> String {
        format!("chat-export-{}.json", self.export_date.format("%Y-%m-%d"))
    }
}

/// Document accepted by an import
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub sessions: Option<Vec<ChatSession>>,
    #[serde(default)]
    pub current_messages: Option<Vec<ChatMessage>>,
}

impl ImportDocument {
    /// Parse an import document.
    ///
    /// The top-level value must be a JSON object; any structural mismatch in
    /// a present field rejects the whole document.
    pub fn parse(text: &str) -> ChatResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ChatError::MalformedImport(e.to_string()))?;

        if !value.is_object() {
            return Err(ChatError::MalformedImport(
                "expected a JSON object at the top level".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| ChatError::MalformedImport(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_none() && self.current_messages.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_field_names() {
        let doc = ExportDocument::new(vec![], vec![ChatMessage::user("hi")]);
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert!(json["sessions"].is_array());
        assert_eq!(json["currentMessages"][0]["text"], "hi");
        let date = json["exportDate"].as_str().unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(date).unwrap();
        assert_eq!(parsed.with_timezone(&chrono::Utc), doc.export_date);
    }

    #[test]
    fn test_suggested_file_name() {
        let doc = ExportDocument::new(vec![], vec![]);
        let name = doc.suggested_file_name();
        assert!(name.starts_with("chat-export-"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "chat-export-2024-05-01.json".len());
    }

    #[test]
    fn test_parse_partial_document() {
        let doc = ImportDocument::parse(r#"{"currentMessages": []}"#).unwrap();
        assert!(doc.sessions.is_none());
        assert_eq!(doc.current_messages, Some(vec![]));
    }

    #[test]
    fn test_parse_null_counts_as_absent() {
        let doc = ImportDocument::parse(r#"{"sessions": null, "exportDate": "x"}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ImportDocument::parse("not json"),
            Err(ChatError::MalformedImport(_))
        ));
        assert!(matches!(
            ImportDocument::parse("[]"),
            Err(ChatError::MalformedImport(_))
        ));
        assert!(matches!(
            ImportDocument::parse(r#"{"sessions": "oops"}"#),
            Err(ChatError::MalformedImport(_))
        ));
        assert!(matches!(
            ImportDocument::parse(r#"{"currentMessages": [{"id": "1"}]}"#),
            Err(ChatError::MalformedImport(_))
        ));
    }
}

//! Conversation History
//!
//! Per-conversation rolling window of recent messages, handed to a
//! language model alongside the system prompt. Each window keeps at most
//! [`MAX_HISTORY_MESSAGES`]; older messages fall off the front.

use std::collections::{HashMap, VecDeque};

use crate::chat::ChatMessage;

pub const MAX_HISTORY_MESSAGES: usize = 10;

/// Bounded message window for one conversation
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, dropping the oldest messages beyond capacity
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(MAX_HISTORY_MESSAGES)
    }
}

/// History windows keyed by conversation id
#[derive(Debug, Clone)]
pub struct HistoryStore {
    buffers: HashMap<String, HistoryBuffer>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, conversation_id: &str) -> Option<&HistoryBuffer> {
        self.buffers.get(conversation_id)
    }

    /// Window for `conversation_id`, created empty on first use
    fn entry(&mut self, conversation_id: &str) -> &mut HistoryBuffer {
        let capacity = self.capacity;
        self.buffers
            .entry(conversation_id.to_string())
            .or_insert_with(|| HistoryBuffer::new(capacity))
    }

    pub fn record(&mut self, conversation_id: &str, message: ChatMessage) {
        self.entry(conversation_id).push(message);
    }

    /// Move a window to a new id, replacing anything stored there
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(buffer) = self.buffers.remove(from) {
            self.buffers.insert(to.to_string(), buffer);
        }
    }

    /// Copy a window to a new id, keeping the original
    pub fn fork(&mut self, from: &str, to: &str) {
        if let Some(buffer) = self.buffers.get(from).cloned() {
            self.buffers.insert(to.to_string(), buffer);
        }
    }

    pub fn remove(&mut self, conversation_id: &str) -> Option<HistoryBuffer> {
        self.buffers.remove(conversation_id)
    }

    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(MAX_HISTORY_MESSAGES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_keeps_most_recent() {
        let mut buffer = HistoryBuffer::default();
        for i in 0..15 {
            buffer.push(ChatMessage::user(format!("m{}", i)));
        }

        assert_eq!(buffer.len(), MAX_HISTORY_MESSAGES);
        let texts: Vec<_> = buffer.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.first(), Some(&"m5"));
        assert_eq!(texts.last(), Some(&"m14"));
    }

    #[test]
    fn test_conversations_are_separate() {
        let mut store = HistoryStore::new(2);
        store.record("a", ChatMessage::user("one"));
        store.record("a", ChatMessage::bot("two"));
        store.record("a", ChatMessage::user("three"));
        store.record("b", ChatMessage::user("other"));

        assert_eq!(store.get("a").unwrap().len(), 2);
        assert_eq!(store.get("b").unwrap().len(), 1);
        assert!(store.get("c").is_none());
    }

    #[test]
    fn test_rename_and_remove() {
        let mut store = HistoryStore::default();
        store.record("draft", ChatMessage::user("hi"));
        store.rename("draft", "session-1");

        assert!(store.get("draft").is_none());
        assert_eq!(store.get("session-1").unwrap().len(), 1);
        store.fork("session-1", "session-2");
        assert_eq!(store.get("session-2").unwrap().len(), 1);
        assert!(store.remove("session-1").is_some());
        assert!(store.get("session-1").is_none());
    }
}

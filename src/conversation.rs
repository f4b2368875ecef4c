use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageResult};
use crate::types::{ChatMessage, Conversation};

pub const DEFAULT_HISTORY_KEY: &str = "chatHistory";

/// Loads, saves and resets the single persisted conversation.
///
/// Storage is best effort: every failure is logged and the caller still gets
/// a usable in-memory conversation.
pub struct ConversationStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> ConversationStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_HISTORY_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Restores the saved conversation, or the greeting when there is none.
    pub fn load(&self) -> Conversation {
        let stored = self.guarded("load chat history", |storage, key| {
            let Some(raw) = storage.get(key)? else {
                return Ok(None);
            };
            let messages: Vec<ChatMessage> = serde_json::from_str(&raw)?;
            Ok(Some(messages))
        });

        match stored.flatten() {
            Some(messages) if !messages.is_empty() => {
                debug!(count = messages.len(), "restored chat history");
                Conversation::from_messages(messages)
            }
            _ => Conversation::greeting(),
        }
    }

    pub fn append(conversation: &Conversation, message: ChatMessage) -> Conversation {
        conversation.append(message)
    }

    /// Saves the conversation once it holds more than the seed greeting.
    pub fn persist(&self, conversation: &Conversation) {
        if conversation.is_seed_only() {
            return;
        }
        self.guarded("save chat history", |storage, key| {
            let raw = serde_json::to_string(conversation.messages())?;
            storage.set(key, &raw)
        });
    }

    /// Clears the saved history and starts over from the greeting.
    pub fn reset(&self) -> Conversation {
        self.guarded("clear chat history", |storage, key| storage.remove(key));
        Conversation::greeting()
    }

    fn guarded<T>(
        &self,
        action: &str,
        op: impl FnOnce(&S, &str) -> StorageResult<T>,
    ) -> Option<T> {
        match op(&self.storage, &self.key) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to {action}");
                None
            }
        }
    }
}

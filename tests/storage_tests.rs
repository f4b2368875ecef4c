//! Integration tests for on-disk chat history
//!
//! Exercises the file store and the conversation store on top of it.

use smilebot::conversation::ConversationStore;
use smilebot::storage::{FileStore, KeyValueStore};
use smilebot::types::{ChatMessage, Conversation, GREETING, Role};
use tempfile::TempDir;

fn temp_store() -> (TempDir, FileStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("data"));
    (dir, store)
}

mod file_store_tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let (_dir, store) = temp_store();
        let value = r#"[{"role":"user","content":"Hi"}]"#;

        store.set("chatHistory", value).expect("Failed to set");
        assert_eq!(store.get("chatHistory").unwrap().as_deref(), Some(value));
        assert!(store.root().join("chatHistory.json").exists());
    }

    #[test]
    fn test_get_nonexistent() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let (_dir, store) = temp_store();
        store.set("chatHistory", "first").unwrap();
        store.set("chatHistory", "second").unwrap();

        assert_eq!(store.get("chatHistory").unwrap().as_deref(), Some("second"));
        let leftovers: Vec<_> = std::fs::read_dir(store.root())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_remove() {
        let (_dir, store) = temp_store();
        store.set("to_delete", "value").unwrap();
        store.remove("to_delete").expect("Failed to remove");
        assert_eq!(store.get("to_delete").unwrap(), None);

        // Removing again is not an error.
        store.remove("to_delete").expect("Second remove failed");
    }

    #[test]
    fn test_keys_are_sanitized() {
        let (_dir, store) = temp_store();
        store.set("../escape/attempt", "value").unwrap();

        assert_eq!(store.get("../escape/attempt").unwrap().as_deref(), Some("value"));
        assert!(store.root().join("___escape_attempt.json").exists());
    }
}

mod conversation_store_tests {
    use super::*;

    #[test]
    fn test_history_round_trips_through_disk() {
        let (_dir, store) = temp_store();
        let conversations = ConversationStore::new(store.clone());

        let mut reply = ChatMessage::assistant("Use a soft-bristled brush.");
        reply.suggested_questions = Some(vec!["How hard should I brush?".into()]);
        let conversation = Conversation::greeting()
            .append(ChatMessage::user("Which brush is best?"))
            .append(reply);
        conversations.persist(&conversation);

        let reopened = ConversationStore::new(store);
        assert_eq!(reopened.load(), conversation);
    }

    #[test]
    fn test_corrupt_history_falls_back_to_greeting() {
        let (_dir, store) = temp_store();
        store.set("chatHistory", "{not json").unwrap();

        let loaded = ConversationStore::new(store).load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.messages()[0].content, GREETING);
    }

    #[test]
    fn test_legacy_history_is_readable() {
        let (_dir, store) = temp_store();
        store
            .set(
                "chatHistory",
                r#"[{"role":"model","content":"Hello!"},{"role":"user","content":"Hi"}]"#,
            )
            .unwrap();

        let loaded = ConversationStore::new(store).load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.messages()[0].role, Role::Assistant);
    }

    #[test]
    fn test_custom_key_and_reset() {
        let (_dir, store) = temp_store();
        let conversations = ConversationStore::with_key(store.clone(), "clinic-7");
        let conversation = Conversation::greeting().append(ChatMessage::user("Hello"));
        conversations.persist(&conversation);
        assert!(store.get("clinic-7").unwrap().is_some());
        assert!(store.get("chatHistory").unwrap().is_none());

        let fresh = conversations.reset();
        assert_eq!(fresh, Conversation::greeting());
        assert!(store.get("clinic-7").unwrap().is_none());
    }

    #[test]
    fn test_unwritable_root_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be.
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "occupied").unwrap();

        let conversations = ConversationStore::new(FileStore::new(&blocker));
        let conversation = Conversation::greeting().append(ChatMessage::user("Hello"));
        conversations.persist(&conversation);

        assert_eq!(conversations.load(), Conversation::greeting());
    }
}

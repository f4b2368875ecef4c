//! Integration tests for the chat session
//!
//! Drives full turns against a scripted backend and checks what ends up in
//! the conversation and in storage.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use smilebot::ai::ModelBackend;
use smilebot::conversation::{ConversationStore, DEFAULT_HISTORY_KEY};
use smilebot::session::{ChatSession, FAILURE_MESSAGE, SessionState, TurnOutcome};
use smilebot::storage::{KeyValueStore, MemoryStore};
use smilebot::types::{ChatMessage, GREETING, RawReply, Role, Turn};
use smilebot::{ChatError, ChatResult};

#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<ChatResult<RawReply>>>,
    seen: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedBackend {
    fn with(replies: Vec<ChatResult<RawReply>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::default(),
        }
    }

    fn requests(&self) -> Vec<Vec<Turn>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(&self, history: &[Turn]) -> ChatResult<RawReply> {
        self.seen.lock().unwrap().push(history.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ChatError::transport("script exhausted")))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn open_session() -> (Arc<MemoryStore>, ChatSession<Arc<MemoryStore>>) {
    let storage = Arc::new(MemoryStore::new());
    let session = ChatSession::open(ConversationStore::new(storage.clone()));
    (storage, session)
}

fn stored_messages(storage: &MemoryStore) -> Option<Vec<ChatMessage>> {
    storage
        .get(DEFAULT_HISTORY_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

mod turn_tests {
    use super::*;

    #[tokio::test]
    async fn answered_turn_is_parsed_and_persisted() {
        let backend = ScriptedBackend::with(vec![Ok(RawReply::text(
            "Brush twice daily.\n---\n- Why fluoride?\n- How often to floss?",
        ))]);
        let (storage, mut session) = open_session();

        let outcome = session.submit(&backend, "  How should I brush?  ").await.unwrap();
        assert_eq!(outcome, TurnOutcome::Answered);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.last_error().is_none());

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, GREETING);
        assert_eq!(messages[1], ChatMessage::user("How should I brush?"));
        assert_eq!(messages[2].content, "Brush twice daily.");
        assert_eq!(
            messages[2].suggested_questions,
            Some(vec![
                "Why fluoride?".to_string(),
                "How often to floss?".to_string()
            ])
        );

        assert_eq!(stored_messages(&storage).as_deref(), Some(messages));
    }

    #[tokio::test]
    async fn model_receives_full_history_without_attachments() {
        let backend = ScriptedBackend::with(vec![
            Ok(RawReply::text("Here is a diagram.\n---\n- Next?").with_image("image/png", vec![7])),
            Ok(RawReply::text("Sure.")),
        ]);
        let (_storage, mut session) = open_session();

        session.submit(&backend, "Draw a molar").await.unwrap();
        session.submit(&backend, "Thanks").await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].len(), 2);
        let second = &requests[1];
        assert_eq!(second.len(), 4);
        assert_eq!(
            second[2],
            Turn {
                role: Role::Assistant,
                content: "Here is a diagram.".into()
            }
        );
        assert_eq!(second[3].role, Role::User);
    }

    #[tokio::test]
    async fn empty_reply_becomes_failure_turn() {
        let backend = ScriptedBackend::with(vec![Ok(RawReply::default())]);
        let (storage, mut session) = open_session();

        let outcome = session.submit(&backend, "Hello?").await.unwrap();
        assert_eq!(outcome, TurnOutcome::Failed(ChatError::EmptyResponse));
        assert!(!session.is_busy());
        assert_eq!(session.last_error(), Some(FAILURE_MESSAGE));

        let last = session.conversation().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, FAILURE_MESSAGE);
        assert_eq!(stored_messages(&storage).map(|m| m.len()), Some(3));
    }

    #[tokio::test]
    async fn banner_clears_after_next_success() {
        let backend = ScriptedBackend::with(vec![
            Err(ChatError::transport("connection reset")),
            Ok(RawReply::text("Back online!")),
        ]);
        let (_storage, mut session) = open_session();

        let outcome = session.submit(&backend, "First try").await.unwrap();
        assert!(matches!(outcome, TurnOutcome::Failed(ChatError::Transport(_))));
        assert!(session.last_error().is_some());

        session.submit(&backend, "Second try").await.unwrap();
        assert!(session.last_error().is_none());
        assert_eq!(session.conversation().len(), 5);
    }

    #[tokio::test]
    async fn image_only_reply_is_kept() {
        let backend =
            ScriptedBackend::with(vec![Ok(RawReply::default().with_image("image/png", vec![1, 2, 3]))]);
        let (_storage, mut session) = open_session();

        session.submit(&backend, "Show me a diagram").await.unwrap();
        let last = session.conversation().last().unwrap();
        assert_eq!(last.content, "");
        assert_eq!(last.image_url.as_deref(), Some("data:image/png;base64,AQID"));
        assert!(session.last_error().is_none());
    }
}

mod lifecycle_tests {
    use super::*;

    #[test]
    fn user_turn_is_persisted_before_reply() {
        let (storage, mut session) = open_session();
        session.begin("Do I need a root canal?").unwrap();

        let stored = stored_messages(&storage).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].role, Role::User);
    }

    #[test]
    fn greeting_alone_is_never_written() {
        let (storage, session) = open_session();
        assert_eq!(session.conversation().len(), 1);
        assert!(storage.get(DEFAULT_HISTORY_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn new_conversation_after_several_turns() {
        let backend = ScriptedBackend::with(vec![
            Ok(RawReply::text("One.")),
            Ok(RawReply::text("Two.")),
        ]);
        let (storage, mut session) = open_session();
        session.submit(&backend, "a").await.unwrap();
        session.submit(&backend, "b").await.unwrap();
        assert_eq!(session.conversation().len(), 5);

        session.start_new_conversation();
        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.conversation().messages()[0].content, GREETING);
        assert!(storage.get(DEFAULT_HISTORY_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn history_survives_reopening() {
        let backend = ScriptedBackend::with(vec![Ok(RawReply::text("Use a soft brush."))]);
        let storage = Arc::new(MemoryStore::new());

        let mut first = ChatSession::open(ConversationStore::new(storage.clone()));
        first.submit(&backend, "Which brush?").await.unwrap();
        let expected = first.conversation().clone();

        let reopened = ChatSession::open(ConversationStore::new(storage));
        assert_eq!(reopened.conversation(), &expected);
    }
}

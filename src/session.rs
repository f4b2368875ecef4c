//! The chat session driven by the UI: one conversation, at most one pending reply.

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::ai::ModelBackend;
use crate::conversation::ConversationStore;
use crate::error::{ChatError, ChatResult};
use crate::parser::parse_reply;
use crate::storage::KeyValueStore;
use crate::types::{ChatMessage, Conversation, RawReply, Turn};

pub const FAILURE_MESSAGE: &str = "Oops! My dental tools seem to be malfunctioning. I couldn't get a response. Maybe try asking in a different way?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse { ticket: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("still waiting for the previous reply")]
    Busy,
    #[error("message is empty")]
    EmptyInput,
}

/// A request handed out by [`ChatSession::begin`].
#[derive(Clone, Debug)]
pub struct PendingTurn {
    pub ticket: u64,
    pub history: Vec<Turn>,
}

#[derive(Debug, PartialEq)]
pub enum TurnOutcome {
    Answered,
    Failed(ChatError),
    /// The conversation was reset while the reply was in flight.
    Discarded,
}

pub struct ChatSession<S> {
    store: ConversationStore<S>,
    conversation: Conversation,
    state: SessionState,
    last_error: Option<String>,
    next_ticket: u64,
}

impl<S: KeyValueStore> ChatSession<S> {
    pub fn open(store: ConversationStore<S>) -> Self {
        let conversation = store.load();
        Self {
            store,
            conversation,
            state: SessionState::Idle,
            last_error: None,
            next_ticket: 1,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::AwaitingResponse { .. })
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn store(&self) -> &ConversationStore<S> {
        &self.store
    }

    /// Records the user's message and returns the history to send to the model.
    pub fn begin(&mut self, user_text: &str) -> Result<PendingTurn, SubmitError> {
        if self.is_busy() {
            return Err(SubmitError::Busy);
        }
        let text = user_text.trim();
        if text.is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        self.push(ChatMessage::user(text));
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state = SessionState::AwaitingResponse { ticket };
        debug!(ticket, turns = self.conversation.len(), "awaiting reply");

        Ok(PendingTurn {
            ticket,
            history: self.conversation.turns(),
        })
    }

    /// Settles the pending request and returns the session to idle.
    pub fn finish(&mut self, ticket: u64, result: ChatResult<RawReply>) -> TurnOutcome {
        if self.state != (SessionState::AwaitingResponse { ticket }) {
            warn!(ticket, "dropping reply for a request that is no longer pending");
            return TurnOutcome::Discarded;
        }
        self.state = SessionState::Idle;

        match result.and_then(|raw| parse_reply(&raw)) {
            Ok(message) => {
                self.last_error = None;
                self.push(message);
                TurnOutcome::Answered
            }
            Err(err) => {
                error!(error = %err, "failed to get a reply");
                self.last_error = Some(FAILURE_MESSAGE.to_string());
                self.push(ChatMessage::assistant(FAILURE_MESSAGE));
                TurnOutcome::Failed(err)
            }
        }
    }

    /// Runs one full turn against `backend`.
    pub async fn submit(
        &mut self,
        backend: &dyn ModelBackend,
        user_text: &str,
    ) -> Result<TurnOutcome, SubmitError> {
        let pending = self.begin(user_text)?;
        let result = backend.generate(&pending.history).await;
        Ok(self.finish(pending.ticket, result))
    }

    /// Clears saved history; a reply still in flight will be discarded.
    pub fn start_new_conversation(&mut self) {
        self.conversation = self.store.reset();
        self.state = SessionState::Idle;
        self.last_error = None;
    }

    fn push(&mut self, message: ChatMessage) {
        self.conversation = ConversationStore::<S>::append(&self.conversation, message);
        self.store.persist(&self.conversation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn session() -> ChatSession<MemoryStore> {
        ChatSession::open(ConversationStore::new(MemoryStore::new()))
    }

    #[test]
    fn begin_guards_single_flight() {
        let mut session = session();
        let pending = session.begin("Why do my teeth hurt?").unwrap();
        assert!(session.is_busy());
        assert_eq!(pending.history.len(), 2);

        assert!(matches!(session.begin("Hello?"), Err(SubmitError::Busy)));
        assert_eq!(session.conversation().len(), 2);
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut session = session();
        assert!(matches!(session.begin("   "), Err(SubmitError::EmptyInput)));
        assert!(!session.is_busy());
        assert_eq!(session.conversation().len(), 1);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut session = session();
        let pending = session.begin("Is whitening safe?").unwrap();
        session.start_new_conversation();

        let outcome = session.finish(pending.ticket, Ok(RawReply::text("Mostly.")));
        assert_eq!(outcome, TurnOutcome::Discarded);
        assert_eq!(session.conversation().len(), 1);
        assert!(!session.is_busy());
    }
}

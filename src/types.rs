use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Older histories were written with the backend's own name for this role.
    #[serde(alias = "model")]
    Assistant,
}

/// One turn of the conversation as it is rendered and persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Self-contained `data:` URL for an image attached to an assistant turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Follow-up questions offered after an assistant turn. Never empty when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_questions: Option<Vec<String>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            image_url: None,
            suggested_questions: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            image_url: None,
            suggested_questions: None,
        }
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self.role, Role::Assistant)
    }

    pub fn to_turn(&self) -> Turn {
        Turn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// The part of a message that is sent back to the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A model reply before it is normalized into a [`ChatMessage`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawReply {
    pub text: Option<String>,
    /// Images in the order the model produced them.
    pub images: Vec<InlineImage>,
}

impl RawReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.images.push(InlineImage {
            mime_type: mime_type.into(),
            data,
        });
        self
    }
}

/// Ordered history for one session. Grows only by [`Conversation::append`].
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

pub const GREETING: &str = "Hello! I'm Dr. Rahul Birajdar (BDS), your friendly dental specialist. I can explain everything from daily brushing to more complex dental procedures, and even draw diagrams to make things clearer. How can I help you with your oral health today?";

impl Conversation {
    /// A fresh conversation holding only the assistant greeting.
    pub fn greeting() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    pub(crate) fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// Returns a new conversation with `message` at the end; `self` is untouched.
    pub fn append(&self, message: ChatMessage) -> Self {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend_from_slice(&self.messages);
        messages.push(message);
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// True while nothing beyond the seed greeting has been exchanged.
    pub fn is_seed_only(&self) -> bool {
        self.messages.len() <= 1
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.messages.iter().map(ChatMessage::to_turn).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_leaves_original_untouched() {
        let original = Conversation::greeting();
        let before = original.clone();
        let grown = original.append(ChatMessage::user("Is flossing necessary?"));

        assert_eq!(original, before);
        assert_eq!(original.len(), 1);
        assert_eq!(grown.len(), 2);
        assert_eq!(grown.last().unwrap().content, "Is flossing necessary?");
    }

    #[test]
    fn legacy_model_role_reads_as_assistant() {
        let json = r#"[{"role":"model","content":"Hi"},{"role":"user","content":"Hey"}]"#;
        let messages: Vec<ChatMessage> = serde_json::from_str(json).unwrap();
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let json = serde_json::to_string(&ChatMessage::user("Hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hi"}"#);

        let mut reply = ChatMessage::assistant("See diagram");
        reply.image_url = Some("data:image/png;base64,AA==".into());
        reply.suggested_questions = Some(vec!["Why?".into()]);
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains(r#""imageUrl":"data:image/png;base64,AA==""#));
        assert!(json.contains(r#""suggestedQuestions":["Why?"]"#));
    }

    #[test]
    fn turns_drop_images_and_follow_ups() {
        let mut reply = ChatMessage::assistant("Answer");
        reply.image_url = Some("data:image/png;base64,AA==".into());
        reply.suggested_questions = Some(vec!["Next?".into()]);
        let conversation = Conversation::greeting().append(reply);

        let turns = conversation.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(
            turns[1],
            Turn {
                role: Role::Assistant,
                content: "Answer".into()
            }
        );
    }
}

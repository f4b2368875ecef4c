//! Normalizes a raw model reply into a [`ChatMessage`].
//!
//! Replies follow the persona's format: the answer, then optionally a line
//! holding only `---` and a list of `- question` lines.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{ChatError, ChatResult};
use crate::types::{ChatMessage, InlineImage, RawReply, Role};

pub const FOLLOW_UP_SEPARATOR: &str = "\n---\n";
const QUESTION_PREFIX: &str = "- ";

pub fn parse_reply(reply: &RawReply) -> ChatResult<ChatMessage> {
    let text = reply.text.as_deref().filter(|t| !t.is_empty());
    // Only the first image is kept; multi-image replies are not part of the
    // persona's format.
    let image_url = reply.images.first().map(image_data_url);

    if text.is_none() && image_url.is_none() {
        return Err(ChatError::EmptyResponse);
    }

    // Whitespace-only text still counts as a reply, just an empty one.
    let (content, suggested_questions) = match text.filter(|t| !t.trim().is_empty()) {
        Some(text) => split_reply(text),
        None => (String::new(), None),
    };

    Ok(ChatMessage {
        role: Role::Assistant,
        content,
        image_url,
        suggested_questions,
    })
}

/// Splits reply text at the first follow-up separator.
pub fn split_reply(text: &str) -> (String, Option<Vec<String>>) {
    match text.split_once(FOLLOW_UP_SEPARATOR) {
        Some((answer, block)) => (answer.trim().to_string(), parse_follow_ups(block)),
        None => (text.trim().to_string(), None),
    }
}

fn parse_follow_ups(block: &str) -> Option<Vec<String>> {
    let questions: Vec<String> = block
        .lines()
        .filter_map(|line| line.trim().strip_prefix(QUESTION_PREFIX))
        .map(|question| question.trim().to_string())
        .filter(|question| !question.is_empty())
        .collect();

    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

/// Renders content and questions back into the reply format.
pub fn format_reply(content: &str, questions: &[String]) -> String {
    if questions.is_empty() {
        return content.to_string();
    }
    let list = questions
        .iter()
        .map(|q| format!("{QUESTION_PREFIX}{q}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{content}{FOLLOW_UP_SEPARATOR}{list}")
}

pub fn image_data_url(image: &InlineImage) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type,
        BASE64.encode(&image.data)
    )
}

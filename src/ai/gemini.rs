use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModelBackend, SYSTEM_INSTRUCTION};
use crate::error::{ChatError, ChatResult};
use crate::types::{InlineImage, RawReply, Role, Turn};

pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> ChatResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

fn build_request<'a>(instruction: &'a str, history: &'a [Turn]) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![TextPart { text: instruction }],
        },
        contents: history
            .iter()
            .map(|turn| Content {
                role: Some(wire_role(turn.role)),
                parts: vec![TextPart {
                    text: &turn.content,
                }],
            })
            .collect(),
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<Blob>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Collects the first candidate's text parts and inline images.
    ///
    /// A blocked prompt or a candidate without parts gives an empty reply,
    /// which the parser turns into [`ChatError::EmptyResponse`].
    pub fn into_raw_reply(self) -> ChatResult<RawReply> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            debug!(%reason, "gemini blocked the prompt");
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Ok(RawReply::default());
        };
        if let Some(reason) = &candidate.finish_reason {
            debug!(%reason, "gemini finished");
        }

        let mut text: Option<String> = None;
        let mut images = Vec::new();
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if part.thought.unwrap_or(false) {
                continue;
            }
            if let Some(piece) = part.text {
                text.get_or_insert_with(String::new).push_str(&piece);
            }
            if let Some(blob) = part.inline_data {
                images.push(InlineImage {
                    mime_type: blob.mime_type,
                    data: BASE64.decode(blob.data.as_bytes())?,
                });
            }
        }

        Ok(RawReply { text, images })
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn generate(&self, history: &[Turn]) -> ChatResult<RawReply> {
        let request = build_request(SYSTEM_INSTRUCTION, history);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(ChatError::transport(format!(
                "Gemini API error {status}: {message}"
            )));
        }

        serde_json::from_str::<GenerateContentResponse>(&body)?.into_raw_reply()
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

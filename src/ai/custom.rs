use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::ModelBackend;
use crate::error::{ChatError, ChatResult};
use crate::types::{InlineImage, RawReply, Turn};

/// Any HTTP endpoint speaking `{ messages }` in and `{ content, image? }` out.
pub struct CustomBackend {
    endpoint: String,
    client: Client,
}

impl CustomBackend {
    pub fn new(endpoint: String, timeout: Duration) -> ChatResult<Self> {
        Ok(Self {
            endpoint,
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Turn],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    image: Option<ImagePayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagePayload {
    mime_type: String,
    data: String,
}

fn reply_from_body(body: String) -> ChatResult<RawReply> {
    match serde_json::from_str::<ChatResponse>(&body) {
        Ok(ChatResponse {
            content: None,
            image: None,
        })
        | Err(_) => Ok(RawReply::text(body)),
        Ok(ChatResponse { content, image }) => {
            let images = match image {
                Some(image) => vec![InlineImage {
                    mime_type: image.mime_type,
                    data: BASE64.decode(image.data.as_bytes())?,
                }],
                None => Vec::new(),
            };
            Ok(RawReply {
                text: content,
                images,
            })
        }
    }
}

#[async_trait]
impl ModelBackend for CustomBackend {
    async fn generate(&self, history: &[Turn]) -> ChatResult<RawReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { messages: history })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            reply_from_body(body)
        } else {
            Err(ChatError::transport(format!(
                "LLM endpoint error {status}: {body}"
            )))
        }
    }

    fn name(&self) -> &'static str {
        "custom"
    }
}

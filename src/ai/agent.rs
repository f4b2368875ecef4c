use anyhow::Result;
use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Chat;
use rig::providers;

use super::{ModelBackend, SYSTEM_INSTRUCTION};
use crate::error::{ChatError, ChatResult};
use crate::types::{RawReply, Role, Turn};

enum AgentProvider {
    OpenAI(providers::openai::Client),
    Anthropic(providers::anthropic::Client),
    Ollama(providers::ollama::Client),
}

/// Text-only chat through a Rig agent carrying the dentist persona.
pub struct AgentBackend {
    provider: AgentProvider,
    model: String,
}

impl AgentBackend {
    pub fn openai(api_key: &str, model: String) -> Self {
        Self {
            provider: AgentProvider::OpenAI(providers::openai::Client::new(api_key)),
            model,
        }
    }

    pub fn anthropic(api_key: &str, model: String) -> Self {
        Self {
            provider: AgentProvider::Anthropic(providers::anthropic::Client::new(api_key)),
            model,
        }
    }

    /// Ollama endpoint comes from `OLLAMA_HOST`, defaulting to localhost.
    pub fn ollama(model: String) -> Self {
        Self {
            provider: AgentProvider::Ollama(providers::ollama::Client::new()),
            model,
        }
    }

    async fn chat(&self, message: &str, history: Vec<rig::message::Message>) -> Result<String> {
        match &self.provider {
            AgentProvider::OpenAI(client) => {
                let agent = client
                    .agent(&self.model)
                    .preamble(SYSTEM_INSTRUCTION)
                    .max_tokens(4096)
                    .temperature(0.7)
                    .build();
                Ok(agent.chat(message, history).await?)
            }
            AgentProvider::Anthropic(client) => {
                let agent = client
                    .agent(&self.model)
                    .preamble(SYSTEM_INSTRUCTION)
                    .max_tokens(4096)
                    .temperature(0.7)
                    .build();
                Ok(agent.chat(message, history).await?)
            }
            AgentProvider::Ollama(client) => {
                let agent = client
                    .agent(&self.model)
                    .preamble(SYSTEM_INSTRUCTION)
                    .build();
                Ok(agent.chat(message, history).await?)
            }
        }
    }
}

fn to_rig_message(turn: &Turn) -> rig::message::Message {
    match turn.role {
        Role::User => rig::message::Message::user(&turn.content),
        Role::Assistant => rig::message::Message::assistant(&turn.content),
    }
}

#[async_trait]
impl ModelBackend for AgentBackend {
    async fn generate(&self, history: &[Turn]) -> ChatResult<RawReply> {
        let Some((last, earlier)) = history.split_last() else {
            return Err(ChatError::transport("no messages provided"));
        };
        let rig_history = earlier.iter().map(to_rig_message).collect();
        let text = self.chat(&last.content, rig_history).await?;
        Ok(RawReply::text(text))
    }

    fn name(&self) -> &'static str {
        match self.provider {
            AgentProvider::OpenAI(_) => "openai",
            AgentProvider::Anthropic(_) => "anthropic",
            AgentProvider::Ollama(_) => "ollama",
        }
    }
}

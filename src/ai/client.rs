use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{AgentBackend, CustomBackend, GeminiBackend, ModelBackend};
use crate::config::{Provider, Settings};
use crate::error::{ChatError, ChatResult};
use crate::types::{RawReply, Turn};

const NOT_CONFIGURED: &str = "set GEMINI_API_KEY (or API_KEY), LLM_ENDPOINT, OPENAI_API_KEY, ANTHROPIC_API_KEY, or LLM_USE_OLLAMA=true";

/// Builds the backend chosen by `settings`.
///
/// Without a provider the returned backend fails every turn with
/// [`ChatError::NotConfigured`], so the chat still opens and says why.
pub fn backend_from_settings(settings: &Settings) -> ChatResult<Arc<dyn ModelBackend>> {
    let Some(provider) = &settings.provider else {
        return Ok(Arc::new(UnconfiguredBackend));
    };
    info!(provider = provider.name(), "using AI provider");

    let backend: Arc<dyn ModelBackend> = match provider {
        Provider::Gemini {
            api_key,
            model,
            base_url,
        } => Arc::new(GeminiBackend::new(
            api_key.clone(),
            model.clone(),
            base_url.clone(),
            settings.request_timeout,
        )?),
        Provider::Custom { endpoint } => Arc::new(CustomBackend::new(
            endpoint.clone(),
            settings.request_timeout,
        )?),
        Provider::OpenAI { api_key, model } => {
            Arc::new(AgentBackend::openai(api_key, model.clone()))
        }
        Provider::Anthropic { api_key, model } => {
            Arc::new(AgentBackend::anthropic(api_key, model.clone()))
        }
        Provider::Ollama { model } => Arc::new(AgentBackend::ollama(model.clone())),
    };
    Ok(backend)
}

pub struct UnconfiguredBackend;

#[async_trait]
impl ModelBackend for UnconfiguredBackend {
    async fn generate(&self, _history: &[Turn]) -> ChatResult<RawReply> {
        Err(ChatError::NotConfigured(NOT_CONFIGURED.to_string()))
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}

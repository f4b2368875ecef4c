/// AI module for smilebot
///
/// Every backend turns the conversation history into one raw reply. Providers
/// are chosen from [`crate::config::Settings`]:
///
/// - `gemini` - Google Generative Language REST API, text and inline images
/// - `custom` - any endpoint accepting `{ messages: [{role, content}] }`
/// - `agent` - OpenAI, Anthropic and Ollama through Rig (text only)
///
/// # Usage
///
/// ```rust,no_run
/// use smilebot::ai::backend_from_settings;
/// use smilebot::config::Settings;
/// use smilebot::types::{Role, Turn};
///
/// # async fn example() -> anyhow::Result<()> {
/// let backend = backend_from_settings(&Settings::from_env()?)?;
/// let reply = backend
///     .generate(&[Turn { role: Role::User, content: "Why do teeth yellow?".into() }])
///     .await?;
/// # Ok(())
/// # }
/// ```
mod agent;
mod client;
mod custom;
mod gemini;
mod persona;

use async_trait::async_trait;

use crate::error::ChatResult;
use crate::types::{RawReply, Turn};

pub use agent::AgentBackend;
pub use client::{UnconfiguredBackend, backend_from_settings};
pub use custom::CustomBackend;
pub use gemini::{GeminiBackend, GenerateContentResponse};
pub use persona::SYSTEM_INSTRUCTION;

/// The model collaborator: full history in, one raw reply out.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, history: &[Turn]) -> ChatResult<RawReply>;

    fn name(&self) -> &'static str;
}

//! Runtime settings read from the environment (and `.env` via `dotenvy` in the binary).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::conversation::DEFAULT_HISTORY_KEY;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:latest";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Which backend answers the chat, in the order they are checked.
#[derive(Clone, Debug, PartialEq)]
pub enum Provider {
    Gemini {
        api_key: String,
        model: String,
        base_url: String,
    },
    Custom {
        endpoint: String,
    },
    OpenAI {
        api_key: String,
        model: String,
    },
    Anthropic {
        api_key: String,
        model: String,
    },
    Ollama {
        model: String,
    },
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini { .. } => "gemini",
            Provider::Custom { .. } => "custom",
            Provider::OpenAI { .. } => "openai",
            Provider::Anthropic { .. } => "anthropic",
            Provider::Ollama { .. } => "ollama",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// `None` when no provider is configured; the chat then reports it per turn.
    pub provider: Option<Provider>,
    pub data_dir: Option<PathBuf>,
    pub history_key: String,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: None,
            data_dir: None,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let provider = if let Some(api_key) = var("GEMINI_API_KEY").or_else(|| var("API_KEY")) {
            Some(Provider::Gemini {
                api_key,
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: var("GEMINI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            })
        } else if let Some(endpoint) = var("LLM_ENDPOINT") {
            Some(Provider::Custom { endpoint })
        } else if let Some(api_key) = var("OPENAI_API_KEY") {
            Some(Provider::OpenAI {
                api_key,
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            })
        } else if let Some(api_key) = var("ANTHROPIC_API_KEY") {
            Some(Provider::Anthropic {
                api_key,
                model: var("ANTHROPIC_MODEL")
                    .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
            })
        } else if is_truthy(var("LLM_USE_OLLAMA").as_deref()) {
            Some(Provider::Ollama {
                model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            })
        } else {
            None
        };

        let request_timeout = match var("SMILEBOT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::Invalid {
                        key: "SMILEBOT_REQUEST_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => Settings::default().request_timeout,
        };

        Ok(Self {
            provider,
            data_dir: var("SMILEBOT_DATA_DIR").map(PathBuf::from),
            history_key: var("SMILEBOT_HISTORY_KEY")
                .unwrap_or_else(|| DEFAULT_HISTORY_KEY.to_string()),
            request_timeout,
        })
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

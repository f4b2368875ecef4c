use thiserror::Error;

/// Failures of a single request/response cycle with the model.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatError {
    #[error("The model returned an empty response. Please try rephrasing your message.")]
    EmptyResponse,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("no AI provider configured: {0}")]
    NotConfigured(String),
}

impl ChatError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Transport(format!("malformed payload: {err}"))
    }
}

impl From<base64::DecodeError> for ChatError {
    fn from(err: base64::DecodeError) -> Self {
        ChatError::Transport(format!("malformed image payload: {err}"))
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Transport(err.to_string())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackDumpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Slack API error in `{method}`: {error}")]
    Api { method: String, error: String },

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SlackDumpError {
    pub(crate) fn api(method: &str, error: impl Into<String>) -> Self {
        Self::Api {
            method: method.to_string(),
            error: error.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlackDumpError>;

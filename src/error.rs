use slack_morphism::errors::SlackClientError;
use thiserror::Error;

/// Main error type for the Slack socket bot
#[derive(Error, Debug)]
pub enum BotError {
    #[error("{0} environment variable not set")]
    MissingEnvVar(&'static str),

    #[error("Failed to build Slack HTTP connector: {0}")]
    Connector(#[from] std::io::Error),

    #[error("Slack error: {0}")]
    Slack(String),
}

impl From<SlackClientError> for BotError {
    fn from(error: SlackClientError) -> Self {
        BotError::Slack(error.to_string())
    }
}

/// Convenience Result type
pub type Result<T> = std::result::Result<T, BotError>;

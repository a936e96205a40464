use crate::error::{BotError, Result};
use std::env;
use std::fmt;

pub const APP_TOKEN_VAR: &str = "SLACK_APP_TOKEN";
pub const AUTH_TOKEN_VAR: &str = "SLACK_AUTH_TOKEN";
pub const CHANNEL_ID_VAR: &str = "SLACK_CHANNEL_ID";

/// Slack credentials and target channel, read once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct SlackConfig {
    app_token: String,
    auth_token: String,
    channel_id: String,
}

impl SlackConfig {
    /// Build a config from an arbitrary variable lookup.
    ///
    /// Variables are read in a fixed order and the first missing one is reported;
    /// values are taken as-is.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| lookup(name).ok_or(BotError::MissingEnvVar(name));

        let app_token = require(APP_TOKEN_VAR)?;
        let auth_token = require(AUTH_TOKEN_VAR)?;
        let channel_id = require(CHANNEL_ID_VAR)?;

        Ok(Self {
            app_token,
            auth_token,
            channel_id,
        })
    }

    /// App-level token (`xapp-...`) used to open the socket connection
    pub fn app_token(&self) -> &str {
        &self.app_token
    }

    /// Bot token (`xoxb-...`) used for Web API calls
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("app_token", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// Load configuration from environment variables
pub fn load_config() -> Result<SlackConfig> {
    SlackConfig::from_lookup(|name| env::var(name).ok())
}

use crate::error::{Result, SlackDumpError};

/// Environment variable holding the bearer token used by every tool.
pub(crate) const TOKEN_VAR: &str = "SLACK_API_TOKEN";

const TOKEN_INSTRUCTIONS: &str = "The environment variable `SLACK_API_TOKEN` was not found. \
Set your Slack API token to the environment variable `SLACK_API_TOKEN` \
before running this tool by executing the following:\n    \
$ read -sp 'Input your Slack API token: ' SLACK_API_TOKEN; echo && export SLACK_API_TOKEN";

#[derive(Debug, Clone)]
pub struct Settings {
    pub slack: SlackConfig,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub api_token: String,
}

pub fn load_settings() -> Result<Settings> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let slack = SlackConfig {
        api_token: std::env::var(TOKEN_VAR)
            .map_err(|_| SlackDumpError::Config(TOKEN_INSTRUCTIONS.to_string()))?,
    };

    Ok(Settings { slack })
}

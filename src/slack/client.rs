use crate::config::SlackConfig;
use crate::error::{Result, SlackDumpError};
use crate::slack::{ChannelId, FileId, UserId};
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde_json::Value;
use std::time::Duration;

const SLACK_API_URL: &str = "https://slack.com/api";

/// Conversation type filter matching everything the export tools handle.
pub const CONVERSATION_TYPES: &str = "public_channel,private_channel,mpim,im";

/// Authenticated handle to the Slack Web API.
///
/// Every endpoint method returns the raw response page as JSON after the
/// envelope check, so callers can persist exactly what the API sent.
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
    rate_limit_retries: u32,
}

impl SlackClient {
    pub fn new(config: SlackConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("slack-dump/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            token: config.api_token,
            base_url: SLACK_API_URL.to_string(),
            rate_limit_retries: 0,
        })
    }

    /// Retry rate-limited calls up to `retries` times before giving up.
    pub fn with_rate_limit_retries(mut self, retries: u32) -> Self {
        self.rate_limit_retries = retries;
        self
    }

    /// Point the client at a different API root (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn team_info(&self) -> Result<Value> {
        self.get_json("team.info", &[]).await
    }

    pub async fn conversations_list(&self, types: &str, cursor: Option<&str>) -> Result<Value> {
        self.get_json(
            "conversations.list",
            &[("types", types), ("cursor", cursor.unwrap_or_default())],
        )
        .await
    }

    pub async fn users_list(&self, cursor: Option<&str>) -> Result<Value> {
        self.get_json("users.list", &[("cursor", cursor.unwrap_or_default())])
            .await
    }

    pub async fn conversations_history(
        &self,
        channel: &ChannelId,
        cursor: Option<&str>,
    ) -> Result<Value> {
        self.get_json(
            "conversations.history",
            &[
                ("channel", channel.as_str()),
                ("cursor", cursor.unwrap_or_default()),
            ],
        )
        .await
    }

    pub async fn files_list(&self, user: Option<&UserId>, page: u64) -> Result<Value> {
        let page = page.to_string();
        let mut params = vec![("page", page.as_str())];
        if let Some(user) = user {
            params.push(("user", user.as_str()));
        }

        self.get_json("files.list", &params).await
    }

    pub async fn files_delete(&self, file: &FileId) -> Result<Value> {
        self.post_json("files.delete", serde_json::json!({ "file": file.as_str() }))
            .await
    }

    async fn get_json(&self, method: &str, params: &[(&str, &str)]) -> Result<Value> {
        let request = self
            .http
            .get(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.token)
            .query(params);

        self.dispatch(method, request).await
    }

    async fn post_json(&self, method: &str, body: Value) -> Result<Value> {
        let request = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.token)
            .json(&body);

        self.dispatch(method, request).await
    }

    /// Send the request, retrying rate-limited responses up to the
    /// configured count, and check both the HTTP status and the `ok`
    /// envelope field before handing back the body.
    async fn dispatch(&self, method: &str, request: reqwest::RequestBuilder) -> Result<Value> {
        let mut attempt = 0u32;

        loop {
            let current = request
                .try_clone()
                .ok_or_else(|| SlackDumpError::api(method, "request cannot be rebuilt"))?;

            tracing::debug!(method, attempt, "calling Slack API");
            let response = current.send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS
                && attempt < self.rate_limit_retries
            {
                attempt += 1;
                let delay_secs = retry_after_secs(response.headers());
                tracing::warn!(method, attempt, delay_secs, "rate limited, retrying");
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                continue;
            }

            let status = response.status();
            if !status.is_success() {
                return Err(SlackDumpError::api(method, format!("HTTP status {status}")));
            }

            let body: Value = response.json().await?;
            if body.get("ok").and_then(Value::as_bool) != Some(true) {
                let error = body
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string();
                return Err(SlackDumpError::Api {
                    method: method.to_string(),
                    error,
                });
            }

            return Ok(body);
        }
    }
}

/// Pagination cursor of a response page, if the API reports more pages.
/// Slack signals the last page with an absent or empty `next_cursor`.
pub fn next_cursor(page: &Value) -> Option<&str> {
    page.get("response_metadata")
        .and_then(|meta| meta.get("next_cursor"))
        .and_then(Value::as_str)
        .filter(|cursor| !cursor.is_empty())
}

fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(1)
}

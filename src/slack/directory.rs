use crate::error::{Result, SlackDumpError};
use crate::slack::{CONVERSATION_TYPES, ChannelId, SlackClient, next_cursor};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Read-only view of the workspace directory, memoized per run.
///
/// The conversations and users lists are fetched at most once per process
/// regardless of how many operations consult them; the users list is only
/// fetched at all when something needs it.
pub struct Directory {
    client: Arc<SlackClient>,
    team: OnceCell<Value>,
    conversations: OnceCell<Vec<Value>>,
    users: OnceCell<Vec<Value>>,
}

impl Directory {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self {
            client,
            team: OnceCell::new(),
            conversations: OnceCell::new(),
            users: OnceCell::new(),
        }
    }

    /// Team metadata object from `team.info`.
    pub async fn team(&self) -> Result<&Value> {
        self.team
            .get_or_try_init(|| async {
                let body = self.client.team_info().await?;
                body.get("team")
                    .cloned()
                    .ok_or_else(|| SlackDumpError::api("team.info", "response has no `team` object"))
            })
            .await
    }

    /// Workspace domain, used to name the export root directory.
    pub async fn team_domain(&self) -> Result<&str> {
        self.team()
            .await?
            .get("domain")
            .and_then(Value::as_str)
            .ok_or_else(|| SlackDumpError::api("team.info", "team has no `domain`"))
    }

    /// All conversations of the workspace, concatenated across pages in
    /// API-returned order.
    pub async fn conversations(&self) -> Result<&[Value]> {
        let list = self
            .conversations
            .get_or_try_init(|| async {
                let mut items = Vec::new();
                let mut cursor: Option<String> = None;

                loop {
                    let page = self
                        .client
                        .conversations_list(CONVERSATION_TYPES, cursor.as_deref())
                        .await?;
                    append_page(&mut items, &page, "conversations.list", "channels")?;

                    match next_cursor(&page) {
                        Some(next) => cursor = Some(next.to_string()),
                        None => break,
                    }
                }

                tracing::debug!(count = items.len(), "conversations list fetched");
                Ok::<_, SlackDumpError>(items)
            })
            .await?;

        Ok(list.as_slice())
    }

    /// All users of the workspace, concatenated across pages in
    /// API-returned order.
    pub async fn users(&self) -> Result<&[Value]> {
        let list = self
            .users
            .get_or_try_init(|| async {
                let mut items = Vec::new();
                let mut cursor: Option<String> = None;

                loop {
                    let page = self.client.users_list(cursor.as_deref()).await?;
                    append_page(&mut items, &page, "users.list", "members")?;

                    match next_cursor(&page) {
                        Some(next) => cursor = Some(next.to_string()),
                        None => break,
                    }
                }

                tracing::debug!(count = items.len(), "users list fetched");
                Ok::<_, SlackDumpError>(items)
            })
            .await?;

        Ok(list.as_slice())
    }

    /// Resolve a channel name to its ID.
    ///
    /// Scans in API-returned order and returns the first match. IM
    /// conversations carry no `name` field and are never matched here.
    pub async fn channel_id_by_name(&self, name: &str) -> Result<ChannelId> {
        let conversations = self.conversations().await?;

        find_channel_id(conversations, name)
            .map(ChannelId::new)
            .ok_or_else(|| SlackDumpError::ChannelNotFound(name.to_string()))
    }

    /// Display name of a conversation: the `name` field for channel-like
    /// conversations, the partner user's name for IMs.
    pub async fn conversation_name(&self, id: &ChannelId) -> Result<String> {
        let conversations = self.conversations().await?;
        let conversation = conversations
            .iter()
            .find(|c| c.get("id").and_then(Value::as_str) == Some(id.as_str()))
            .ok_or_else(|| SlackDumpError::ConversationNotFound(id.as_str().to_string()))?;

        if conversation
            .get("is_im")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            let partner = conversation
                .get("user")
                .and_then(Value::as_str)
                .ok_or_else(|| SlackDumpError::UserNotFound(id.as_str().to_string()))?;

            let users = self.users().await?;
            return im_partner_name(users, partner)
                .map(str::to_string)
                .ok_or_else(|| SlackDumpError::UserNotFound(partner.to_string()));
        }

        conversation
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SlackDumpError::ConversationNotFound(id.as_str().to_string()))
    }
}

fn append_page(items: &mut Vec<Value>, page: &Value, method: &str, key: &str) -> Result<()> {
    let chunk = page
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| SlackDumpError::api(method, format!("response has no `{key}` array")))?;

    items.extend(chunk.iter().cloned());
    Ok(())
}

fn find_channel_id<'a>(conversations: &'a [Value], name: &str) -> Option<&'a str> {
    conversations
        .iter()
        .find(|c| c.get("name").and_then(Value::as_str) == Some(name))
        .and_then(|c| c.get("id").and_then(Value::as_str))
}

fn im_partner_name<'a>(users: &'a [Value], user_id: &str) -> Option<&'a str> {
    users
        .iter()
        .find(|u| u.get("id").and_then(Value::as_str) == Some(user_id))
        .and_then(|u| u.get("name").and_then(Value::as_str))
}

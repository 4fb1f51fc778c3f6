use crate::error::Result;
use crate::export::ExportLayout;
use crate::export::layout::{ensure_dir, write_json_line};
use crate::logging::Timer;
use crate::slack::{ChannelId, Directory, SlackClient, next_cursor};
use std::path::PathBuf;
use std::sync::Arc;

/// Drives the export calls and writes their results to disk.
pub struct Exporter {
    client: Arc<SlackClient>,
    directory: Arc<Directory>,
    layout: ExportLayout,
}

impl Exporter {
    pub fn new(client: Arc<SlackClient>, directory: Arc<Directory>, layout: ExportLayout) -> Self {
        Self {
            client,
            directory,
            layout,
        }
    }

    /// Save every history page of `channel` under
    /// `{domain}/{conversation_name}/{prefix}{index:08}.json`, one raw JSON
    /// page per file, zero-based. Returns the number of pages written.
    ///
    /// There is no resumption support: a failed run leaves whatever pages
    /// were already written and must be re-run from scratch.
    pub async fn save_history(&self, channel: &ChannelId, prefix: &str) -> Result<u64> {
        let _timer = Timer::new("history export");

        let domain = self.directory.team_domain().await?;
        let conversation = self.directory.conversation_name(channel).await?;
        let dir = self.layout.conversation_dir(domain, &conversation);
        ensure_dir(&dir).await?;

        let mut index = 0u64;
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .client
                .conversations_history(channel, cursor.as_deref())
                .await?;
            let path = dir.join(ExportLayout::page_file_name(prefix, index));
            write_json_line(&path, &page).await?;
            index += 1;

            match next_cursor(&page) {
                Some(next) => cursor = Some(next.to_string()),
                None => break,
            }
        }

        tracing::info!(
            channel = channel.as_str(),
            conversation = %conversation,
            pages = index,
            "history export complete"
        );
        Ok(index)
    }

    /// Save the team metadata to `{domain}/team_info.json`.
    pub async fn save_team_info(&self) -> Result<PathBuf> {
        let path = self.team_file("team_info.json").await?;
        write_json_line(&path, self.directory.team().await?).await?;

        tracing::info!(path = %path.display(), "team info saved");
        Ok(path)
    }

    /// Save the concatenated conversations list to
    /// `{domain}/conversations_list.json`.
    pub async fn save_conversations_list(&self) -> Result<PathBuf> {
        let path = self.team_file("conversations_list.json").await?;
        write_json_line(&path, &self.directory.conversations().await?).await?;

        tracing::info!(path = %path.display(), "conversations list saved");
        Ok(path)
    }

    /// Save the concatenated users list to `{domain}/users_list.json`.
    pub async fn save_users_list(&self) -> Result<PathBuf> {
        let path = self.team_file("users_list.json").await?;
        write_json_line(&path, &self.directory.users().await?).await?;

        tracing::info!(path = %path.display(), "users list saved");
        Ok(path)
    }

    async fn team_file(&self, file_name: &str) -> Result<PathBuf> {
        let domain = self.directory.team_domain().await?;
        let dir = self.layout.team_dir(domain);
        ensure_dir(&dir).await?;
        Ok(dir.join(file_name))
    }
}

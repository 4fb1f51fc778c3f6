use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Output tree of an export run.
///
/// Everything lands under `{root}/{team_domain}/`; history pages go one
/// level deeper into a directory named after the conversation.
pub struct ExportLayout {
    root: PathBuf,
}

impl ExportLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn team_dir(&self, domain: &str) -> PathBuf {
        self.root.join(domain)
    }

    pub fn conversation_dir(&self, domain: &str, conversation: &str) -> PathBuf {
        self.team_dir(domain).join(conversation)
    }

    /// File name of a history page: `{prefix}{index:08}.json`, zero-based.
    pub fn page_file_name(prefix: &str, index: u64) -> String {
        format!("{prefix}{index:08}.json")
    }
}

pub(crate) async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).await?;
    Ok(())
}

/// Write one JSON document as a single newline-terminated line.
/// serde_json leaves non-ASCII characters unescaped.
pub(crate) async fn write_json_line<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut line = serde_json::to_string(value)?;
    line.push('\n');
    fs::write(path, line).await?;
    Ok(())
}

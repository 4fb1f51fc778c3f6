mod client;
mod directory;
mod types;

pub use client::{CONVERSATION_TYPES, SlackClient, next_cursor};
pub use directory::Directory;
pub use types::{ChannelId, FileId, FileRecord, FilesPaging, UserId};

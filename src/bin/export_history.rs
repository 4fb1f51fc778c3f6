use anyhow::bail;
use clap::{ArgGroup, Parser};
use slack_dump::config::load_settings;
use slack_dump::export::{ExportLayout, Exporter};
use slack_dump::slack::{ChannelId, Directory, SlackClient};
use std::path::PathBuf;
use std::sync::Arc;

/// Save a Slack conversation's history to local JSON files, one page per
/// file, optionally together with the users list, the conversations list
/// and the team info.
#[derive(Debug, Parser)]
#[command(name = "export-history")]
#[command(group(ArgGroup::new("target").required(true)))]
struct Args {
    /// Channel name of a public or private channel
    #[arg(short = 'n', long, group = "target")]
    channel_name: Option<String>,

    /// Channel ID of a channel-like conversation. The channel ID can be
    /// taken from the URL shown in a web browser
    /// (e.g. https://app.slack.com/client/<team-id>/<channel-id>/details/)
    #[arg(short = 'i', long, group = "target")]
    channel_id: Option<String>,

    /// Output file name prefix
    #[arg(short, long, default_value = "")]
    prefix: String,

    /// Also export the users list
    #[arg(short = 'u', long)]
    with_users_list: bool,

    /// Also export the conversations list
    #[arg(short = 'c', long)]
    with_conversations_list: bool,

    /// Also export the team info
    #[arg(short = 't', long)]
    with_team_info: bool,

    /// Root directory of the export tree
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_dump::logging::init();

    let args = Args::parse();
    let settings = load_settings()?;

    let client = Arc::new(SlackClient::new(settings.slack)?.with_rate_limit_retries(1));
    let directory = Arc::new(Directory::new(client.clone()));
    let exporter = Exporter::new(
        client,
        directory.clone(),
        ExportLayout::new(args.output_dir),
    );

    let channel = if let Some(name) = &args.channel_name {
        directory.channel_id_by_name(name).await?
    } else if let Some(id) = &args.channel_id {
        ChannelId::new(id.clone())
    } else {
        bail!("`--channel-name` or `--channel-id` is required");
    };

    exporter.save_history(&channel, &args.prefix).await?;

    if args.with_users_list {
        exporter.save_users_list().await?;
    }
    if args.with_conversations_list {
        exporter.save_conversations_list().await?;
    }
    if args.with_team_info {
        exporter.save_team_info().await?;
    }

    Ok(())
}

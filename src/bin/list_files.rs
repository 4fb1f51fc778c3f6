use clap::Parser;
use slack_dump::config::load_settings;
use slack_dump::files::list_files;
use slack_dump::slack::{SlackClient, UserId};

/// List the files uploaded to the workspace, one line per file.
#[derive(Debug, Parser)]
#[command(name = "list-files")]
struct Args {
    /// Output raw Slack API responses, one page per line
    #[arg(short, long)]
    raw_output: bool,

    /// Only list files created by a single user
    #[arg(short, long)]
    user_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_dump::logging::init();

    let args = Args::parse();
    let settings = load_settings()?;

    let client = SlackClient::new(settings.slack)?;
    let user = args.user_id.map(UserId::new);

    let mut stdout = std::io::stdout().lock();
    list_files(&client, user.as_ref(), args.raw_output, &mut stdout).await?;

    Ok(())
}

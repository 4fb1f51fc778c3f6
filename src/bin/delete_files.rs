use clap::Parser;
use slack_dump::config::load_settings;
use slack_dump::files::delete_files;
use slack_dump::slack::SlackClient;
use std::fs::File;
use std::io::{self, BufReader};

/// Delete uploaded files by ID.
#[derive(Debug, Parser)]
#[command(name = "delete-files")]
struct Args {
    /// List of file IDs to be deleted; `-` reads the list from stdin. The
    /// list uses a space separated format with the file ID in the first
    /// column, which is what `list-files` prints, so its output can be
    /// edited and fed back in here.
    #[arg(short, long, default_value = "-")]
    list_file: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_dump::logging::init();

    let args = Args::parse();
    let settings = load_settings()?;

    let client = SlackClient::new(settings.slack)?;
    let mut stdout = io::stdout().lock();

    let deleted = if args.list_file == "-" {
        delete_files(&client, io::stdin().lock(), &mut stdout).await?
    } else {
        let reader = BufReader::new(File::open(&args.list_file)?);
        delete_files(&client, reader, &mut stdout).await?
    };

    tracing::info!(deleted, "deletion complete");
    Ok(())
}

use std::io;
use std::io::Write;
use std::process::ExitCode;

use answerdesk_backend_client::Client;
use answerdesk_core::Config;
use answerdesk_core::fetch_recent_history;
use answerdesk_protocol::HistoryEntry;
use clap::Args;

#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Number of entries to fetch. Defaults to `history.limit`.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Emit the entries as prettified JSON instead of a human summary.
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

pub(crate) async fn run_history(cmd: HistoryCommand, config: &Config) -> anyhow::Result<ExitCode> {
    let client = Client::new(config.client_options())?;
    let limit = cmd.limit.unwrap_or(config.history_limit);
    let entries = fetch_recent_history(&client, limit).await?;

    let mut stdout = io::stdout().lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut stdout, &entries)?;
        writeln!(stdout)?;
    } else {
        write_human(&entries, &mut stdout)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn write_human<W: Write>(entries: &[HistoryEntry], writer: &mut W) -> anyhow::Result<()> {
    if entries.is_empty() {
        writeln!(writer, "no history")?;
        return Ok(());
    }

    for entry in entries {
        let timestamp = entry.timestamp.as_deref().unwrap_or("-");
        writeln!(writer, "{timestamp}  {}", entry.question)?;
    }
    Ok(())
}

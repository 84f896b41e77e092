use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use answerdesk_core::AnswerPanel;
use answerdesk_core::AnswerProps;
use answerdesk_core::Config;
use answerdesk_core::TicketState;
use answerdesk_core::answer_view::AnswerSections;
use answerdesk_core::answer_view::GENERATING_LABEL;
use anyhow::Context;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// JSON file with the answer panel inputs, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Render as if a ticket request were already in flight.
    #[arg(long = "in-flight", default_value_t = false)]
    pub in_flight: bool,
}

pub(crate) fn run_show(cmd: ShowCommand, config: &Config) -> anyhow::Result<ExitCode> {
    let raw = read_input(&cmd.file)?;
    let props: AnswerProps = serde_json::from_str(&raw)
        .with_context(|| format!("invalid answer panel input in {}", cmd.file.display()))?;

    let state = if cmd.in_flight {
        TicketState::InFlight
    } else {
        TicketState::Idle
    };
    let panel = props.project(config.show_sources, &state);
    write_panel(&panel, &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

fn read_input(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn write_panel<W: Write>(panel: &AnswerPanel, writer: &mut W) -> anyhow::Result<()> {
    let sections = match panel {
        AnswerPanel::Error { message } => {
            writeln!(writer, "error: {message}")?;
            return Ok(());
        }
        AnswerPanel::Answer(sections) => sections,
    };
    let AnswerSections {
        question,
        generating,
        answer,
        sources,
        ticket_action,
    } = sections;

    if let Some(question) = question {
        writeln!(writer, "{question}")?;
        writeln!(writer)?;
    }
    if *generating {
        writeln!(writer, "{GENERATING_LABEL}")?;
    }
    if let Some(answer) = answer {
        writeln!(writer, "{answer}")?;
    }
    if !sources.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "sources:")?;
        for source in sources {
            match &source.url {
                Some(url) => writeln!(writer, "  {} <{url}>", source.title)?,
                None => writeln!(writer, "  {}", source.title)?,
            }
            if let Some(snippet) = &source.snippet {
                writeln!(writer, "    {snippet}")?;
            }
        }
    }
    if let Some(action) = ticket_action {
        let state = if action.enabled { "" } else { " (disabled)" };
        writeln!(writer)?;
        writeln!(writer, "[{}]{state}", action.label)?;
    }
    Ok(())
}

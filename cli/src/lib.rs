pub mod config_override;
mod history;
mod notify;
mod show;
mod ticket;

use std::process::ExitCode;

use answerdesk_core::Config;
use answerdesk_core::find_answerdesk_home;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use supports_color::Stream;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub use config_override::CliConfigOverrides;
pub use history::HistoryCommand;
pub use show::ShowCommand;
pub use ticket::TicketCommand;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Escalate a low-confidence answer to the support ticket service.
#[derive(Debug, Parser)]
#[command(name = "answerdesk", version)]
pub struct Cli {
    #[clap(flatten)]
    pub config_overrides: CliConfigOverrides,

    /// Specifies color settings for use in the output.
    #[arg(long = "color", value_enum, default_value_t = Color::Auto, global = true)]
    pub color: Color,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a support ticket for the current question and answer.
    Ticket(TicketCommand),

    /// Print the most recent conversation history.
    History(HistoryCommand),

    /// Render an answer panel from a JSON file.
    Show(ShowCommand),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Color {
    Always,
    Never,
    #[default]
    Auto,
}

impl Color {
    fn enabled_for(self, stream: Stream) -> bool {
        match self {
            Color::Always => true,
            Color::Never => false,
            Color::Auto => supports_color::on_cached(stream).is_some(),
        }
    }
}

/// Colors for each output stream, resolved once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorChoice {
    pub stdout: bool,
    pub stderr: bool,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        Self {
            stdout: color.enabled_for(Stream::Stdout),
            stderr: color.enabled_for(Stream::Stderr),
        }
    }
}

pub async fn run_main(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli {
        config_overrides,
        color,
        command,
    } = cli;
    let colors = ColorChoice::from(color);
    init_tracing(colors.stderr);

    let overrides = config_overrides.parse_overrides()?;
    let home = find_answerdesk_home()?;
    let config = Config::load(&home, overrides)?;
    tracing::debug!(home = %home.display(), "loaded configuration");

    match command {
        Command::Ticket(cmd) => ticket::run_ticket(cmd, &config, colors).await,
        Command::History(cmd) => history::run_history(cmd, &config).await,
        Command::Show(cmd) => show::run_show(cmd, &config),
    }
}

fn init_tracing(with_ansi: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(with_ansi)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

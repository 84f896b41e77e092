//! `-c key=value` overrides shared by every subcommand.

use answerdesk_core::ConfigError;
use answerdesk_core::parse_override;
use clap::ArgAction;
use clap::Parser;

#[derive(Parser, Debug, Default, Clone)]
pub struct CliConfigOverrides {
    /// Override a configuration value that would otherwise be loaded from
    /// `~/.answerdesk/config.toml`. Use a dotted path (`history.limit=10`).
    /// The value is parsed as TOML and falls back to a literal string.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "key=value",
        action = ArgAction::Append,
        global = true
    )]
    pub raw_overrides: Vec<String>,
}

impl CliConfigOverrides {
    pub fn parse_overrides(&self) -> Result<Vec<(String, toml::Value)>, ConfigError> {
        self.raw_overrides
            .iter()
            .map(|raw| parse_override(raw))
            .collect()
    }
}

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use answerdesk_backend_client::ClientOptions;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::workflow::DEFAULT_HISTORY_LIMIT;
use crate::workflow::DEFAULT_LOW_CONFIDENCE_REASON;
use crate::workflow::TicketSettings;

pub const ANSWERDESK_HOME_ENV_VAR: &str = "ANSWERDESK_HOME";
pub const CONFIG_TOML_FILE: &str = "config.toml";
pub const DEFAULT_HISTORY_URL: &str = "http://localhost:3000/api/qa/history";
pub const DEFAULT_TICKET_URL: &str = "http://127.0.0.1:5000/create-ticket";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
    #[error("invalid override {0:?}: expected key=value")]
    InvalidOverride(String),
    #[error("invalid url for {key}: {value:?}: {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{key} must be at least 1")]
    ZeroLimit { key: &'static str },
}

/// Raw shape of `config.toml`. Every field is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigToml {
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub history: HistoryToml,
    #[serde(default)]
    pub tickets: TicketsToml,
    #[serde(default)]
    pub display: DisplayToml,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryToml {
    pub url: Option<String>,
    pub limit: Option<u32>,
    pub bearer_token: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketsToml {
    pub url: Option<String>,
    pub low_confidence_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayToml {
    pub show_sources: Option<bool>,
}

/// Resolved configuration with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub history_url: Url,
    pub history_limit: u32,
    pub bearer_token: Option<String>,
    pub ticket_url: Url,
    pub low_confidence_reason: String,
    pub show_sources: bool,
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Reads `<home>/config.toml` (absent means defaults), applies the
    /// overrides, and resolves the result.
    pub fn load(home: &Path, overrides: Vec<(String, toml::Value)>) -> Result<Self, ConfigError> {
        let mut root = load_config_as_toml(home)?;
        for (path, value) in overrides {
            apply_toml_override(&mut root, &path, value);
        }
        let config_toml: ConfigToml = root.try_into()?;
        Self::from_toml(config_toml)
    }

    pub fn from_toml(config_toml: ConfigToml) -> Result<Self, ConfigError> {
        let ConfigToml {
            request_timeout_ms,
            history,
            tickets,
            display,
        } = config_toml;

        let history_limit = history.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if history_limit == 0 {
            return Err(ConfigError::ZeroLimit {
                key: "history.limit",
            });
        }

        Ok(Self {
            history_url: parse_url(
                "history.url",
                history.url.as_deref().unwrap_or(DEFAULT_HISTORY_URL),
            )?,
            history_limit,
            bearer_token: history.bearer_token.filter(|token| !token.is_empty()),
            ticket_url: parse_url(
                "tickets.url",
                tickets.url.as_deref().unwrap_or(DEFAULT_TICKET_URL),
            )?,
            low_confidence_reason: tickets
                .low_confidence_reason
                .unwrap_or_else(|| DEFAULT_LOW_CONFIDENCE_REASON.to_string()),
            show_sources: display.show_sources.unwrap_or(true),
            request_timeout: request_timeout_ms.map(Duration::from_millis),
        })
    }

    pub fn ticket_settings(&self) -> TicketSettings {
        TicketSettings {
            history_limit: self.history_limit,
            low_confidence_reason: self.low_confidence_reason.clone(),
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            history_url: self.history_url.clone(),
            ticket_url: self.ticket_url.clone(),
            bearer_token: self.bearer_token.clone(),
            timeout: self.request_timeout,
        }
    }
}

/// `$ANSWERDESK_HOME` when set and non-empty, otherwise `~/.answerdesk`.
pub fn find_answerdesk_home() -> std::io::Result<PathBuf> {
    if let Ok(home) = std::env::var(ANSWERDESK_HOME_ENV_VAR)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    let mut home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(ErrorKind::NotFound, "could not find home directory")
    })?;
    home.push(".answerdesk");
    Ok(home)
}

pub fn load_config_as_toml(home: &Path) -> Result<toml::Value, ConfigError> {
    let path = home.join(CONFIG_TOML_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(toml::Value::Table(toml::Table::new()));
        }
        Err(source) => return Err(ConfigError::Io { path, source }),
    };

    toml::from_str::<toml::Table>(&contents)
        .map(toml::Value::Table)
        .map_err(|source| ConfigError::Parse { path, source })
}

/// Parses `key=value`. The value is read as TOML and falls back to a plain
/// string, so `-c tickets.url=http://host/x` needs no quoting.
pub fn parse_override(raw: &str) -> Result<(String, toml::Value), ConfigError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(ConfigError::InvalidOverride(raw.to_string()));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidOverride(raw.to_string()));
    }

    let value = value.trim();
    let parsed = toml::from_str::<toml::Table>(&format!("value = {value}"))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| toml::Value::String(value.to_string()));
    Ok((key.to_string(), parsed))
}

/// Sets a dotted path, creating intermediate tables and replacing any
/// non-table value in the way.
pub fn apply_toml_override(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !current.is_table() {
            *current = toml::Value::Table(toml::Table::new());
        }
        let toml::Value::Table(table) = current else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_string(), value);
            return;
        }
        current = table
            .entry(segment.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
        source,
    })
}

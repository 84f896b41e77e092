//! What the answer panel shows for a given answer, preference, and ticket
//! state. Presentation is left to the host.

use serde::Deserialize;
use serde::Serialize;

use crate::state::TicketState;

pub const UNTITLED_SOURCE: &str = "Untitled Source";
pub const GENERATING_LABEL: &str = "Generating answer...";
pub const CREATE_TICKET_LABEL: &str = "Create Ticket";
pub const CREATING_TICKET_LABEL: &str = "Creating...";

/// Inputs the host passes to the answer panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerProps {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub query_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerPanel {
    Error { message: String },
    Answer(AnswerSections),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSections {
    pub question: Option<String>,
    pub generating: bool,
    pub answer: Option<String>,
    pub sources: Vec<SourceLine>,
    pub ticket_action: Option<TicketAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub title: String,
    pub url: Option<String>,
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketAction {
    pub enabled: bool,
    pub label: &'static str,
}

impl AnswerProps {
    pub fn project(&self, show_sources: bool, ticket_state: &TicketState) -> AnswerPanel {
        if let Some(message) = non_empty(&self.error) {
            return AnswerPanel::Error {
                message: message.to_string(),
            };
        }

        let answer = non_empty(&self.answer);
        let sources = if show_sources {
            self.sources.iter().map(SourceLine::from).collect()
        } else {
            Vec::new()
        };
        let offers_ticket =
            answer.is_some() && !self.is_loading && non_empty(&self.query_id).is_some();
        let ticket_action = offers_ticket.then(|| TicketAction::for_state(ticket_state));

        AnswerPanel::Answer(AnswerSections {
            question: non_empty(&self.question).map(str::to_string),
            generating: self.is_loading && answer.is_none(),
            answer: answer.map(str::to_string),
            sources,
            ticket_action,
        })
    }
}

impl TicketAction {
    fn for_state(state: &TicketState) -> Self {
        if state.is_in_flight() {
            Self {
                enabled: false,
                label: CREATING_TICKET_LABEL,
            }
        } else {
            Self {
                enabled: true,
                label: CREATE_TICKET_LABEL,
            }
        }
    }
}

impl From<&Source> for SourceLine {
    fn from(source: &Source) -> Self {
        Self {
            title: non_empty(&source.title)
                .unwrap_or(UNTITLED_SOURCE)
                .to_string(),
            url: non_empty(&source.url).map(str::to_string),
            snippet: non_empty(&source.snippet).map(str::to_string),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

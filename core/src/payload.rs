use answerdesk_protocol::HistoryEntry;
use answerdesk_protocol::PromptMessage;
use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;

/// Stands in for the question when the host has none to offer.
pub const PLACEHOLDER_QUESTION: &str = "Current question";

/// The question and answer currently shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentExchange {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl CurrentExchange {
    pub fn new(question: Option<String>, answer: Option<String>) -> Self {
        Self { question, answer }
    }

    fn question_text(&self) -> &str {
        non_blank(self.question.as_deref()).unwrap_or(PLACEHOLDER_QUESTION)
    }

    fn answer_text(&self) -> Option<&str> {
        non_blank(self.answer.as_deref())
    }
}

/// Builds the `promptHistory` of a ticket.
///
/// Recorded history wins and is passed through in order with its own
/// timestamps. Without history, the current question (or a placeholder) and
/// then the current answer are stamped with `now`. The result is never empty.
pub fn build_prompt_history(
    history: Vec<HistoryEntry>,
    current: &CurrentExchange,
    now: DateTime<Utc>,
) -> Vec<PromptMessage> {
    if !history.is_empty() {
        return history
            .into_iter()
            .map(|entry| PromptMessage {
                message: entry.question,
                timestamp: entry.timestamp,
            })
            .collect();
    }

    let stamp = iso_timestamp(now);
    let mut messages = vec![PromptMessage::new(current.question_text(), stamp.clone())];
    if let Some(answer) = current.answer_text() {
        messages.push(PromptMessage::new(answer, stamp));
    }
    messages
}

/// `2024-01-01T00:00:00.000Z`
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

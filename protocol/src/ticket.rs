use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

/// `userId` sent when the host has no identity to offer.
pub const FALLBACK_USER_ID: &str = "new";

/// Normalized unit of conversational content sent to the ticket service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl PromptMessage {
    pub fn new(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Some(timestamp.into()),
        }
    }
}

/// Body of `POST /create-ticket`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    user_id: String,
    prompt_history: Vec<PromptMessage>,
    low_confidence_reason: String,
}

impl TicketRequest {
    pub fn new(
        user_id: &str,
        prompt_history: Vec<PromptMessage>,
        low_confidence_reason: impl Into<String>,
    ) -> Self {
        let user_id = if user_id.trim().is_empty() {
            FALLBACK_USER_ID
        } else {
            user_id
        };
        Self {
            user_id: user_id.to_string(),
            prompt_history,
            low_confidence_reason: low_confidence_reason.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn prompt_history(&self) -> &[PromptMessage] {
        &self.prompt_history
    }

    pub fn low_confidence_reason(&self) -> &str {
        &self.low_confidence_reason
    }
}

/// Success body of the ticket service. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreated {
    #[serde(
        default,
        deserialize_with = "deserialize_ticket_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_id: Option<String>,
}

/// Rejection body of the ticket service.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl TicketErrorBody {
    /// The reported reason when it is a non-empty string.
    pub fn reason(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(Value::as_str)
            .filter(|reason| !reason.is_empty())
    }
}

// Ticket services disagree on whether ids are strings or integers.
fn deserialize_ticket_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(id)) if !id.is_empty() => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

use answerdesk_backend_client::Error as BackendError;
use answerdesk_backend_client::StatusCode;
use thiserror::Error;

use crate::notification::Notification;

pub type Result<T> = std::result::Result<T, TicketError>;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Every way a ticket attempt can end without a ticket. All of them are
/// turned into a [`Notification`] at the workflow boundary.
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("user or query identifier missing")]
    MissingIdentity,
    #[error("conversation history unavailable: {0}")]
    HistoryUnavailable(#[source] BackendError),
    #[error("ticket service rejected the request with status {status}")]
    TicketRejected {
        status: StatusCode,
        reason: Option<String>,
    },
    #[error("ticket service unreachable: {0}")]
    ConnectivityFailure(#[source] BackendError),
}

impl TicketError {
    /// Maps a failed ticket submission onto the taxonomy. History failures
    /// never go through here.
    pub(crate) fn from_submission(err: BackendError) -> Self {
        match err {
            BackendError::Rejected { status, reason } => Self::TicketRejected { status, reason },
            BackendError::UnexpectedStatus { status, .. } => Self::TicketRejected {
                status,
                reason: None,
            },
            other => Self::ConnectivityFailure(other),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::MissingIdentity => "Unable to create ticket: User information missing".to_string(),
            Self::HistoryUnavailable(_) => {
                "Unable to create ticket: Failed to fetch conversation history".to_string()
            }
            Self::TicketRejected { reason, .. } => {
                let reason = reason.as_deref().unwrap_or(UNKNOWN_ERROR);
                format!("Failed to create ticket: {reason}")
            }
            Self::ConnectivityFailure(_) => "Error connecting to ticket service".to_string(),
        }
    }

    pub fn to_notification(&self) -> Notification {
        Notification::error(self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejection_message_uses_reported_reason() {
        let err = TicketError::TicketRejected {
            status: StatusCode::TOO_MANY_REQUESTS,
            reason: Some("rate limited".to_string()),
        };
        assert_eq!(err.user_message(), "Failed to create ticket: rate limited");
    }

    #[test]
    fn rejection_without_reason_falls_back_to_unknown_error() {
        let err = TicketError::from_submission(BackendError::Rejected {
            status: StatusCode::BAD_GATEWAY,
            reason: None,
        });
        assert_eq!(err.user_message(), "Failed to create ticket: Unknown error");
    }

    #[test]
    fn history_failure_has_its_own_message() {
        let err = TicketError::HistoryUnavailable(BackendError::UnexpectedStatus {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        });
        assert_eq!(
            err.to_notification(),
            Notification::error("Unable to create ticket: Failed to fetch conversation history")
        );
    }
}

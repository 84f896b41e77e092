use answerdesk_backend_client::TicketBackend;
use answerdesk_protocol::TicketCreated;
use answerdesk_protocol::TicketRequest;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::error::Result;
use crate::error::TicketError;
use crate::notification::Notification;
use crate::payload::CurrentExchange;

/// Shown in place of a ticket id the service did not return.
pub const MISSING_TICKET_ID_LABEL: &str = "N/A";

/// Everything the host knows when the user asks for a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketContext {
    pub user_id: Option<String>,
    pub query_id: Option<String>,
    pub exchange: CurrentExchange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity<'a> {
    pub user_id: &'a str,
    pub query_id: &'a str,
}

impl TicketContext {
    /// Both identifiers, or [`TicketError::MissingIdentity`] if either is
    /// absent or blank.
    pub fn identity(&self) -> Result<Identity<'_>> {
        let user_id = present(self.user_id.as_deref());
        let query_id = present(self.query_id.as_deref());
        match (user_id, query_id) {
            (Some(user_id), Some(query_id)) => Ok(Identity { user_id, query_id }),
            _ => Err(TicketError::MissingIdentity),
        }
    }
}

/// One POST to the ticket service. No retry.
pub async fn submit_ticket<B>(backend: &B, request: &TicketRequest) -> Result<TicketCreated>
where
    B: TicketBackend + ?Sized,
{
    debug_assert!(!request.prompt_history().is_empty());

    match backend.create_ticket(request).await {
        Ok(created) => {
            info!(
                ticket_id = created.ticket_id.as_deref().unwrap_or(MISSING_TICKET_ID_LABEL),
                messages = request.prompt_history().len(),
                "ticket created"
            );
            Ok(created)
        }
        Err(err) => {
            let err = TicketError::from_submission(err);
            match &err {
                TicketError::ConnectivityFailure(source) => {
                    error!("ticket service unreachable: {source}");
                }
                other => warn!("{other}"),
            }
            Err(err)
        }
    }
}

pub fn success_notification(created: &TicketCreated) -> Notification {
    let ticket_id = created
        .ticket_id
        .as_deref()
        .unwrap_or(MISSING_TICKET_ID_LABEL);
    Notification::success(format!("Ticket created successfully: #{ticket_id}"))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn context(user_id: Option<&str>, query_id: Option<&str>) -> TicketContext {
        TicketContext {
            user_id: user_id.map(str::to_string),
            query_id: query_id.map(str::to_string),
            exchange: CurrentExchange::default(),
        }
    }

    #[test]
    fn identity_requires_both_identifiers() {
        assert_matches!(
            context(None, Some("q-1")).identity(),
            Err(TicketError::MissingIdentity)
        );
        assert_matches!(
            context(Some("u-1"), None).identity(),
            Err(TicketError::MissingIdentity)
        );
        assert_matches!(
            context(Some(" "), Some("q-1")).identity(),
            Err(TicketError::MissingIdentity)
        );
        assert_eq!(
            context(Some("u-1"), Some("q-1")).identity().ok(),
            Some(Identity {
                user_id: "u-1",
                query_id: "q-1",
            })
        );
    }

    #[test]
    fn success_notification_references_ticket_id() {
        let notification = success_notification(&TicketCreated {
            ticket_id: Some("T-42".to_string()),
        });
        assert_eq!(
            notification,
            Notification::success("Ticket created successfully: #T-42")
        );
    }

    #[test]
    fn success_notification_without_id_uses_label() {
        let notification = success_notification(&TicketCreated::default());
        assert_eq!(notification.message, "Ticket created successfully: #N/A");
    }
}

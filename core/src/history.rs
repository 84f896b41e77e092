use answerdesk_backend_client::HistoryQuery;
use answerdesk_backend_client::TicketBackend;
use answerdesk_protocol::HistoryEntry;
use tracing::debug;
use tracing::warn;

use crate::error::Result;
use crate::error::TicketError;

/// Most recent turns for the current user, first page only.
pub async fn fetch_recent_history<B>(backend: &B, limit: u32) -> Result<Vec<HistoryEntry>>
where
    B: TicketBackend + ?Sized,
{
    let entries = backend
        .fetch_history(HistoryQuery::first_page(limit))
        .await
        .map_err(|err| {
            warn!("conversation history unavailable: {err}");
            TicketError::HistoryUnavailable(err)
        })?;
    debug!(count = entries.len(), limit, "conversation history received");
    Ok(entries)
}

use std::sync::Arc;

use answerdesk_protocol::HistoryEntry;
use answerdesk_protocol::TicketCreated;
use answerdesk_protocol::TicketRequest;
use async_trait::async_trait;

use crate::Client;
use crate::HistoryQuery;
use crate::Result;

/// The two remote calls the ticket workflow depends on.
#[async_trait]
pub trait TicketBackend: Send + Sync {
    async fn fetch_history(&self, query: HistoryQuery) -> Result<Vec<HistoryEntry>>;

    async fn create_ticket(&self, request: &TicketRequest) -> Result<TicketCreated>;
}

#[async_trait]
impl TicketBackend for Client {
    async fn fetch_history(&self, query: HistoryQuery) -> Result<Vec<HistoryEntry>> {
        Client::fetch_history(self, query).await
    }

    async fn create_ticket(&self, request: &TicketRequest) -> Result<TicketCreated> {
        Client::create_ticket(self, request).await
    }
}

#[async_trait]
impl<T> TicketBackend for Arc<T>
where
    T: TicketBackend + ?Sized,
{
    async fn fetch_history(&self, query: HistoryQuery) -> Result<Vec<HistoryEntry>> {
        self.as_ref().fetch_history(query).await
    }

    async fn create_ticket(&self, request: &TicketRequest) -> Result<TicketCreated> {
        self.as_ref().create_ticket(request).await
    }
}

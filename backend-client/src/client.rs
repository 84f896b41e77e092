use std::time::Duration;

use answerdesk_protocol::HistoryEntry;
use answerdesk_protocol::HistoryPage;
use answerdesk_protocol::TicketCreated;
use answerdesk_protocol::TicketErrorBody;
use answerdesk_protocol::TicketRequest;
use tracing::debug;
use tracing::warn;
use url::Url;

use crate::error::Error;
use crate::error::Result;

const ERROR_BODY_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub limit: u32,
    pub page: u32,
}

impl HistoryQuery {
    pub fn first_page(limit: u32) -> Self {
        Self { limit, page: 1 }
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub history_url: Url,
    pub ticket_url: Url,
    /// Sent as `Authorization: Bearer` on history requests only.
    pub bearer_token: Option<String>,
    /// Unset means requests run until the transport gives up.
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    pub fn new(history_url: Url, ticket_url: Url) -> Self {
        Self {
            history_url,
            ticket_url,
            bearer_token: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    history_url: Url,
    ticket_url: Url,
    bearer_token: Option<String>,
}

impl Client {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let ClientOptions {
            history_url,
            ticket_url,
            bearer_token,
            timeout,
        } = options;

        let version = env!("CARGO_PKG_VERSION");
        let mut builder = reqwest::Client::builder().user_agent(format!("answerdesk/{version}"));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            history_url,
            ticket_url,
            bearer_token: bearer_token.filter(|token| !token.is_empty()),
        })
    }

    /// `GET <history_url>?limit=N&page=P`. Any non-2xx status or an
    /// undecodable body is an error.
    pub async fn fetch_history(&self, query: HistoryQuery) -> Result<Vec<HistoryEntry>> {
        let mut request = self
            .http
            .get(self.history_url.clone())
            .query(&[("limit", query.limit), ("page", query.page)]);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status,
                body: snippet(&body),
            });
        }

        let page: HistoryPage = serde_json::from_str(&body)?;
        let entries = page.into_entries();
        debug!(count = entries.len(), "history page received");
        Ok(entries)
    }

    /// `POST <ticket_url>` with the request as JSON.
    ///
    /// A 2xx response must carry a JSON body; `ticketId` inside it is
    /// optional.
    pub async fn create_ticket(&self, request: &TicketRequest) -> Result<TicketCreated> {
        let response = self
            .http
            .post(self.ticket_url.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str::<TicketCreated>(&body).map_err(|err| {
                warn!(%status, "ticket response body is not valid JSON: {err}");
                Error::Json(err)
            });
        }

        let reason = serde_json::from_str::<TicketErrorBody>(&body)
            .ok()
            .and_then(|body| body.reason().map(str::to_string));
        Err(Error::Rejected { status, reason })
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(ERROR_BODY_SNIPPET_CHARS).collect()
}

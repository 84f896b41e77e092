use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No usable response: connect, TLS, timeout, or body read failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error(
        "ticket rejected with status {status}: {}",
        .reason.as_deref().unwrap_or("no reason given")
    )]
    Rejected {
        status: StatusCode,
        reason: Option<String>,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the server never produced a response we could read.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(err) => err.status(),
            Error::UnexpectedStatus { status, .. } | Error::Rejected { status, .. } => {
                Some(*status)
            }
            Error::Json(_) => None,
        }
    }
}

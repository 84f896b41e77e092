mod backend;
mod client;
mod error;

pub use backend::TicketBackend;
pub use client::Client;
pub use client::ClientOptions;
pub use client::HistoryQuery;
pub use error::Error;
pub use error::Result;
pub use reqwest::StatusCode;

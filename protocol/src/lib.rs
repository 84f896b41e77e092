//! Wire types shared by the answerdesk history store, the ticket service, and
//! the ticket workflow.

pub mod history;
pub mod ticket;

pub use history::HistoryEntry;
pub use history::HistoryPage;
pub use history::HistoryRecord;
pub use ticket::FALLBACK_USER_ID;
pub use ticket::PromptMessage;
pub use ticket::TicketCreated;
pub use ticket::TicketErrorBody;
pub use ticket::TicketRequest;

//! Root of the `answerdesk-core` library.

// Prevent accidental direct writes to stdout/stderr in library code. All
// user-visible output must go through the host.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod answer_view;
pub mod config;
mod error;
mod history;
mod notification;
mod payload;
pub mod state;
mod submitter;
mod workflow;

pub use answer_view::AnswerPanel;
pub use answer_view::AnswerProps;
pub use config::Config;
pub use config::ConfigError;
pub use config::find_answerdesk_home;
pub use config::parse_override;
pub use error::Result;
pub use error::TicketError;
pub use history::fetch_recent_history;
pub use notification::Notification;
pub use notification::NotificationKind;
pub use payload::CurrentExchange;
pub use payload::PLACEHOLDER_QUESTION;
pub use payload::build_prompt_history;
pub use payload::iso_timestamp;
pub use state::TicketState;
pub use submitter::Identity;
pub use submitter::MISSING_TICKET_ID_LABEL;
pub use submitter::TicketContext;
pub use submitter::submit_ticket;
pub use submitter::success_notification;
pub use workflow::DEFAULT_HISTORY_LIMIT;
pub use workflow::DEFAULT_LOW_CONFIDENCE_REASON;
pub use workflow::TicketOutcome;
pub use workflow::TicketSettings;
pub use workflow::TicketWorkflow;

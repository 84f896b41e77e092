//! Ticket action state as a plain value with a pure transition function.
//!
//! ```text
//! Idle ──CreateRequested──▶ InFlight ──Finished(Ok)──▶ Succeeded
//!   ▲                          │    └──Finished(Err)─▶ Failed
//!   └────────Cancelled─────────┘
//! ```
//!
//! `Succeeded` and `Failed` accept a new `CreateRequested` exactly like
//! `Idle`, and `Acknowledged` returns them to `Idle`.

use answerdesk_protocol::TicketCreated;

use crate::error::TicketError;
use crate::notification::Notification;
use crate::submitter::success_notification;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TicketState {
    #[default]
    Idle,
    InFlight,
    Succeeded {
        ticket_id: Option<String>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug)]
pub enum TicketTrigger {
    CreateRequested,
    Finished(Result<TicketCreated, TicketError>),
    /// The in-flight run was dropped before it finished.
    Cancelled,
    /// The user dismissed the last outcome.
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketEffect {
    BeginSubmission,
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: TicketState,
    pub effects: Vec<TicketEffect>,
}

impl Transition {
    fn stay(state: &TicketState) -> Self {
        Self {
            next: state.clone(),
            effects: Vec::new(),
        }
    }

    pub fn begins_submission(&self) -> bool {
        self.effects.contains(&TicketEffect::BeginSubmission)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.effects.iter().find_map(|effect| match effect {
            TicketEffect::Notify(notification) => Some(notification),
            TicketEffect::BeginSubmission => None,
        })
    }
}

impl TicketState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TicketState::InFlight)
    }

    pub fn transition(&self, trigger: TicketTrigger) -> Transition {
        match (self, trigger) {
            (TicketState::InFlight, TicketTrigger::CreateRequested) => Transition::stay(self),
            (_, TicketTrigger::CreateRequested) => Transition {
                next: TicketState::InFlight,
                effects: vec![TicketEffect::BeginSubmission],
            },
            (TicketState::InFlight, TicketTrigger::Finished(Ok(created))) => Transition {
                effects: vec![TicketEffect::Notify(success_notification(&created))],
                next: TicketState::Succeeded {
                    ticket_id: created.ticket_id,
                },
            },
            (TicketState::InFlight, TicketTrigger::Finished(Err(err))) => {
                let notification = err.to_notification();
                Transition {
                    next: TicketState::Failed {
                        message: notification.message.clone(),
                    },
                    effects: vec![TicketEffect::Notify(notification)],
                }
            }
            (TicketState::InFlight, TicketTrigger::Cancelled) => Transition {
                next: TicketState::Idle,
                effects: Vec::new(),
            },
            (
                TicketState::Succeeded { .. } | TicketState::Failed { .. },
                TicketTrigger::Acknowledged,
            ) => Transition {
                next: TicketState::Idle,
                effects: Vec::new(),
            },
            _ => Transition::stay(self),
        }
    }
}

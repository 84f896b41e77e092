use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use answerdesk_backend_client::TicketBackend;
use answerdesk_protocol::TicketCreated;
use answerdesk_protocol::TicketRequest;
use chrono::DateTime;
use chrono::Utc;
use tracing::debug;
use tracing::warn;

use crate::error::Result;
use crate::history::fetch_recent_history;
use crate::notification::Notification;
use crate::payload::build_prompt_history;
use crate::state::TicketState;
use crate::state::TicketTrigger;
use crate::state::Transition;
use crate::submitter::TicketContext;
use crate::submitter::submit_ticket;

pub const DEFAULT_HISTORY_LIMIT: u32 = 5;
pub const DEFAULT_LOW_CONFIDENCE_REASON: &str = "Could not fully understand the error context";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSettings {
    pub history_limit: u32,
    pub low_confidence_reason: String,
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            low_confidence_reason: DEFAULT_LOW_CONFIDENCE_REASON.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    /// Another run was already in flight; nothing was sent.
    Suppressed,
    Completed(Notification),
}

impl TicketOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            TicketOutcome::Suppressed => None,
            TicketOutcome::Completed(notification) => Some(notification),
        }
    }
}

/// One "Create Ticket" control: fetch history, build the payload, submit.
///
/// Runs never overlap. A trigger that arrives while a run is in flight is
/// answered with [`TicketOutcome::Suppressed`] and does no I/O.
pub struct TicketWorkflow<B> {
    backend: B,
    settings: TicketSettings,
    clock: fn() -> DateTime<Utc>,
    state: Mutex<TicketState>,
}

impl<B> TicketWorkflow<B>
where
    B: TicketBackend,
{
    pub fn new(backend: B, settings: TicketSettings) -> Self {
        Self {
            backend,
            settings,
            clock: Utc::now,
            state: Mutex::new(TicketState::Idle),
        }
    }

    /// Replaces the wall clock used to stamp fallback messages.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &TicketSettings {
        &self.settings
    }

    pub fn state(&self) -> TicketState {
        lock(&self.state).clone()
    }

    /// Clears a finished outcome so the control reads as idle again.
    pub fn acknowledge(&self) {
        apply(&self.state, TicketTrigger::Acknowledged);
    }

    pub async fn create_ticket(&self, context: &TicketContext) -> TicketOutcome {
        if !apply(&self.state, TicketTrigger::CreateRequested).begins_submission() {
            warn!("ticket creation already in flight; ignoring trigger");
            return TicketOutcome::Suppressed;
        }

        let guard = InFlightGuard::new(&self.state);
        let result = self.run(context).await;
        guard.disarm();

        match apply(&self.state, TicketTrigger::Finished(result)).notification() {
            Some(notification) => TicketOutcome::Completed(notification.clone()),
            None => TicketOutcome::Suppressed,
        }
    }

    async fn run(&self, context: &TicketContext) -> Result<TicketCreated> {
        let identity = context.identity()?;
        let history = fetch_recent_history(&self.backend, self.settings.history_limit).await?;
        let prompt_history = build_prompt_history(history, &context.exchange, (self.clock)());
        debug!(
            query_id = identity.query_id,
            messages = prompt_history.len(),
            "submitting ticket"
        );

        let request = TicketRequest::new(
            identity.user_id,
            prompt_history,
            self.settings.low_confidence_reason.as_str(),
        );
        submit_ticket(&self.backend, &request).await
    }
}

fn lock(state: &Mutex<TicketState>) -> MutexGuard<'_, TicketState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn apply(state: &Mutex<TicketState>, trigger: TicketTrigger) -> Transition {
    let mut state = lock(state);
    let transition = state.transition(trigger);
    *state = transition.next.clone();
    transition
}

/// Returns the state to `Idle` if a run is dropped before it finishes.
struct InFlightGuard<'a> {
    state: Option<&'a Mutex<TicketState>>,
}

impl<'a> InFlightGuard<'a> {
    fn new(state: &'a Mutex<TicketState>) -> Self {
        Self { state: Some(state) }
    }

    fn disarm(mut self) {
        self.state = None;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            warn!("ticket creation cancelled before completion");
            apply(state, TicketTrigger::Cancelled);
        }
    }
}

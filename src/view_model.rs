//! Fetch orchestration for one screen.
//!
//! [`ViewModel::refresh`] runs the whole cycle in one call.  The TUI instead
//! uses the two halves, [`begin_refresh`](ViewModel::begin_refresh) and
//! [`complete_refresh`](ViewModel::complete_refresh), so the network call can
//! run on a task while the state is only ever touched by the UI loop.
//!
//! ## Overlapping refreshes
//!
//! Every refresh gets a ticket with a sequence number.  Only the result for
//! the most recently issued ticket is applied; older results are discarded
//! without touching the state.  `is_loading` therefore stays `true` until
//! the latest refresh has completed.

use std::sync::Arc;

use crate::error::GatewayError;
use crate::record::Record;
use crate::requirement::Requirement;
use crate::toast::{Severity, ToastManager};

/// Observable snapshot of the last fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<R> {
    pub records: Vec<R>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl<R> Default for FetchState<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }
}

/// Identifies one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

pub struct ViewModel<R: Record> {
    requirement: Arc<dyn Requirement<R>>,
    toasts: ToastManager,
    state: FetchState<R>,
    /// Sequence number of the newest ticket handed out.
    latest: u64,
}

impl<R: Record> ViewModel<R> {
    pub fn new(requirement: Arc<dyn Requirement<R>>, toasts: ToastManager) -> Self {
        Self {
            requirement,
            toasts,
            state: FetchState::default(),
            latest: 0,
        }
    }

    pub fn state(&self) -> &FetchState<R> {
        &self.state
    }

    pub fn requirement(&self) -> Arc<dyn Requirement<R>> {
        Arc::clone(&self.requirement)
    }

    pub fn empty_message() -> String {
        format!("No {} found.", R::NOUN)
    }

    pub fn error_message() -> String {
        format!("Error fetching {}.", R::NOUN)
    }

    /// Fetch and apply in one go.  The TUI drives the two halves itself.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let result = self.requirement.fetch_all().await;
        self.complete_refresh(ticket, result);
    }

    /// Mark a fetch as in flight and hand out its ticket.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.latest += 1;
        self.state.is_loading = true;
        self.state.error_message = None;
        RefreshTicket(self.latest)
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` when the ticket has been superseded and the result
    /// was dropped.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<R>, GatewayError>,
    ) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale refresh result"
            );
            return false;
        }

        match result {
            Ok(records) => {
                let empty = records.is_empty();
                self.state.records = records;
                if empty {
                    self.toasts.show(Self::empty_message(), Severity::Info);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, noun = R::NOUN, "fetch failed");
                let message = Self::error_message();
                self.toasts.show(message.clone(), Severity::Error);
                self.state.error_message = Some(message);
            }
        }

        self.state.is_loading = false;
        true
    }
}

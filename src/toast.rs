//! Transient notifications ("toasts").
//!
//! A single slot shared by everyone holding a [`ToastManager`] handle.  The
//! handle is cloned into whichever component needs to raise a toast; there
//! is no global instance.
//!
//! Every [`show`](ToastManager::show) replaces the slot and restarts the
//! auto-dismiss countdown.  The previous countdown task is aborted, and each
//! countdown also carries the generation it was started for, so a timer
//! that already woke up cannot hide a newer toast.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long a toast stays up unless replaced or dismissed.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Only `Info` and `Error` are raised by the fetch flow today; the other
/// two are part of the toast palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(test), allow(dead_code))]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Heading shown above the message.
    pub fn title(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Success => "Success",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

#[derive(Default)]
struct Slot {
    toast: Option<Toast>,
    /// Bumped by every show/dismiss.
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Cloneable handle onto the shared toast slot.
#[derive(Clone)]
pub struct ToastManager {
    slot: Arc<Mutex<Slot>>,
    delay: Duration,
}

impl ToastManager {
    pub fn new(delay: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            delay,
        }
    }

    /// Display `message`, replacing whatever is showing.
    ///
    /// Must be called from within a tokio runtime; the countdown runs as a
    /// spawned task.
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        tracing::debug!(?severity, %message, "showing toast");

        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation += 1;
        slot.toast = Some(Toast { message, severity });

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.toast = None;
                slot.timer = None;
            }
        }));
    }

    /// Hide the toast now and cancel its countdown.
    pub fn dismiss(&self) {
        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation += 1;
        slot.toast = None;
    }

    pub fn current(&self) -> Option<Toast> {
        lock(&self.slot).toast.clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.slot).toast.is_some()
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

// The slot holds no invariants a panic could break halfway.
fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    async fn settle() {
        tokio::task::yield_now().await;
    }

    #[test]
    fn severity_titles() {
        assert_eq!(Severity::Info.title(), "Info");
        assert_eq!(Severity::Success.title(), "Success");
        assert_eq!(Severity::Warning.title(), "Warning");
        assert_eq!(Severity::Error.title(), "Error");
    }

    #[tokio::test(start_paused = true)]
    async fn starts_hidden() {
        let toasts = ToastManager::default();
        assert!(!toasts.is_visible());
        assert!(toasts.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn show_then_auto_dismiss_after_delay() {
        let toasts = ToastManager::default();
        toasts.show("Saved", Severity::Success);

        assert_eq!(
            toasts.current(),
            Some(Toast {
                message: "Saved".into(),
                severity: Severity::Success,
            })
        );

        sleep(Duration::from_millis(2_900)).await;
        settle().await;
        assert!(toasts.is_visible(), "still within the delay");

        sleep(Duration::from_millis(200)).await;
        settle().await;
        assert!(!toasts.is_visible(), "hidden once the delay has passed");
    }

    #[tokio::test(start_paused = true)]
    async fn second_show_replaces_content_and_restarts_countdown() {
        let toasts = ToastManager::default();
        toasts.show("A", Severity::Info);

        sleep(Duration::from_secs(2)).await;
        toasts.show("B", Severity::Warning);

        // Past A's original deadline.
        sleep(Duration::from_millis(1_500)).await;
        settle().await;
        let current = toasts.current().expect("B should still be visible");
        assert_eq!(current.message, "B");
        assert_eq!(current.severity, Severity::Warning);

        // Past B's deadline.
        sleep(Duration::from_millis(1_600)).await;
        settle().await;
        assert!(!toasts.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_hides_immediately_and_cancels_timer() {
        let toasts = ToastManager::default();
        toasts.show("A", Severity::Error);
        toasts.dismiss();
        assert!(!toasts.is_visible());

        sleep(Duration::from_secs(1)).await;
        toasts.show("B", Severity::Info);

        // A's timer would have fired at t=3s; B must survive it.
        sleep(Duration::from_millis(2_500)).await;
        settle().await;
        assert_eq!(toasts.current().map(|t| t.message), Some("B".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_one_slot() {
        let toasts = ToastManager::new(Duration::from_millis(500));
        let other = toasts.clone();

        other.show("from clone", Severity::Info);
        assert_eq!(
            toasts.current().map(|t| t.message),
            Some("from clone".to_string())
        );

        toasts.dismiss();
        assert!(!other.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn at_most_one_pending_timer() {
        let toasts = ToastManager::default();
        for i in 0..5 {
            toasts.show(format!("t{i}"), Severity::Info);
        }
        let slot = lock(&toasts.slot);
        assert_eq!(slot.generation, 5);
        assert!(slot.timer.is_some());
    }
}

//! User-facing alerts.
//!
//! The editor never blocks on a dialog; it hands the message to a
//! [`Notifier`] and carries on. Embedders decide how to show it.

use parking_lot::Mutex;
use tracing::warn;

/// Text shown when a lock request loses to another editor.
pub const LOCK_CONFLICT_ALERT: &str = "Error - can't request lock!";

/// Text shown when Save is pressed while a field is invalid.
pub const VALIDATION_ALERT: &str = "Test contains errors. Please fix any errors before saving.";

/// Text shown when this editor finds its lock held by someone else.
#[must_use]
pub fn lock_lost_alert(holder: Option<&str>) -> String {
    format!(
        "{} has taken control of these settings. Your changes have not been saved.",
        holder.unwrap_or("Another user")
    )
}

pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        warn!(alert = message, "Editor alert");
    }
}

/// Keeps every alert in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    /// Drain the recorded alerts.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.alerts.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_owned());
    }
}

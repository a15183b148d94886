use std::sync::{Arc, Mutex};

use colored::Colorize;
use tracing::info;

use crate::error::Error;

/// Receives failures the user should be told about.
///
/// Reporting never blocks and never changes controller state.
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &Error);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, error: &Error) {
        (**self).notify(error)
    }
}

/// Writes each failure to stderr, one line per notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, error: &Error) {
        eprintln!("{} {error}", "error:".red().bold());
    }
}

/// Keeps every notification so a front end can show them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A poisoned lock still holds a valid Vec of strings.
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, error: &Error) {
        info!(%error, "recording notification");
        self.lock().push(error.to_string());
    }
}

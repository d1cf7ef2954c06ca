//! User-facing notifications.
//!
//! The engine never renders anything itself. After each operation it hands
//! a short message to a [`NotificationSink`]; the host decides whether that
//! becomes a toast, a status line or a log entry.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use tabcart_core::NoticeKind;

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

/// Receives user-facing messages.
pub trait NotificationSink {
    /// Show `message` to the user.
    fn notify(&self, message: &str, kind: NoticeKind);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, message: &str, kind: NoticeKind) {
        (**self).notify(message, kind);
    }
}

/// Writes notices to the `tabcart::notice` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => info!(target: "tabcart::notice", %kind, "{message}"),
            NoticeKind::Error => warn!(target: "tabcart::notice", %kind, "{message}"),
        }
    }
}

/// Keeps every notice in memory. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice received so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Remove and return every notice received so far.
    #[must_use]
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notice {
                message: message.to_owned(),
                kind,
            });
    }
}

//! User-visible notification channel.
//!
//! The web frontend surfaces request failures as toasts; here the same
//! contract is a `Notifier` trait so the request wrapper's notification
//! rules (silent flag, swallowed GET connectivity errors) stay independent
//! of how messages are displayed. The CLI writes them to stderr.

#[cfg(test)]
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: ToastKind, message: &str);
}

/// Notifier that records messages instead of displaying them.
/// Used by tests to assert which failures become user-visible.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(ToastKind, String)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(ToastKind, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, kind: ToastKind, message: &str) {
        self.messages.lock().unwrap().push((kind, message.to_string()));
    }
}

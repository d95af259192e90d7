//! Notification sink consumed by controllers.
//!
//! # Design
//! - Controllers only see the [`Notifier`] trait; the wasm shell backs it with
//!   the shared store and tests back it with a recorder.
//! - [`ToastQueue`] is the pure queue the store keeps; it never renders.

use crate::core::config::DEFAULT_TOAST_DURATION_MS;
use std::collections::HashMap;

/// Maximum number of toasts kept at once; the oldest is dropped first.
pub const MAX_TOASTS: usize = 5;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation completed.
    Success,
    /// Operation failed.
    Error,
    /// Operation was refused or needs attention.
    Warning,
    /// Neutral information.
    Info,
}

impl NotificationKind {
    /// CSS modifier used by the toast host.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A single notification request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Display time in milliseconds.
    pub duration_ms: u32,
}

impl Notification {
    /// Build a notification with the default duration.
    #[must_use]
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    /// Override the display time.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Fire-and-forget notification queue.
pub trait Notifier {
    /// Queue a notification and return its id.
    fn add(&self, notification: Notification) -> u64;

    /// Dismiss a notification early.
    fn remove(&self, id: u64);

    /// Queue a success notification.
    fn success(&self, title: &str, message: &str) -> u64 {
        self.add(Notification::new(NotificationKind::Success, title, message))
    }

    /// Queue an error notification.
    fn error(&self, title: &str, message: &str) -> u64 {
        self.add(Notification::new(NotificationKind::Error, title, message))
    }

    /// Queue a warning notification.
    fn warning(&self, title: &str, message: &str) -> u64 {
        self.add(Notification::new(NotificationKind::Warning, title, message))
    }

    /// Queue an informational notification.
    fn info(&self, title: &str, message: &str) -> u64 {
        self.add(Notification::new(NotificationKind::Info, title, message))
    }
}

/// Queued notification with its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Notification payload.
    pub notification: Notification,
}

/// Bounded FIFO of visible toasts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Append a toast, evicting the oldest beyond [`MAX_TOASTS`].
    pub fn push(&mut self, notification: Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, notification });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
        id
    }

    /// Remove a toast; returns whether it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Visible toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// One auto-dismiss handle per visible toast.
///
/// Handles survive unrelated queue changes, so a toast's timer starts once
/// when it first appears and is dropped when the toast leaves.
#[derive(Debug)]
pub struct ToastTimers<H> {
    armed: HashMap<u64, H>,
}

impl<H> Default for ToastTimers<H> {
    fn default() -> Self {
        Self {
            armed: HashMap::new(),
        }
    }
}

impl<H> ToastTimers<H> {
    /// Arm new toasts with `start` and drop handles of toasts that are gone.
    pub fn sync(&mut self, toasts: &[Toast], mut start: impl FnMut(&Toast) -> H) {
        self.armed
            .retain(|id, _| toasts.iter().any(|toast| toast.id == *id));
        for toast in toasts {
            self.armed.entry(toast.id).or_insert_with(|| start(toast));
        }
    }

    /// Drop every handle.
    pub fn clear(&mut self) {
        self.armed.clear();
    }

    /// Number of armed handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    /// Whether no handle is armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(message: &str) -> Notification {
        Notification::new(NotificationKind::Info, "t", message)
    }

    #[test]
    fn ids_are_monotonic_and_dismiss_removes() {
        let mut queue = ToastQueue::default();
        let first = queue.push(info("a"));
        let second = queue.push(info("b"));
        assert!(second > first);
        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].notification.message, "b");
    }

    #[test]
    fn queue_drops_oldest_past_capacity() {
        let mut queue = ToastQueue::default();
        for idx in 0..(MAX_TOASTS + 2) {
            queue.push(info(&idx.to_string()));
        }
        assert_eq!(queue.toasts().len(), MAX_TOASTS);
        assert_eq!(queue.toasts()[0].notification.message, "2");
    }

    #[test]
    fn timers_start_once_per_toast() {
        let mut queue = ToastQueue::default();
        let mut timers = ToastTimers::default();
        let mut started = Vec::new();

        let first = queue.push(info("a"));
        timers.sync(queue.toasts(), |toast| started.push(toast.id));
        let second = queue.push(info("b"));
        timers.sync(queue.toasts(), |toast| started.push(toast.id));
        assert_eq!(started, vec![first, second]);

        queue.dismiss(first);
        timers.sync(queue.toasts(), |toast| started.push(toast.id));
        assert_eq!(started, vec![first, second]);
        assert_eq!(timers.len(), 1);

        timers.clear();
        assert!(timers.is_empty());
    }

    #[test]
    fn duration_override_applies() {
        let toast = info("x").with_duration(10);
        assert_eq!(toast.duration_ms, 10);
        assert_eq!(info("y").duration_ms, DEFAULT_TOAST_DURATION_MS);
    }
}

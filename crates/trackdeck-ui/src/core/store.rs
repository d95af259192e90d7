//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Only cross-view state lives here; list views own their own controllers.

use crate::core::notify::{Notification, Notifier, ToastQueue};
use tracing::debug;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Visible toasts.
    pub toasts: ToastQueue,
    /// Latest aggregate document count reported by the app panel.
    pub document_count: Option<u64>,
    /// Toast lifetime applied to every queued notification, when configured.
    pub toast_duration_ms: Option<u32>,
}

/// [`Notifier`] backed by the store's toast queue.
#[derive(Clone)]
pub struct StoreNotifier {
    dispatch: Dispatch<AppStore>,
}

impl StoreNotifier {
    /// Wrap the global store dispatch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispatch: Dispatch::<AppStore>::new(),
        }
    }
}

impl Default for StoreNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for StoreNotifier {
    fn add(&self, notification: Notification) -> u64 {
        debug!(kind = notification.kind.as_str(), title = %notification.title, "notification queued");
        let mut id = 0;
        self.dispatch.reduce_mut(|store| {
            let notification = match store.toast_duration_ms {
                Some(duration_ms) => notification.with_duration(duration_ms),
                None => notification,
            };
            id = store.toasts.push(notification);
        });
        id
    }

    fn remove(&self, id: u64) {
        self.dispatch.reduce_mut(|store| {
            store.toasts.dismiss(id);
        });
    }
}

/// Apply the configured toast lifetime to every later notification.
pub fn configure_toasts(duration_ms: u32) {
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        store.toast_duration_ms = Some(duration_ms);
    });
}

/// Publish the latest document count for views outside the app panel.
pub fn publish_document_count(count: Option<u64>) {
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        store.document_count = count;
    });
}

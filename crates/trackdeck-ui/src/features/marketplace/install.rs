//! Install coordination: one install at a time, installed-id bookkeeping.
//!
//! # Design
//! - The in-flight flag is checked and set before the first await, so a second
//!   click that lands while a request is pending never reaches the backend.
//! - Installed ids are normalized marketplace ids (see `AppTracker::marketplace_id`).
//! - Failures never touch state; they only produce a notification.

use crate::core::bridge::{BridgeError, MarketplaceBridge};
use crate::core::failure::FailureKind;
use crate::core::notify::Notifier;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use thiserror::Error;
use tracing::{info, warn};
use trackdeck_bridge_models::{AppTracker, Tracker};

/// Reasons an install did not happen.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstallError {
    /// Another install is still pending.
    #[error("another installation is already in progress")]
    Busy,
    /// The tracker has no usable id.
    #[error("tracker id is missing")]
    InvalidId,
    /// The tracker is already installed.
    #[error("tracker {0} is already installed")]
    AlreadyInstalled(String),
    /// The id is not part of the current listing.
    #[error("tracker {0} is not in the marketplace listing")]
    UnknownTracker(String),
    /// The backend refused or failed.
    #[error("{message}")]
    Backend {
        /// Classified failure kind.
        kind: FailureKind,
        /// Raw backend message.
        message: String,
    },
}

/// Successful install report.
#[derive(Debug, Clone, PartialEq)]
pub struct Installed {
    /// Tracker that was installed.
    pub tracker: Tracker,
    /// Raw backend result.
    pub result: Value,
}

/// Set of installed marketplace ids.
pub type InstalledTrackerIdSet = HashSet<String>;

/// Build the installed-id set from the app-tracker list.
#[must_use]
pub fn installed_ids(apps: &[AppTracker]) -> InstalledTrackerIdSet {
    apps.iter()
        .map(|app| app.marketplace_id().to_string())
        .collect()
}

/// Serializes installs and tracks which trackers are installed.
pub struct InstallCoordinator<B, N> {
    bridge: Rc<B>,
    notifier: Rc<N>,
    installed: RefCell<InstalledTrackerIdSet>,
    in_flight: Cell<bool>,
}

struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<B, N> InstallCoordinator<B, N>
where
    B: MarketplaceBridge,
    N: Notifier,
{
    /// Create a coordinator with an empty installed set.
    pub fn new(bridge: Rc<B>, notifier: Rc<N>) -> Self {
        Self {
            bridge,
            notifier,
            installed: RefCell::new(InstalledTrackerIdSet::new()),
            in_flight: Cell::new(false),
        }
    }

    /// Replace the installed set from a fresh app-tracker list.
    pub fn sync_installed(&self, apps: &[AppTracker]) {
        *self.installed.borrow_mut() = installed_ids(apps);
    }

    /// Whether `id` is installed.
    #[must_use]
    pub fn is_installed(&self, id: &str) -> bool {
        self.installed.borrow().contains(id)
    }

    /// Whether an install is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Install `tracker`.
    ///
    /// # Errors
    ///
    /// [`InstallError::Busy`] when another install is pending (no notification,
    /// no backend call); validation and backend failures notify the user.
    pub async fn install(&self, tracker: &Tracker) -> Result<Installed, InstallError> {
        if self.in_flight.get() {
            return Err(InstallError::Busy);
        }
        let id = tracker.id.trim();
        if id.is_empty() {
            self.notifier.error(
                FailureKind::Validation.title(),
                "This tracker has no identifier and cannot be installed.",
            );
            return Err(InstallError::InvalidId);
        }
        if self.is_installed(id) {
            self.notifier.info(
                "Already installed",
                &format!("{} is already installed.", tracker.name),
            );
            return Err(InstallError::AlreadyInstalled(id.to_string()));
        }

        self.in_flight.set(true);
        let _guard = InFlight(&self.in_flight);
        match self.bridge.install_tracker(id).await {
            Ok(result) => {
                self.installed.borrow_mut().insert(id.to_string());
                info!(tracker_id = %id, "tracker installed");
                self.notifier.success(
                    "Tracker installed",
                    &format!("{} was installed successfully.", tracker.name),
                );
                Ok(Installed {
                    tracker: tracker.clone(),
                    result,
                })
            }
            Err(err) => Err(self.report_failure(tracker, &err)),
        }
    }

    fn report_failure(&self, tracker: &Tracker, err: &BridgeError) -> InstallError {
        let message = err.to_string();
        let kind = FailureKind::classify(&message);
        warn!(tracker_id = %tracker.id, error = %message, kind = ?kind, "tracker install failed");
        let body = match kind {
            FailureKind::Connection => {
                "Could not reach the tracker service. Check your connection and try again."
                    .to_string()
            }
            FailureKind::NotFound => {
                format!("{} is no longer available in the marketplace.", tracker.name)
            }
            FailureKind::Configuration => {
                format!("{} could not be configured: {message}", tracker.name)
            }
            FailureKind::Validation | FailureKind::Generic => {
                format!("Failed to install {}: {message}", tracker.name)
            }
        };
        let title = match kind {
            FailureKind::Generic => "Installation failed",
            other => other.title(),
        };
        self.notifier.error(title, &body);
        InstallError::Backend { kind, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::NotificationKind;
    use crate::test_support::{FakeBridge, RecordingNotifier, app, tracker};

    fn coordinator(bridge: &Rc<FakeBridge>) -> (InstallCoordinator<FakeBridge, RecordingNotifier>, Rc<RecordingNotifier>) {
        let notifier = Rc::new(RecordingNotifier::default());
        (
            InstallCoordinator::new(Rc::clone(bridge), Rc::clone(&notifier)),
            notifier,
        )
    }

    #[tokio::test]
    async fn concurrent_installs_hit_backend_once() {
        let bridge = Rc::new(FakeBridge::default());
        let (coordinator, _notifier) = coordinator(&bridge);
        let target = tracker("focus", "Focus Timer");

        let (first, second) = tokio::join!(coordinator.install(&target), coordinator.install(&target));

        assert!(first.is_ok());
        assert_eq!(second, Err(InstallError::Busy));
        assert_eq!(bridge.calls_to("install_tracker"), 1);
        assert!(coordinator.is_installed("focus"));
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn success_reports_tracker_and_raw_result() {
        let bridge = Rc::new(FakeBridge::default());
        let (coordinator, notifier) = coordinator(&bridge);
        let installed = coordinator.install(&tracker("focus", "Focus Timer")).await.unwrap();
        assert_eq!(installed.tracker.id, "focus");
        assert_eq!(installed.result["installed"], "focus");
        assert_eq!(notifier.kinds(), vec![NotificationKind::Success]);
    }

    #[tokio::test]
    async fn blank_id_is_rejected_locally() {
        let bridge = Rc::new(FakeBridge::default());
        let (coordinator, notifier) = coordinator(&bridge);
        let result = coordinator.install(&tracker("  ", "Nameless")).await;
        assert_eq!(result, Err(InstallError::InvalidId));
        assert_eq!(bridge.calls_to("install_tracker"), 0);
        assert_eq!(notifier.kinds(), vec![NotificationKind::Error]);
    }

    #[tokio::test]
    async fn installed_membership_uses_normalized_ids() {
        let bridge = Rc::new(FakeBridge::default());
        let (coordinator, _notifier) = coordinator(&bridge);
        coordinator.sync_installed(&[app("backend-1", "Focus Timer", false, Some("/apps/focus"))]);
        assert!(coordinator.is_installed("focus"));
        assert!(!coordinator.is_installed("backend-1"));

        let result = coordinator.install(&tracker("focus", "Focus Timer")).await;
        assert_eq!(result, Err(InstallError::AlreadyInstalled("focus".into())));
        assert_eq!(bridge.calls_to("install_tracker"), 0);
    }

    #[tokio::test]
    async fn failures_are_classified_and_leave_state_untouched() {
        let cases = [
            ("network unreachable", FailureKind::Connection, "Connection failed"),
            ("tracker not found", FailureKind::NotFound, "Not found"),
            ("bad config value", FailureKind::Configuration, "Configuration issue"),
            ("disk full", FailureKind::Generic, "Installation failed"),
        ];
        for (message, kind, title) in cases {
            let bridge = Rc::new(FakeBridge::default());
            bridge.fail_next_install(BridgeError::Rejected(message.into()));
            let (coordinator, notifier) = coordinator(&bridge);

            let result = coordinator.install(&tracker("focus", "Focus Timer")).await;

            assert_eq!(
                result,
                Err(InstallError::Backend {
                    kind,
                    message: message.into()
                })
            );
            assert!(!coordinator.is_installed("focus"));
            assert!(!coordinator.is_busy());
            assert_eq!(notifier.last_title().as_deref(), Some(title));
        }
    }
}

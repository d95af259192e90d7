//! Installed-tracker panel controller.
//!
//! # Design
//! - Document count and app list are fetched independently; a failure in one
//!   never blocks or clears the other.
//! - Row actions patch the local list instead of re-fetching it.
//! - Action faults only notify. Page-level faults notify once when they
//!   appear and keep `error` set until that source loads again.
//! - `RefCell` borrows are never held across an await.

use crate::core::bridge::AppsBridge;
use crate::core::dropdown::{ClickOrigin, DropdownState};
use crate::core::notify::Notifier;
use crate::features::apps::icons::{AppIcon, choose_icon};
use crate::features::apps::modal::ModalHandoff;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};
use trackdeck_bridge_models::AppTracker;

/// Installed tracker plus its resolved icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppEntry {
    /// Backend state.
    pub app: AppTracker,
    /// Icon to render.
    pub icon: AppIcon,
}

/// Panel UI state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppPanelState {
    /// Last known-good app list.
    pub apps: Vec<AppEntry>,
    /// Last known-good document count.
    pub document_count: Option<u64>,
    /// Page-level error banner.
    pub error: Option<String>,
    /// The tracker list has settled at least once.
    pub loaded: bool,
    /// Row menu exclusivity.
    pub menu: DropdownState,
    /// Configure modal target.
    pub configure: ModalHandoff,
}

/// Result of a refresh request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Both sources were queried.
    Completed,
    /// A previous refresh was still pending; nothing was sent.
    Skipped,
}

/// Row action failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PanelError {
    /// No entry with that id.
    #[error("no installed tracker with id {0}")]
    UnknownApp(String),
    /// Uninstall requires the tracker to be disabled first.
    #[error("{0} must be disabled before it can be uninstalled")]
    StillEnabled(String),
    /// The backend refused or failed.
    #[error("{0}")]
    Backend(String),
}

/// Controller behind the installed-tracker grid.
pub struct AppPanel<B, N> {
    bridge: Rc<B>,
    notifier: Rc<N>,
    state: RefCell<AppPanelState>,
    page_errors: RefCell<PageErrors>,
    count_pending: Cell<bool>,
    apps_pending: Cell<bool>,
}

/// Page-level fault per refresh source.
#[derive(Default)]
struct PageErrors {
    count: Option<String>,
    apps: Option<String>,
}

impl PageErrors {
    fn combined(&self) -> Option<String> {
        match (&self.count, &self.apps) {
            (Some(count), Some(apps)) => Some(format!("{count}; {apps}")),
            (Some(one), None) | (None, Some(one)) => Some(one.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Source {
    Count,
    Apps,
}

impl Source {
    const fn title(self) -> &'static str {
        match self {
            Self::Count => "Document count unavailable",
            Self::Apps => "Trackers unavailable",
        }
    }
}

/// Clears a pending flag when its fetch settles or is dropped.
struct Pending<'a>(&'a Cell<bool>);

impl<'a> Pending<'a> {
    fn claim(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<B, N> AppPanel<B, N>
where
    B: AppsBridge,
    N: Notifier,
{
    /// Create an empty panel.
    pub fn new(bridge: Rc<B>, notifier: Rc<N>) -> Self {
        Self {
            bridge,
            notifier,
            state: RefCell::new(AppPanelState::default()),
            page_errors: RefCell::new(PageErrors::default()),
            count_pending: Cell::new(false),
            apps_pending: Cell::new(false),
        }
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> AppPanelState {
        self.state.borrow().clone()
    }

    /// Re-fetch document count and app list.
    ///
    /// Both fetches run concurrently and each result is applied as it
    /// arrives. A source whose previous fetch is still pending is not queried
    /// again, so a hung call never blocks the other source on later ticks.
    pub async fn refresh(&self) -> RefreshOutcome {
        let count = Pending::claim(&self.count_pending);
        let apps = Pending::claim(&self.apps_pending);
        if count.is_none() && apps.is_none() {
            debug!("refresh skipped; previous cycle pending");
            return RefreshOutcome::Skipped;
        }
        if count.is_none() {
            debug!("document count still pending; refreshing trackers only");
        }
        if apps.is_none() {
            debug!("tracker list still pending; refreshing document count only");
        }

        futures::join!(
            async move {
                if let Some(_pending) = count {
                    let error = self.refresh_document_count().await;
                    self.record_page_error(Source::Count, error);
                }
            },
            async move {
                if let Some(_pending) = apps {
                    let error = self.refresh_apps().await;
                    self.state.borrow_mut().loaded = true;
                    self.record_page_error(Source::Apps, error);
                }
            },
        );
        RefreshOutcome::Completed
    }

    /// Store one source's page error; notifies only when a fault first appears.
    fn record_page_error(&self, source: Source, error: Option<String>) {
        let (appeared, combined) = {
            let mut errors = self.page_errors.borrow_mut();
            let slot = match source {
                Source::Count => &mut errors.count,
                Source::Apps => &mut errors.apps,
            };
            let appeared = if slot.is_none() { error.clone() } else { None };
            *slot = error;
            (appeared, errors.combined())
        };
        self.state.borrow_mut().error = combined;
        if let Some(message) = appeared {
            self.notifier.error(source.title(), &message);
        }
    }

    /// Re-fetch only the document count; returns the page error to show, if any.
    async fn refresh_document_count(&self) -> Option<String> {
        match self.bridge.document_count().await {
            Ok(stats) => {
                self.state.borrow_mut().document_count = Some(stats.count);
                stats.error
            }
            Err(err) => {
                warn!(error = %err, "document count unavailable");
                Some(format!("Failed to load document count: {err}"))
            }
        }
    }

    async fn refresh_apps(&self) -> Option<String> {
        let apps = match self.bridge.app_trackers().await {
            Ok(apps) => apps,
            Err(err) => {
                warn!(error = %err, "app trackers unavailable");
                return Some(format!("Failed to load trackers: {err}"));
            }
        };
        let mut entries = Vec::with_capacity(apps.len());
        for app in apps {
            let resolved = match self.bridge.app_icon_path(&app.id, app.path.as_deref()).await {
                Ok(path) => Some(path),
                Err(err) => {
                    debug!(app_id = %app.id, error = %err, "icon resolution failed");
                    None
                }
            };
            let icon = choose_icon(resolved, app.custom_icon_path.as_deref(), &app.name);
            entries.push(AppEntry { app, icon });
        }
        let mut state = self.state.borrow_mut();
        if let Some(open) = state.menu.open_id()
            && !entries.iter().any(|entry| entry.app.id == open)
        {
            state.menu.close();
        }
        state.apps = entries;
        None
    }

    /// Flip a tracker between enabled and disabled.
    ///
    /// # Errors
    ///
    /// [`PanelError::UnknownApp`] or [`PanelError::Backend`]; both notify.
    pub async fn toggle(&self, id: &str) -> Result<bool, PanelError> {
        let name = self.name_of(id)?;
        match self.bridge.toggle_app_tracker(id).await {
            Ok(updated) => {
                let enabled = updated.enabled;
                self.patch(id, |app| app.enabled = enabled);
                let verb = if enabled { "enabled" } else { "disabled" };
                info!(app_id = %id, enabled, "tracker toggled");
                self.notifier.success(
                    &format!("Tracker {verb}"),
                    &format!("{name} has been {verb}."),
                );
                Ok(enabled)
            }
            Err(err) => Err(self.action_failed("Toggle failed", &format!("Could not toggle {name}"), &err.to_string())),
        }
    }

    /// Uninstall a disabled tracker.
    ///
    /// # Errors
    ///
    /// [`PanelError::StillEnabled`] (warning, no backend call),
    /// [`PanelError::UnknownApp`] or [`PanelError::Backend`].
    pub async fn uninstall(&self, id: &str) -> Result<(), PanelError> {
        let entry = self
            .state
            .borrow()
            .apps
            .iter()
            .find(|entry| entry.app.id == id)
            .map(|entry| (entry.app.name.clone(), entry.app.enabled));
        let Some((name, enabled)) = entry else {
            return Err(self.unknown(id));
        };
        if enabled {
            self.notifier.warning(
                "Tracker still enabled",
                &format!("Disable {name} before uninstalling it."),
            );
            return Err(PanelError::StillEnabled(name));
        }
        match self.bridge.uninstall_app_tracker(id).await {
            Ok(message) => {
                {
                    let mut state = self.state.borrow_mut();
                    state.apps.retain(|entry| entry.app.id != id);
                    state.menu.close();
                }
                info!(app_id = %id, "tracker uninstalled");
                self.notifier.success(
                    "Tracker uninstalled",
                    &message.unwrap_or_else(|| format!("{name} has been uninstalled.")),
                );
                Ok(())
            }
            Err(err) => Err(self.action_failed("Uninstall failed", &format!("Could not uninstall {name}"), &err.to_string())),
        }
    }

    /// Update a tracker to the latest version; closes the row menu on success.
    ///
    /// # Errors
    ///
    /// [`PanelError::UnknownApp`] or [`PanelError::Backend`]; both notify.
    pub async fn update(&self, id: &str) -> Result<String, PanelError> {
        let entry = self
            .state
            .borrow()
            .apps
            .iter()
            .find(|entry| entry.app.id == id)
            .map(|entry| (entry.app.name.clone(), entry.app.version.clone()));
        let Some((name, old_version)) = entry else {
            return Err(self.unknown(id));
        };
        match self.bridge.update_app_tracker(id).await {
            Ok(updated) => {
                let new_version = updated.version;
                self.patch(id, |app| {
                    app.version.clone_from(&new_version);
                    app.has_update = false;
                });
                self.state.borrow_mut().menu.close();
                info!(app_id = %id, from = %old_version, to = %new_version, "tracker updated");
                self.notifier.success(
                    "Tracker updated",
                    &format!("{name} updated from v{old_version} to v{new_version}."),
                );
                Ok(new_version)
            }
            Err(err) => Err(self.action_failed("Update failed", &format!("Could not update {name}"), &err.to_string())),
        }
    }

    /// Remove orphaned documents, then re-read the count.
    ///
    /// # Errors
    ///
    /// [`PanelError::Backend`] when the cleanup fails; the page error is untouched.
    pub async fn cleanup_documents(&self) -> Result<(), PanelError> {
        match self.bridge.cleanup_documents().await {
            Ok(message) => {
                self.notifier.success(
                    "Documents cleaned up",
                    message.as_deref().unwrap_or("Orphaned documents were removed."),
                );
                if let Some(error) = self.refresh_document_count().await {
                    warn!(error = %error, "document count refresh after cleanup failed");
                }
                Ok(())
            }
            Err(err) => Err(self.action_failed("Cleanup failed", "Could not clean up documents", &err.to_string())),
        }
    }

    /// Open a row menu, closing any other.
    pub fn toggle_menu(&self, id: &str) {
        self.state.borrow_mut().menu.toggle(id);
    }

    /// Feed a document click; returns whether a menu closed.
    pub fn handle_click(&self, origin: &ClickOrigin) -> bool {
        self.state.borrow_mut().menu.handle_click(origin)
    }

    /// Start re-targeting the configure modal at `id`.
    pub fn configure(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        state.menu.close();
        state.configure.request(id);
    }

    /// Finish the hand-off started by [`Self::configure`].
    pub fn settle_configure(&self) -> bool {
        self.state.borrow_mut().configure.settle()
    }

    /// Close the configure modal.
    pub fn close_configure(&self) {
        self.state.borrow_mut().configure.close();
    }

    fn name_of(&self, id: &str) -> Result<String, PanelError> {
        let name = self
            .state
            .borrow()
            .apps
            .iter()
            .find(|entry| entry.app.id == id)
            .map(|entry| entry.app.name.clone());
        name.ok_or_else(|| self.unknown(id))
    }

    fn patch(&self, id: &str, apply: impl FnOnce(&mut AppTracker)) {
        let mut state = self.state.borrow_mut();
        if let Some(entry) = state.apps.iter_mut().find(|entry| entry.app.id == id) {
            apply(&mut entry.app);
        }
    }

    fn unknown(&self, id: &str) -> PanelError {
        self.notifier
            .error("Tracker not found", "The selected tracker is no longer installed.");
        PanelError::UnknownApp(id.to_string())
    }

    fn action_failed(&self, title: &str, context: &str, message: &str) -> PanelError {
        warn!(error = %message, "{context}");
        self.notifier.error(title, &format!("{context}: {message}"));
        PanelError::Backend(message.to_string())
    }
}

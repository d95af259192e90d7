//! In-memory bridge and notifier used by controller tests.

use crate::core::bridge::{AppsBridge, BridgeError, MarketplaceBridge};
use crate::core::notify::{Notification, NotificationKind, Notifier};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use chrono::{TimeZone, Utc};
use trackdeck_bridge_models::{AppTracker, DocumentStats, Message, Sender, Tracker};

/// Marketplace entry with just an id and name.
pub(crate) fn tracker(id: &str, name: &str) -> Tracker {
    Tracker {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        version: "1.0.0".to_string(),
        developer: "Trackdeck".to_string(),
        icon_path: None,
        verified: false,
        featured: false,
    }
}

/// Installed tracker at version 1.0.0.
pub(crate) fn app(id: &str, name: &str, enabled: bool, path: Option<&str>) -> AppTracker {
    AppTracker {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        version: "1.0.0".to_string(),
        icon: String::new(),
        enabled,
        has_update: false,
        path: path.map(str::to_string),
        custom_icon_path: None,
    }
}

/// Plain text message from `u1` at a fixed time.
pub(crate) fn message(id: &str, text: &str) -> Message {
    Message {
        id: id.to_string(),
        sender: Sender {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            avatar: String::new(),
            online: None,
        },
        text: text.to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap(),
        message_type: None,
        delivery_status: None,
        attachments: Vec::new(),
        reply_to: None,
        replies: Vec::new(),
        reply_count: None,
        metadata: None,
    }
}

/// Scriptable bridge that records every call.
///
/// Each call yields once before answering so joined futures interleave the way
/// a real IPC round-trip would.
pub(crate) struct FakeBridge {
    calls: RefCell<Vec<String>>,
    trackers: RefCell<Result<Vec<Tracker>, BridgeError>>,
    apps: RefCell<Result<Vec<AppTracker>, BridgeError>>,
    stats: RefCell<Result<DocumentStats, BridgeError>>,
    stalled_count: Cell<bool>,
    icons: RefCell<HashMap<String, String>>,
    install_failure: RefCell<Option<BridgeError>>,
    action_failure: RefCell<Option<BridgeError>>,
    update_version: RefCell<String>,
}

impl Default for FakeBridge {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            trackers: RefCell::new(Ok(Vec::new())),
            apps: RefCell::new(Ok(Vec::new())),
            stats: RefCell::new(Ok(DocumentStats {
                count: 7,
                error: None,
            })),
            stalled_count: Cell::new(false),
            icons: RefCell::new(HashMap::new()),
            install_failure: RefCell::new(None),
            action_failure: RefCell::new(None),
            update_version: RefCell::new("1.1.0".to_string()),
        }
    }
}

impl FakeBridge {
    pub(crate) fn calls_to(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|call| *call == name).count()
    }

    pub(crate) fn set_trackers(&self, trackers: Vec<Tracker>) {
        *self.trackers.borrow_mut() = Ok(trackers);
    }

    pub(crate) fn fail_tracker_list(&self, err: BridgeError) {
        *self.trackers.borrow_mut() = Err(err);
    }

    pub(crate) fn set_apps(&self, apps: Vec<AppTracker>) {
        *self.apps.borrow_mut() = Ok(apps);
    }

    pub(crate) fn fail_apps(&self, err: BridgeError) {
        *self.apps.borrow_mut() = Err(err);
    }

    pub(crate) fn set_document_stats(&self, stats: DocumentStats) {
        *self.stats.borrow_mut() = Ok(stats);
    }

    pub(crate) fn fail_document_count(&self, err: BridgeError) {
        *self.stats.borrow_mut() = Err(err);
    }

    /// Make every later `document_count` call hang forever.
    pub(crate) fn stall_document_count(&self) {
        self.stalled_count.set(true);
    }

    pub(crate) fn set_icon(&self, id: &str, path: &str) {
        self.icons
            .borrow_mut()
            .insert(id.to_string(), path.to_string());
    }

    pub(crate) fn fail_next_install(&self, err: BridgeError) {
        *self.install_failure.borrow_mut() = Some(err);
    }

    /// Fail every toggle, uninstall, update and cleanup from now on.
    pub(crate) fn fail_actions(&self, err: BridgeError) {
        *self.action_failure.borrow_mut() = Some(err);
    }

    pub(crate) fn set_update_version(&self, version: &str) {
        *self.update_version.borrow_mut() = version.to_string();
    }

    async fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_string());
        tokio::task::yield_now().await;
    }

    fn action_result(&self) -> Result<(), BridgeError> {
        self.action_failure.borrow().clone().map_or(Ok(()), Err)
    }

    fn find_app(&self, id: &str) -> Result<AppTracker, BridgeError> {
        self.apps
            .borrow()
            .as_ref()
            .ok()
            .and_then(|apps| apps.iter().find(|app| app.id == id).cloned())
            .ok_or_else(|| BridgeError::Rejected(format!("tracker {id} not found")))
    }
}

#[async_trait(?Send)]
impl AppsBridge for FakeBridge {
    async fn document_count(&self) -> Result<DocumentStats, BridgeError> {
        self.record("document_count").await;
        if self.stalled_count.get() {
            std::future::pending::<()>().await;
        }
        self.stats.borrow().clone()
    }

    async fn app_trackers(&self) -> Result<Vec<AppTracker>, BridgeError> {
        self.record("app_trackers").await;
        self.apps.borrow().clone()
    }

    async fn app_icon_path(&self, id: &str, _path: Option<&str>) -> Result<String, BridgeError> {
        self.record("app_icon_path").await;
        self.icons
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| BridgeError::Rejected("icon not found".into()))
    }

    async fn toggle_app_tracker(&self, id: &str) -> Result<AppTracker, BridgeError> {
        self.record("toggle_app_tracker").await;
        self.action_result()?;
        let mut app = self.find_app(id)?;
        app.enabled = !app.enabled;
        Ok(app)
    }

    async fn uninstall_app_tracker(&self, id: &str) -> Result<Option<String>, BridgeError> {
        self.record("uninstall_app_tracker").await;
        self.action_result()?;
        self.find_app(id)?;
        Ok(None)
    }

    async fn update_app_tracker(&self, id: &str) -> Result<AppTracker, BridgeError> {
        self.record("update_app_tracker").await;
        self.action_result()?;
        let mut app = self.find_app(id)?;
        app.version.clone_from(&self.update_version.borrow());
        app.has_update = false;
        Ok(app)
    }

    async fn cleanup_documents(&self) -> Result<Option<String>, BridgeError> {
        self.record("cleanup_documents").await;
        self.action_result()?;
        Ok(Some("Removed orphaned documents".to_string()))
    }
}

#[async_trait(?Send)]
impl MarketplaceBridge for FakeBridge {
    async fn tracker_list(&self) -> Result<Vec<Tracker>, BridgeError> {
        self.record("tracker_list").await;
        self.trackers.borrow().clone()
    }

    async fn install_tracker(&self, id: &str) -> Result<Value, BridgeError> {
        self.record("install_tracker").await;
        if let Some(err) = self.install_failure.borrow_mut().take() {
            return Err(err);
        }
        Ok(json!({ "installed": id }))
    }
}

/// Notifier that keeps every notification it receives.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn kinds(&self) -> Vec<NotificationKind> {
        self.seen.borrow().iter().map(|n| n.kind).collect()
    }

    pub(crate) fn last_title(&self) -> Option<String> {
        self.seen.borrow().last().map(|n| n.title.clone())
    }

    pub(crate) fn last_message(&self) -> Option<String> {
        self.seen.borrow().last().map(|n| n.message.clone())
    }
}

impl Notifier for RecordingNotifier {
    fn add(&self, notification: Notification) -> u64 {
        let mut seen = self.seen.borrow_mut();
        seen.push(notification);
        seen.len() as u64
    }

    fn remove(&self, _id: u64) {}
}

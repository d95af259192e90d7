//! Backend bridge contracts.
//!
//! # Design
//! - The desktop shell owns all business logic; the UI only sees these traits.
//! - Controllers receive an `Rc` to an implementation so tests can swap in fakes.
//! - Futures are `?Send`: everything runs on the single renderer thread.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use trackdeck_bridge_models::{AppTracker, DocumentStats, EnvelopeError, Tracker};

/// Failure surfaced by a bridge call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// `window.api` (or the requested function) is not exposed.
    #[error("desktop bridge is unavailable")]
    Unavailable,
    /// The call threw or its promise rejected.
    #[error("bridge call failed: {0}")]
    Transport(String),
    /// The backend answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The response did not match the expected shape.
    #[error("unexpected bridge response: {0}")]
    Decode(String),
}

impl From<EnvelopeError> for BridgeError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected(message) => Self::Rejected(message),
            EnvelopeError::Decode(source) => Self::Decode(source.to_string()),
        }
    }
}

/// `window.api.apps.*`: installed trackers and document statistics.
#[async_trait(?Send)]
pub trait AppsBridge {
    /// `apps.getDocumentCount()`.
    async fn document_count(&self) -> Result<DocumentStats, BridgeError>;
    /// `apps.getAppTrackers()`.
    async fn app_trackers(&self) -> Result<Vec<AppTracker>, BridgeError>;
    /// `apps.getAppIconPath(id, path?)`.
    async fn app_icon_path(&self, id: &str, path: Option<&str>) -> Result<String, BridgeError>;
    /// `apps.toggleAppTracker(id)`; returns the tracker after toggling.
    async fn toggle_app_tracker(&self, id: &str) -> Result<AppTracker, BridgeError>;
    /// `apps.uninstallAppTracker(id)`; returns the backend's message, if any.
    async fn uninstall_app_tracker(&self, id: &str) -> Result<Option<String>, BridgeError>;
    /// `apps.updateAppTracker(id)`; returns the tracker after updating.
    async fn update_app_tracker(&self, id: &str) -> Result<AppTracker, BridgeError>;
    /// `apps.cleanupDocuments()`; returns the backend's message, if any.
    async fn cleanup_documents(&self) -> Result<Option<String>, BridgeError>;
}

/// `window.api.trackerMarketplace.*`: listing and installation.
#[async_trait(?Send)]
pub trait MarketplaceBridge {
    /// `trackerMarketplace.getTrackerList()`.
    async fn tracker_list(&self) -> Result<Vec<Tracker>, BridgeError>;
    /// `trackerMarketplace.installTracker(id)`; the result is passed through untouched.
    async fn install_tracker(&self, id: &str) -> Result<Value, BridgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackdeck_bridge_models::{MessageReply, decode_envelope};

    #[test]
    fn envelope_rejections_keep_backend_message() {
        let err: BridgeError = decode_envelope::<MessageReply>(r#"{"success":false,"error":"nope"}"#)
            .unwrap_err()
            .into();
        assert_eq!(err, BridgeError::Rejected("nope".into()));
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn decode_failures_are_reported_as_decode() {
        let err: BridgeError = decode_envelope::<MessageReply>("not json").unwrap_err().into();
        assert!(matches!(err, BridgeError::Decode(_)));
    }
}

#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared DTOs for the Trackdeck renderer bridge.
//!
//! The desktop shell exposes its backend as `window.api.*`. Every call resolves
//! to a JSON object carrying a `success` flag next to its payload; the types in
//! this crate describe those payloads and [`decode_envelope`] turns a raw
//! response into either the payload or a rejection message.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fallback text used when the bridge rejects a call without explaining why.
pub const UNKNOWN_FAILURE: &str = "Unknown error";

/// Marketplace listing entry as returned by `trackerMarketplace.getTrackerList`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    /// Marketplace identifier, unique within a listing.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description; parenthesized segments double as categories.
    #[serde(default)]
    pub description: String,
    /// Dotted numeric version string.
    #[serde(default)]
    pub version: String,
    /// Publisher name.
    #[serde(default)]
    pub developer: String,
    /// Optional icon location resolved by the shell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    /// Publisher has been verified.
    #[serde(default)]
    pub verified: bool,
    /// Promoted to the featured carousel.
    #[serde(default)]
    pub featured: bool,
}

/// Installed tracker instance as returned by `apps.getAppTrackers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppTracker {
    /// Backend identifier of the installed instance.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description copied from the marketplace entry.
    #[serde(default)]
    pub description: String,
    /// Installed version.
    #[serde(default)]
    pub version: String,
    /// Icon hint supplied by the backend.
    #[serde(default)]
    pub icon: String,
    /// Whether the tracker is currently running.
    #[serde(default)]
    pub enabled: bool,
    /// A newer version is available.
    #[serde(default)]
    pub has_update: bool,
    /// Install location on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// User-selected icon override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_icon_path: Option<String>,
}

impl AppTracker {
    /// Marketplace id this installation was created from.
    ///
    /// Installed apps live in a directory named after the marketplace id, so the
    /// last path segment is authoritative; the backend id is only a fallback.
    #[must_use]
    pub fn marketplace_id(&self) -> &str {
        self.path
            .as_deref()
            .and_then(|path| {
                path.trim_end_matches(['/', '\\'])
                    .rsplit(['/', '\\'])
                    .next()
                    .filter(|segment| !segment.is_empty())
            })
            .unwrap_or(&self.id)
    }
}

/// Aggregate document statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentStats {
    /// Number of indexed documents.
    #[serde(default)]
    pub count: u64,
    /// Non-fatal problem reported alongside the count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload of `apps.getDocumentCount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentCountReply {
    /// Document statistics.
    pub stats: DocumentStats,
}

/// Payload of `apps.getAppTrackers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppTrackersReply {
    /// Installed trackers.
    #[serde(default)]
    pub app_trackers: Vec<AppTracker>,
}

/// Payload of `apps.toggleAppTracker` and `apps.updateAppTracker`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppTrackerReply {
    /// Tracker state after the operation.
    pub app_tracker: AppTracker,
}

/// Payload of calls that only report an optional message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageReply {
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Payload of `apps.getAppIconPath`; the shell answers with a bare path or an envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IconPathReply {
    /// Bare path string.
    Bare(String),
    /// Envelope carrying the path.
    Wrapped {
        /// Resolved icon location.
        #[serde(rename = "iconPath")]
        icon_path: String,
    },
}

impl IconPathReply {
    /// Resolved icon path.
    #[must_use]
    pub fn into_path(self) -> String {
        match self {
            Self::Bare(path) | Self::Wrapped { icon_path: path } => path,
        }
    }
}

/// Payload of `trackerMarketplace.getTrackerList`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerListReply {
    /// Marketplace listing.
    #[serde(default)]
    pub trackers: Vec<Tracker>,
}

/// Chat participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sender {
    /// Participant identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: String,
    /// Presence flag, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
}

/// Kind of chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text.
    Text,
    /// Image message.
    Image,
    /// File share.
    File,
    /// System notice.
    System,
    /// Anything the renderer does not know about.
    #[serde(other)]
    Other,
}

/// Delivery progress of an outgoing message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Queued locally.
    Sending,
    /// Accepted by the server.
    Sent,
    /// Delivered to the recipient.
    Delivered,
    /// Read by the recipient.
    Read,
    /// Delivery failed.
    Failed,
}

/// Attachment media class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Still image, rendered inline.
    Image,
    /// Video clip.
    Video,
    /// Audio clip.
    Audio,
    /// Office or text document.
    Document,
    /// Anything else.
    #[serde(other)]
    Other,
}

/// File attached to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment identifier.
    pub id: String,
    /// Media class.
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    /// Download location.
    pub url: String,
    /// Original file name.
    pub filename: String,
    /// Size in bytes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME type, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Preview image location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Pixel width for images and video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height for images and video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Playback length in seconds for audio and video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Chat history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Author.
    pub sender: Sender,
    /// Body text.
    #[serde(default)]
    pub text: String,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// Message class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    /// Delivery progress for outgoing messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<DeliveryStatus>,
    /// Attached files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Identifier of the message this one answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Inline thread replies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Message>,
    /// Reply count when the thread is not inlined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u32>,
    /// Opaque extension data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Failure decoding a bridge response.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The backend answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The payload did not match the expected shape.
    #[error("malformed bridge response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a raw bridge response into its payload.
///
/// A missing `success` flag counts as success unless an `error` string is
/// present, which covers calls that answer with a bare value.
///
/// # Errors
///
/// Returns [`EnvelopeError::Rejected`] when the backend reports failure and
/// [`EnvelopeError::Decode`] when the JSON does not match `T`.
pub fn decode_envelope<T: DeserializeOwned>(raw: &str) -> Result<T, EnvelopeError> {
    let value: Value = serde_json::from_str(raw)?;
    decode_value(value)
}

/// Same as [`decode_envelope`] for an already parsed value.
///
/// # Errors
///
/// See [`decode_envelope`].
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, EnvelopeError> {
    if let Some(message) = rejection(&value) {
        return Err(EnvelopeError::Rejected(message));
    }
    Ok(serde_json::from_value(value)?)
}

fn rejection(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    let error = object.get("error").and_then(Value::as_str);
    let success = object
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(error.is_none());
    if success {
        return None;
    }
    let message = error
        .or_else(|| object.get("message").and_then(Value::as_str))
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(UNKNOWN_FAILURE);
    Some(message.to_string())
}

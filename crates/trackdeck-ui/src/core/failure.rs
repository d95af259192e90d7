//! Coarse failure taxonomy used to pick user-facing wording.
//!
//! Classification is advisory: every failure is handled the same way (one
//! notification, no retry); the kind only selects the message.

/// Failure classes surfaced to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network or IPC connectivity problem.
    Connection,
    /// The target no longer exists.
    NotFound,
    /// The target exists but could not be configured.
    Configuration,
    /// Local input was missing or malformed.
    Validation,
    /// Anything else.
    Generic,
}

const CONNECTION_MARKERS: &[&str] = &[
    "network",
    "connect",
    "econnrefused",
    "timeout",
    "timed out",
    "offline",
    "fetch",
];
const NOT_FOUND_MARKERS: &[&str] = &["not found", "404", "enoent", "no such"];
const CONFIGURATION_MARKERS: &[&str] = &["config", "manifest", "invalid setting"];

impl FailureKind {
    /// Classify a backend error message by substring match.
    ///
    /// Never yields [`FailureKind::Validation`]; that kind is raised locally.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let contains_any = |markers: &[&str]| markers.iter().any(|marker| lower.contains(marker));
        if contains_any(CONNECTION_MARKERS) {
            Self::Connection
        } else if contains_any(NOT_FOUND_MARKERS) {
            Self::NotFound
        } else if contains_any(CONFIGURATION_MARKERS) {
            Self::Configuration
        } else {
            Self::Generic
        }
    }

    /// Short title used for notifications.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Connection => "Connection failed",
            Self::NotFound => "Not found",
            Self::Configuration => "Configuration issue",
            Self::Validation => "Invalid request",
            Self::Generic => "Something went wrong",
        }
    }
}

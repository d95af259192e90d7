//! Stored overrides for renderer tunables.

use crate::core::config::{ConfigOverrides, UiConfig};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};

const REFRESH_INTERVAL_KEY: &str = "trackdeck.refresh_interval_ms";
const TOAST_DURATION_KEY: &str = "trackdeck.toast_duration_ms";
const SEARCH_DEBOUNCE_KEY: &str = "trackdeck.search_debounce_ms";
const CURRENT_USER_KEY: &str = "trackdeck.user_id";

const DEFAULT_USER_ID: &str = "me";

// Values are stored as plain text so they can be edited from devtools.
fn read_raw(key: &str) -> Option<String> {
    match LocalStorage::raw().get_item(key) {
        Ok(value) => value,
        Err(err) => {
            console::error!(format!("failed to read {key}"), err);
            None
        }
    }
}

pub(crate) fn load_config() -> UiConfig {
    UiConfig::with_overrides(&ConfigOverrides {
        refresh_interval_ms: read_raw(REFRESH_INTERVAL_KEY),
        toast_duration_ms: read_raw(TOAST_DURATION_KEY),
        search_debounce_ms: read_raw(SEARCH_DEBOUNCE_KEY),
    })
}

pub(crate) fn current_user_id() -> String {
    read_raw(CURRENT_USER_KEY)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

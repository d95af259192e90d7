//! Renderer tunables and override parsing.
//!
//! # Design
//! - Defaults match the desktop shell's expectations; overrides are optional.
//! - Parsing is DOM-free so it can be tested natively; storage access lives in
//!   the wasm-only preferences module.

/// Default polling cadence for the app panel.
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 3_000;
/// Lower bound for user-supplied refresh intervals.
pub const MIN_REFRESH_INTERVAL_MS: u32 = 1_000;
/// Distance from the bottom (in px) that still counts as "at the bottom".
pub const DEFAULT_AUTO_SCROLL_THRESHOLD_PX: u32 = 20;
/// Default toast lifetime.
pub const DEFAULT_TOAST_DURATION_MS: u32 = 4_000;
/// Default debounce applied to search inputs.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 250;

/// Runtime tunables for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// App panel polling cadence in milliseconds.
    pub refresh_interval_ms: u32,
    /// Auto-scroll threshold for the chat list in pixels.
    pub auto_scroll_threshold_px: u32,
    /// Toast lifetime in milliseconds.
    pub toast_duration_ms: u32,
    /// Search input debounce in milliseconds.
    pub search_debounce_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            auto_scroll_threshold_px: DEFAULT_AUTO_SCROLL_THRESHOLD_PX,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

/// Raw override values read from storage; `None` keeps the default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Refresh interval override.
    pub refresh_interval_ms: Option<String>,
    /// Toast duration override.
    pub toast_duration_ms: Option<String>,
    /// Search debounce override.
    pub search_debounce_ms: Option<String>,
}

impl UiConfig {
    /// Apply raw overrides; invalid values keep the default.
    #[must_use]
    pub fn with_overrides(overrides: &ConfigOverrides) -> Self {
        let defaults = Self::default();
        Self {
            refresh_interval_ms: parse_millis(overrides.refresh_interval_ms.as_deref())
                .map_or(defaults.refresh_interval_ms, |value| {
                    value.max(MIN_REFRESH_INTERVAL_MS)
                }),
            auto_scroll_threshold_px: defaults.auto_scroll_threshold_px,
            toast_duration_ms: parse_millis(overrides.toast_duration_ms.as_deref())
                .unwrap_or(defaults.toast_duration_ms),
            search_debounce_ms: parse_millis(overrides.search_debounce_ms.as_deref())
                .unwrap_or(defaults.search_debounce_ms),
        }
    }
}

fn parse_millis(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<u32>().ok())
}

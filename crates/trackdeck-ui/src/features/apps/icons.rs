//! Icon selection for installed trackers.

/// What to render as a tracker's icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppIcon {
    /// Image resolved by the shell.
    Path(String),
    /// Built-in glyph chosen from the tracker name.
    Glyph(&'static str),
}

const NAMED_GLYPHS: &[(&str, &str)] = &[
    ("browser", "🌐"),
    ("calendar", "📅"),
    ("chat", "💬"),
    ("code", "💻"),
    ("document", "📄"),
    ("email", "✉️"),
    ("mail", "✉️"),
    ("focus", "🎯"),
    ("music", "🎵"),
    ("note", "📝"),
    ("spotify", "🎵"),
    ("task", "✅"),
    ("time", "⏱️"),
    ("video", "🎬"),
];
const FALLBACK_GLYPH: &str = "📦";

/// Name-keyed default icon.
#[must_use]
pub fn default_icon(name: &str) -> AppIcon {
    let lower = name.to_lowercase();
    let glyph = NAMED_GLYPHS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(FALLBACK_GLYPH, |(_, glyph)| *glyph);
    AppIcon::Glyph(glyph)
}

/// Pick the icon from a resolution attempt, the custom override, then the default.
#[must_use]
pub fn choose_icon(resolved: Option<String>, custom: Option<&str>, name: &str) -> AppIcon {
    resolved
        .filter(|path| !path.trim().is_empty())
        .or_else(|| custom.filter(|path| !path.trim().is_empty()).map(str::to_string))
        .map_or_else(|| default_icon(name), AppIcon::Path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_icon_matches_name_keywords() {
        assert_eq!(default_icon("Focus Timer"), AppIcon::Glyph("🎯"));
        assert_eq!(default_icon("MAIL watch"), AppIcon::Glyph("✉️"));
        assert_eq!(default_icon("Unknown"), AppIcon::Glyph(FALLBACK_GLYPH));
    }

    #[test]
    fn resolution_order_is_resolved_custom_default() {
        assert_eq!(
            choose_icon(Some("/r.png".into()), Some("/c.png"), "x"),
            AppIcon::Path("/r.png".into())
        );
        assert_eq!(
            choose_icon(None, Some("/c.png"), "x"),
            AppIcon::Path("/c.png".into())
        );
        assert_eq!(
            choose_icon(Some(" ".into()), None, "Notes"),
            AppIcon::Glyph("📝")
        );
    }
}

//! Compose box key handling and send gating.

/// What a keydown in the compose box means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    /// Send and suppress the newline.
    Send,
    /// Let the browser handle it.
    Default,
}

impl KeyIntent {
    /// Classify a keydown.
    ///
    /// Enter sends unless Shift is held or an IME composition is active.
    #[must_use]
    pub fn from_key(key: &str, shift: bool, composing: bool) -> Self {
        if key == "Enter" && !shift && !composing {
            Self::Send
        } else {
            Self::Default
        }
    }
}

/// Text to emit for a send action; whitespace-only input emits nothing.
///
/// The text is passed through untrimmed. Clearing the box is the caller's job.
#[must_use]
pub fn send_text(draft: &str) -> Option<&str> {
    if draft.trim().is_empty() {
        None
    } else {
        Some(draft)
    }
}

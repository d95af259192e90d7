//! Stick-to-bottom policy for the message list.

use crate::core::config::DEFAULT_AUTO_SCROLL_THRESHOLD_PX;

/// Scroll geometry read from the list element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// `scrollTop`.
    pub scroll_top: f64,
    /// `scrollHeight`.
    pub scroll_height: f64,
    /// `clientHeight`.
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Pixels between the viewport bottom and the content bottom.
    #[must_use]
    pub fn distance_from_bottom(self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// What the view should do after the message list changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirective {
    /// Jump to the newest message.
    ScrollToBottom,
    /// Leave the viewport where the user put it.
    Hold,
}

/// Tracks whether the list should follow new messages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoScroll {
    threshold_px: f64,
    should_auto_scroll: bool,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_SCROLL_THRESHOLD_PX)
    }
}

impl AutoScroll {
    /// Follow the bottom while within `threshold_px` of it.
    #[must_use]
    pub fn new(threshold_px: u32) -> Self {
        Self {
            threshold_px: f64::from(threshold_px),
            should_auto_scroll: true,
        }
    }

    /// Recompute from a scroll event.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.should_auto_scroll = metrics.distance_from_bottom() <= self.threshold_px;
    }

    /// Decide what to do after the message list changed.
    #[must_use]
    pub const fn on_messages_changed(&self) -> ScrollDirective {
        if self.should_auto_scroll {
            ScrollDirective::ScrollToBottom
        } else {
            ScrollDirective::Hold
        }
    }

    /// The user sent something; the next render lands at the bottom.
    pub const fn on_send(&mut self) {
        self.should_auto_scroll = true;
    }

    /// Whether the list follows new messages.
    #[must_use]
    pub const fn should_auto_scroll(&self) -> bool {
        self.should_auto_scroll
    }

    /// Whether to show the "new messages" affordance.
    #[must_use]
    pub const fn show_jump_to_latest(&self) -> bool {
        !self.should_auto_scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_distance(distance: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 1_000.0 - 400.0 - distance,
            scroll_height: 1_000.0,
            client_height: 400.0,
        }
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut scroll = AutoScroll::default();
        scroll.on_scroll(at_distance(20.0));
        assert!(scroll.should_auto_scroll());
        assert!(!scroll.show_jump_to_latest());

        scroll.on_scroll(at_distance(21.0));
        assert!(!scroll.should_auto_scroll());
        assert!(scroll.show_jump_to_latest());
    }

    #[test]
    fn new_messages_only_scroll_when_following() {
        let mut scroll = AutoScroll::default();
        assert_eq!(scroll.on_messages_changed(), ScrollDirective::ScrollToBottom);
        scroll.on_scroll(at_distance(300.0));
        assert_eq!(scroll.on_messages_changed(), ScrollDirective::Hold);
    }

    #[test]
    fn sending_resumes_following() {
        let mut scroll = AutoScroll::new(20);
        scroll.on_scroll(at_distance(500.0));
        scroll.on_send();
        assert_eq!(scroll.on_messages_changed(), ScrollDirective::ScrollToBottom);
    }
}

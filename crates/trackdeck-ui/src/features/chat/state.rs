//! Chat list controller: scroll following, send intents, message menus.

use crate::core::dropdown::{ClickOrigin, DropdownState};
use crate::features::chat::compose::{KeyIntent, send_text};
use crate::features::chat::scroll::{AutoScroll, ScrollDirective, ScrollMetrics};
use std::rc::Rc;
use tracing::debug;
use trackdeck_bridge_models::Message;

/// Per-instance chat list state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatList {
    scroll: AutoScroll,
    menu: DropdownState,
    rendered: Option<Rc<Vec<Message>>>,
}

/// Result of a compose keydown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Suppress the browser default (the newline).
    pub prevent_default: bool,
    /// Text to emit as a send event.
    pub send: Option<String>,
}

impl ChatList {
    /// Controller with a custom auto-scroll threshold.
    #[must_use]
    pub fn with_threshold(threshold_px: u32) -> Self {
        Self {
            scroll: AutoScroll::new(threshold_px),
            ..Self::default()
        }
    }

    /// Feed a scroll event.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.scroll.on_scroll(metrics);
    }

    /// Feed the rendered message list; returns what to do with the viewport.
    ///
    /// Any content change counts, including edits, replies and attachments
    /// that leave the message count unchanged.
    pub fn on_render(&mut self, messages: &Rc<Vec<Message>>) -> ScrollDirective {
        if self
            .rendered
            .as_ref()
            .is_some_and(|last| Rc::ptr_eq(last, messages) || last == messages)
        {
            return ScrollDirective::Hold;
        }
        self.rendered = Some(Rc::clone(messages));
        let directive = self.scroll.on_messages_changed();
        debug!(message_count = messages.len(), ?directive, "chat list changed");
        directive
    }

    /// Send the draft if it has content; forces the next render to the bottom.
    pub fn send(&mut self, draft: &str) -> Option<String> {
        let text = send_text(draft)?.to_string();
        self.scroll.on_send();
        Some(text)
    }

    /// Handle a compose keydown.
    pub fn on_key(&mut self, key: &str, shift: bool, composing: bool, draft: &str) -> KeyOutcome {
        match KeyIntent::from_key(key, shift, composing) {
            KeyIntent::Send => KeyOutcome {
                prevent_default: true,
                send: self.send(draft),
            },
            KeyIntent::Default => KeyOutcome {
                prevent_default: false,
                send: None,
            },
        }
    }

    /// Whether to show the "new messages" affordance.
    #[must_use]
    pub const fn show_jump_to_latest(&self) -> bool {
        self.scroll.show_jump_to_latest()
    }

    /// The user asked to jump to the newest message.
    pub const fn jump_to_latest(&mut self) {
        self.scroll.on_send();
    }

    /// Toggle a message's action menu.
    pub fn toggle_menu(&mut self, message_id: &str) {
        self.menu.toggle(message_id);
    }

    /// Close the open menu after an action ran.
    pub fn close_menu(&mut self) -> bool {
        self.menu.close()
    }

    /// Whether `message_id`'s menu is open.
    #[must_use]
    pub fn is_menu_open(&self, message_id: &str) -> bool {
        self.menu.is_open(message_id)
    }

    /// Feed a document click; returns whether a menu closed.
    pub fn handle_click(&mut self, origin: &ClickOrigin) -> bool {
        self.menu.handle_click(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::message;

    const AWAY: ScrollMetrics = ScrollMetrics {
        scroll_top: 0.0,
        scroll_height: 2_000.0,
        client_height: 500.0,
    };

    fn list(texts: &[&str]) -> Rc<Vec<Message>> {
        Rc::new(
            texts
                .iter()
                .enumerate()
                .map(|(index, text)| message(&format!("m{index}"), text))
                .collect(),
        )
    }

    #[test]
    fn new_messages_hold_while_reading_history() {
        let mut chat = ChatList::default();
        assert_eq!(chat.on_render(&list(&["a", "b", "c"])), ScrollDirective::ScrollToBottom);
        chat.on_scroll(AWAY);
        assert_eq!(chat.on_render(&list(&["a", "b", "c", "d"])), ScrollDirective::Hold);
        assert!(chat.show_jump_to_latest());
    }

    #[test]
    fn rerender_of_same_list_does_not_scroll() {
        let mut chat = ChatList::default();
        let messages = list(&["a", "b"]);
        chat.on_render(&messages);
        assert_eq!(chat.on_render(&messages), ScrollDirective::Hold);
        assert_eq!(chat.on_render(&list(&["a", "b"])), ScrollDirective::Hold);
    }

    #[test]
    fn same_length_mutations_keep_following_the_bottom() {
        let mut chat = ChatList::default();
        let messages = list(&["a", "b", "c"]);
        assert_eq!(chat.on_render(&messages), ScrollDirective::ScrollToBottom);

        let mut replied = (*messages).clone();
        replied[1].replies.push(message("r1", "thread reply"));
        replied[1].reply_count = Some(1);
        assert_eq!(chat.on_render(&Rc::new(replied.clone())), ScrollDirective::ScrollToBottom);

        replied[2].text = "c (edited)".to_string();
        assert_eq!(chat.on_render(&Rc::new(replied)), ScrollDirective::ScrollToBottom);
    }

    #[test]
    fn enter_sends_draft_and_sticks_to_bottom() {
        let mut chat = ChatList::default();
        chat.on_render(&list(&["a"]));
        chat.on_scroll(AWAY);

        let outcome = chat.on_key("Enter", false, false, "hello");

        assert!(outcome.prevent_default);
        assert_eq!(outcome.send.as_deref(), Some("hello"));
        assert_eq!(chat.on_render(&list(&["a", "hello"])), ScrollDirective::ScrollToBottom);
    }

    #[test]
    fn enter_on_blank_draft_suppresses_newline_only() {
        let mut chat = ChatList::default();
        let outcome = chat.on_key("Enter", false, false, "   ");
        assert!(outcome.prevent_default);
        assert_eq!(outcome.send, None);
        let shifted = chat.on_key("Enter", true, false, "line");
        assert!(!shifted.prevent_default);
        assert_eq!(shifted.send, None);
    }

    #[test]
    fn message_menus_are_exclusive() {
        let mut chat = ChatList::with_threshold(20);
        chat.toggle_menu("m1");
        chat.toggle_menu("m2");
        assert!(!chat.is_menu_open("m1"));
        assert!(chat.is_menu_open("m2"));
        assert!(!chat.handle_click(&ClickOrigin::Menu("m2".into())));
        assert!(chat.handle_click(&ClickOrigin::Elsewhere));
        assert!(!chat.is_menu_open("m2"));
    }
}

//! Document-level click listener feeding the outside-click hub.

use crate::core::click_hub::{self, ClickHub};
use crate::core::dropdown::ClickOrigin;
use gloo::events::EventListener;
use gloo::utils::document;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

/// Attribute that marks a menu's boundary.
const MENU_ATTR: &str = "data-menu-id";

thread_local! {
    static LISTENER: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

/// Shared hub, with the document listener installed on first use.
pub(crate) fn hub() -> ClickHub {
    LISTENER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            let hub = click_hub::global();
            *slot = Some(EventListener::new(&document(), "click", move |event| {
                hub.dispatch(&origin_of(event));
            }));
        }
    });
    click_hub::global()
}

fn origin_of(event: &Event) -> ClickOrigin {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(&format!("[{MENU_ATTR}]")).ok().flatten())
        .and_then(|menu| menu.get_attribute(MENU_ATTR))
        .map_or(ClickOrigin::Elsewhere, ClickOrigin::Menu)
}

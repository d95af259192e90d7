//! Process-wide fan-out for document clicks.
//!
//! # Design
//! - One hub per thread; the wasm shell installs exactly one document listener
//!   that feeds it, no matter how many list views are mounted.
//! - Views subscribe on mount and hold a [`ClickSubscription`]; dropping the
//!   guard on teardown unsubscribes.

use crate::core::dropdown::ClickOrigin;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler = Rc<dyn Fn(&ClickOrigin)>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Subscriber registry for outside-click detection.
#[derive(Clone, Default)]
pub struct ClickHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ClickHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays active until the returned guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, handler: impl Fn(&ClickOrigin) + 'static) -> ClickSubscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.handlers.push((id, Rc::new(handler)));
        ClickSubscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver a click to every subscriber.
    ///
    /// Handlers run against a snapshot, so they may subscribe or unsubscribe
    /// while being called.
    pub fn dispatch(&self, origin: &ClickOrigin) {
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler(origin);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

/// Guard that keeps a hub subscription alive.
pub struct ClickSubscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl Drop for ClickSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

thread_local! {
    static GLOBAL_HUB: ClickHub = ClickHub::new();
}

/// Handle to the thread's shared hub.
#[must_use]
pub fn global() -> ClickHub {
    GLOBAL_HUB.with(ClickHub::clone)
}

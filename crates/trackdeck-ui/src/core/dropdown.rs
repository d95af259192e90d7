//! Contextual menu exclusivity.
//!
//! At most one menu per list view is open at a time. Clicks reaching the
//! document close it unless they originate from inside that same menu.

/// Where a document-level click landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOrigin {
    /// Inside the menu tagged with this id.
    Menu(String),
    /// Anywhere else.
    Elsewhere,
}

/// Open-menu tracker for one list view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropdownState {
    open: Option<String>,
}

impl DropdownState {
    /// Open `id`, closing any other menu; clicking the open menu's trigger closes it.
    pub fn toggle(&mut self, id: &str) {
        if self.is_open(id) {
            self.open = None;
        } else {
            self.open = Some(id.to_string());
        }
    }

    /// Open `id`, replacing whatever was open.
    pub fn open(&mut self, id: &str) {
        self.open = Some(id.to_string());
    }

    /// Close the open menu; returns whether one was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Whether `id` is the open menu.
    #[must_use]
    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    /// Currently open menu id.
    #[must_use]
    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// React to a document click; returns whether the menu closed.
    pub fn handle_click(&mut self, origin: &ClickOrigin) -> bool {
        match origin {
            ClickOrigin::Menu(id) if self.is_open(id) => false,
            _ => self.close(),
        }
    }
}

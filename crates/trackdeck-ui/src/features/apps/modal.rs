//! Configure-modal hand-off.
//!
//! Re-targeting the modal always passes through a closed state: `request`
//! clears the current target and bumps the epoch, `settle` opens the pending
//! one. Views key the modal on the epoch so nothing from the previous row
//! survives the switch.

/// Two-phase modal target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalHandoff {
    open: Option<String>,
    pending: Option<String>,
    epoch: u64,
}

impl ModalHandoff {
    /// Close whatever is open and queue `id`.
    pub fn request(&mut self, id: &str) {
        self.open = None;
        self.pending = Some(id.to_string());
        self.epoch += 1;
    }

    /// Open the queued target; returns whether anything changed.
    pub fn settle(&mut self) -> bool {
        match self.pending.take() {
            Some(id) => {
                self.open = Some(id);
                true
            }
            None => false,
        }
    }

    /// Close and forget any queued target.
    pub fn close(&mut self) {
        self.open = None;
        self.pending = None;
    }

    /// Id the modal is showing.
    #[must_use]
    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Whether a target is waiting for `settle`.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Render key for the modal body.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }
}

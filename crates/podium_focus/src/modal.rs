//! Modal focus trap
//!
//! While a modal dialog is open, Tab must cycle through the dialog's own
//! focusables and never reach the page behind it. The trap remembers the
//! node that held focus when the modal opened and hands it back on an
//! orderly close. A close forced by a section change skips the restore;
//! the pool resync that follows clears focus anyway.

use smallvec::SmallVec;
use tracing::debug;

/// Tab-cycle state for an open modal dialog.
#[derive(Debug, Default)]
pub struct ModalTrap {
    focusables: SmallVec<[u64; 8]>,
    saved: Option<u64>,
    active: bool,
}

impl ModalTrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Arms the trap, capturing the node to restore focus to on close.
    pub fn open(&mut self, focusables: &[u64], previously_focused: Option<u64>) {
        self.focusables.clear();
        self.focusables.extend_from_slice(focusables);
        self.saved = previously_focused;
        self.active = true;
        debug!(focusables = self.focusables.len(), "modal trap armed");
    }

    /// Disarms the trap, returning the node that should regain focus.
    pub fn close(&mut self) -> Option<u64> {
        self.active = false;
        self.focusables.clear();
        self.saved.take()
    }

    /// Disarms without a focus restore.
    pub fn force_close(&mut self) {
        self.active = false;
        self.focusables.clear();
        self.saved = None;
    }

    /// Next node in the cycle. Focus outside the modal, or past either
    /// end, wraps to the opposite edge.
    pub fn cycle(&self, current: Option<u64>, backward: bool) -> Option<u64> {
        if self.focusables.is_empty() {
            return None;
        }
        let first = self.focusables[0];
        let last = *self.focusables.last().unwrap();
        let pos = current.and_then(|node| self.focusables.iter().position(|&n| n == node));
        let next = match (pos, backward) {
            (None, false) => first,
            (None, true) => last,
            (Some(p), false) => {
                if p + 1 == self.focusables.len() {
                    first
                } else {
                    self.focusables[p + 1]
                }
            }
            (Some(p), true) => {
                if p == 0 {
                    last
                } else {
                    self.focusables[p - 1]
                }
            }
        };
        Some(next)
    }
}

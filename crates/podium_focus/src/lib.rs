//! Keyboard focus subsystem
//!
//! Sectioned surfaces break the browser-style "one document, one tab order"
//! model: only the current panel's content may be reachable with Tab, and
//! some panels have their own traversal rules (expandable cards, modal
//! dialogs). This crate owns that policy:
//!
//! - [`FocusPool`]: the ordered tab ring of one panel; exactly one pool is
//!   enabled at a time.
//! - [`CardRail`]: expandable cards with the single-open invariant and the
//!   close-on-exit Tab rule.
//! - [`ModalTrap`]: wrap-around Tab cycling while a modal is open, with
//!   focus restore on close.
//! - [`FocusSystem`]: composes the above behind one `handle_key` entry
//!   point. Tab presses that cross a panel boundary are not resolved here;
//!   they come back as [`FocusOutcome::Advance`] for the caller to turn into
//!   a section navigation.
//!
//! The system is the single writer of focus state. It mirrors the focused
//! node locally and pushes every mutation through [`FocusHost`], so tests
//! and headless embedders never need a real focus implementation.

pub mod cards;
pub mod host;
pub mod modal;
pub mod pool;

pub use cards::{Card, CardRail};
pub use host::{shared_focus, FocusHost, NullFocus, SharedFocus};
pub use modal::ModalTrap;
pub use pool::FocusPool;

use podium_core::events::{KeyCode, Modifiers};
use tracing::{debug, trace};

/// What became of a key press offered to the focus subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Consumed: focus moved or a card/modal state changed.
    Handled,
    /// Tab crossed the active panel's boundary; navigate by this step.
    Advance(isize),
    /// Not a focus concern; later pipeline stages may use the key.
    Ignored,
}

/// Focus policy for one surface.
pub struct FocusSystem {
    host: SharedFocus,
    pools: Vec<FocusPool>,
    rails: Vec<CardRail>,
    modal: ModalTrap,
    active: usize,
    focused: Option<u64>,
}

impl FocusSystem {
    pub fn new(host: SharedFocus) -> Self {
        Self {
            host,
            pools: Vec::new(),
            rails: Vec::new(),
            modal: ModalTrap::new(),
            active: 0,
            focused: None,
        }
    }

    /// Registers a panel's tab ring.
    pub fn with_pool(mut self, pool: FocusPool) -> Self {
        self.pools.push(pool);
        self
    }

    /// Registers a panel's card rail. Card face nodes must also appear in
    /// the panel's pool; internal links must not.
    pub fn with_card_rail(mut self, rail: CardRail) -> Self {
        self.rails.push(rail);
        self
    }

    /// Node currently holding keyboard focus, as mirrored here.
    pub fn focused(&self) -> Option<u64> {
        self.focused
    }

    /// Panel whose pool is currently enabled.
    pub fn active_panel(&self) -> usize {
        self.active
    }

    pub fn modal_active(&self) -> bool {
        self.modal.is_active()
    }

    /// Routes a key press. Only Tab, Enter, Space and Escape are focus
    /// concerns; everything else is reported back untouched.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: Modifiers) -> FocusOutcome {
        if self.modal.is_active() {
            if key == KeyCode::TAB {
                if let Some(next) = self.modal.cycle(self.focused, modifiers.shift()) {
                    self.focus_node(next);
                }
                return FocusOutcome::Handled;
            }
            return FocusOutcome::Ignored;
        }
        match key {
            KeyCode::TAB => self.handle_tab(modifiers.shift()),
            KeyCode::ENTER | KeyCode::SPACE => self.toggle_focused_card(),
            KeyCode::ESCAPE => self.escape_open_card(),
            _ => FocusOutcome::Ignored,
        }
    }

    /// Re-aims the subsystem at a new current panel: force-closes any open
    /// modal, closes cards left open elsewhere, enables exactly the new
    /// panel's pool, and clears focus.
    pub fn on_section_change(&mut self, current: usize) {
        if self.modal.is_active() {
            self.modal.force_close();
            debug!("modal force-closed by section change");
        }
        for rail_idx in 0..self.rails.len() {
            if self.rails[rail_idx].panel() != current {
                if let Some(open) = self.rails[rail_idx].open_index() {
                    self.close_card(rail_idx, open);
                }
            }
        }
        self.active = current;
        {
            let mut host = self.host.lock().unwrap();
            for pool in &self.pools {
                let enabled = pool.panel() == current;
                for &node in pool.nodes() {
                    host.set_focusable(node, enabled);
                }
            }
            host.blur();
        }
        self.focused = None;
        trace!(panel = current, "focus pools resynced");
    }

    /// Arms the trap around a modal's focusables and moves focus inside.
    pub fn open_modal(&mut self, focusables: &[u64]) {
        self.modal.open(focusables, self.focused);
        if let Some(&first) = focusables.first() {
            self.focus_node(first);
        }
    }

    /// Disarms the trap and hands focus back to where it was.
    pub fn close_modal(&mut self) {
        if let Some(saved) = self.modal.close() {
            self.focus_node(saved);
        } else {
            self.host.lock().unwrap().blur();
            self.focused = None;
        }
    }

    fn handle_tab(&mut self, backward: bool) -> FocusOutcome {
        let ring = self.ring();
        if ring.is_empty() {
            return FocusOutcome::Ignored;
        }
        if !backward {
            if let Some(outcome) = self.tab_out_of_open_card() {
                return outcome;
            }
        }
        let edge = if backward { *ring.last().unwrap() } else { ring[0] };
        let Some(focused) = self.focused else {
            self.focus_node(edge);
            return FocusOutcome::Handled;
        };
        let Some(pos) = ring.iter().position(|&n| n == focused) else {
            // Focus drifted off the ring; pull it back to the edge.
            self.focus_node(edge);
            return FocusOutcome::Handled;
        };
        if !backward && pos + 1 == ring.len() {
            return FocusOutcome::Advance(1);
        }
        if backward && pos == 0 {
            return FocusOutcome::Advance(-1);
        }
        let next = if backward { ring[pos - 1] } else { ring[pos + 1] };
        self.focus_node(next);
        FocusOutcome::Handled
    }

    /// Forward Tab on the open card's last internal link closes the card and
    /// continues at the next card face, or leaves the panel when the open
    /// card was the last one.
    fn tab_out_of_open_card(&mut self) -> Option<FocusOutcome> {
        let focused = self.focused?;
        let rail_idx = self.rail_for(self.active)?;
        let open = self.rails[rail_idx].open_index()?;
        let last_link = *self.rails[rail_idx].cards()[open].links.last()?;
        if focused != last_link {
            return None;
        }
        self.close_card(rail_idx, open);
        match self.rails[rail_idx].cards().get(open + 1) {
            Some(card) => {
                let face = card.node;
                self.focus_node(face);
                Some(FocusOutcome::Handled)
            }
            None => Some(FocusOutcome::Advance(1)),
        }
    }

    fn toggle_focused_card(&mut self) -> FocusOutcome {
        let Some(focused) = self.focused else {
            return FocusOutcome::Ignored;
        };
        let Some(rail_idx) = self.rail_for(self.active) else {
            return FocusOutcome::Ignored;
        };
        let Some(card_idx) = self.rails[rail_idx].card_position(focused) else {
            return FocusOutcome::Ignored;
        };
        if self.rails[rail_idx].open_index() == Some(card_idx) {
            self.close_card(rail_idx, card_idx);
        } else {
            self.open_card(rail_idx, card_idx);
        }
        FocusOutcome::Handled
    }

    /// Escape on an open card's face closes it; focus stays on the face.
    fn escape_open_card(&mut self) -> FocusOutcome {
        let Some(rail_idx) = self.rail_for(self.active) else {
            return FocusOutcome::Ignored;
        };
        let Some(open) = self.rails[rail_idx].open_index() else {
            return FocusOutcome::Ignored;
        };
        let face = self.rails[rail_idx].cards()[open].node;
        if self.focused != Some(face) {
            return FocusOutcome::Ignored;
        }
        self.close_card(rail_idx, open);
        self.focus_node(face);
        FocusOutcome::Handled
    }

    /// Active panel's tab ring, with the open card's links spliced in after
    /// their card face.
    fn ring(&self) -> Vec<u64> {
        let Some(pool) = self.pools.iter().find(|p| p.panel() == self.active) else {
            return Vec::new();
        };
        let open = self.rail_for(self.active).and_then(|idx| {
            let rail = &self.rails[idx];
            rail.open_index().map(|open| &rail.cards()[open])
        });
        let mut ring = Vec::with_capacity(pool.nodes().len() + open.map_or(0, |c| c.links.len()));
        for &node in pool.nodes() {
            ring.push(node);
            if let Some(card) = open {
                if card.node == node {
                    ring.extend_from_slice(&card.links);
                }
            }
        }
        ring
    }

    fn rail_for(&self, panel: usize) -> Option<usize> {
        self.rails.iter().position(|r| r.panel() == panel)
    }

    fn open_card(&mut self, rail_idx: usize, card_idx: usize) {
        let displaced = self.rails[rail_idx].set_open(card_idx);
        let mut host = self.host.lock().unwrap();
        if let Some(prev) = displaced {
            for &link in &self.rails[rail_idx].cards()[prev].links {
                host.set_focusable(link, false);
            }
        }
        for &link in &self.rails[rail_idx].cards()[card_idx].links {
            host.set_focusable(link, true);
        }
        trace!(card = card_idx, "card opened");
    }

    fn close_card(&mut self, rail_idx: usize, card_idx: usize) {
        {
            let mut host = self.host.lock().unwrap();
            for &link in &self.rails[rail_idx].cards()[card_idx].links {
                host.set_focusable(link, false);
            }
        }
        self.rails[rail_idx].clear_open();
        trace!(card = card_idx, "card closed");
    }

    fn focus_node(&mut self, node: u64) {
        self.host.lock().unwrap().focus(node);
        self.focused = Some(node);
    }
}

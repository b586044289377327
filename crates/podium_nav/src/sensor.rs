//! Visibility sensor
//!
//! Watches the scroll offset and reports which panel dominates the viewport.
//! A panel dominates once its visible ratio crosses the dominance threshold;
//! with full-viewport panels at most one panel can dominate at a time.
//!
//! The sensor never writes navigation state. It reports crossings (deduped,
//! so holding still on a panel reports nothing) and the machine decides via
//! [`crate::machine::NavigationMachine::reconcile`] whether to accept.

use tracing::trace;

use podium_core::{PanelDeck, SurfaceTuning};

pub struct VisibilitySensor {
    dominance: f32,
    last_report: Option<usize>,
}

impl VisibilitySensor {
    pub fn new(tuning: &SurfaceTuning) -> Self {
        Self {
            dominance: tuning.dominance_ratio,
            last_report: None,
        }
    }

    /// Sample the current offset. Returns the dominant panel index when it
    /// differs from the previous report.
    pub fn observe(&mut self, deck: &PanelDeck, offset: f32, viewport_height: f32) -> Option<usize> {
        let dominant = deck
            .iter()
            .find(|p| deck.visible_ratio(p.index, offset, viewport_height) >= self.dominance)
            .map(|p| p.index)?;
        if self.last_report == Some(dominant) {
            return None;
        }
        trace!(dominant, "panel dominance crossed");
        self.last_report = Some(dominant);
        Some(dominant)
    }
}

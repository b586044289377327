//! Exhibit viewer gate
//!
//! The exhibit panel hosts a 3D viewer that can expand out of its panel into
//! a full-bleed overlay. While the viewer is anything other than fully
//! collapsed, a section transition would tear the overlay apart, so every
//! navigation request has to pass through this gate first:
//!
//! - expansion is refused unless the surface has granted full-bleed room
//! - requests arriving while expanded are deferred and an implicit collapse
//!   starts; the request replays when the collapse lands
//! - requests arriving mid-expand or mid-collapse are deferred too (a newer
//!   request replaces an older one); no collapse is triggered from those
//!   phases, the deferred slot simply waits for the next completed collapse
//!
//! The deferred slot holds at most one continuation. It is `take()`n before
//! invocation, so a continuation that itself navigates cannot double-fire.

use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::hosts::SharedExhibit;
use crate::machine::NavigationMachine;
use podium_core::SurfaceTuning;

/// Where the viewer is in its expand/collapse lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewerPhase {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl ViewerPhase {
    pub fn is_transitioning(self) -> bool {
        matches!(self, ViewerPhase::Expanding | ViewerPhase::Collapsing)
    }
}

/// A deferred navigation request, replayed against the machine once the
/// viewer has fully collapsed.
pub type Continuation = Box<dyn FnOnce(&mut NavigationMachine) + Send>;

/// Gatekeeper between section navigation and the exhibit viewer.
pub struct ViewerGate {
    phase: ViewerPhase,
    /// Single deferred-navigation slot. A newer request replaces an older
    /// one; only the latest intent survives.
    after_collapse: Option<Continuation>,
    /// Whether the surface grants the viewer full-bleed room. Re-evaluated
    /// on viewport changes; expansion is refused while false.
    full_bleed_allowed: bool,
    /// Whether the exhibit panel is meaningfully inside the viewport.
    in_view: bool,
    view_ratio: f32,
    collapsed_scale: f32,
    host: SharedExhibit,
}

impl ViewerGate {
    pub fn new(host: SharedExhibit, tuning: &SurfaceTuning) -> Self {
        Self {
            phase: ViewerPhase::Collapsed,
            after_collapse: None,
            full_bleed_allowed: false,
            in_view: false,
            view_ratio: tuning.exhibit_view_ratio,
            collapsed_scale: tuning.collapsed_render_scale,
            host,
        }
    }

    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    pub fn is_expanded(&self) -> bool {
        self.phase == ViewerPhase::Expanded
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase.is_transitioning()
    }

    /// While not collapsed, the viewer captures wheel/touch/key input for
    /// local camera interaction instead of section navigation.
    pub fn wants_local_capture(&self) -> bool {
        self.phase != ViewerPhase::Collapsed
    }

    pub fn has_deferred(&self) -> bool {
        self.after_collapse.is_some()
    }

    /// Grant or revoke full-bleed room. Revoking does not force-collapse an
    /// already expanded viewer; it only blocks the next expansion.
    pub fn set_full_bleed_allowed(&mut self, allowed: bool) {
        if self.full_bleed_allowed != allowed {
            debug!(allowed, "exhibit full-bleed permission");
        }
        self.full_bleed_allowed = allowed;
    }

    pub fn full_bleed_allowed(&self) -> bool {
        self.full_bleed_allowed
    }

    /// Begin expanding. Refused unless collapsed and full-bleed is allowed.
    /// On acceptance the render loop runs at full scale with local controls
    /// held off until the expansion lands.
    pub fn begin_expand(&mut self) -> bool {
        if self.phase != ViewerPhase::Collapsed || !self.full_bleed_allowed {
            debug!(phase = ?self.phase, allowed = self.full_bleed_allowed, "expand refused");
            return false;
        }
        {
            let mut host = self.host.lock().unwrap();
            host.set_render_scale(1.0);
            host.set_loop_running(true);
            host.set_controls_enabled(false);
        }
        self.phase = ViewerPhase::Expanding;
        debug!("exhibit expanding");
        true
    }

    /// The expansion blend reached 1. Local camera controls come alive.
    pub fn finish_expand(&mut self) {
        if self.phase != ViewerPhase::Expanding {
            debug!(phase = ?self.phase, "stray expand completion");
            return;
        }
        self.host.lock().unwrap().set_controls_enabled(true);
        self.phase = ViewerPhase::Expanded;
        debug!("exhibit expanded");
    }

    /// Begin collapsing. Only meaningful from `Expanded`.
    pub fn begin_collapse(&mut self) -> bool {
        if self.phase != ViewerPhase::Expanded {
            return false;
        }
        self.host.lock().unwrap().set_controls_enabled(false);
        self.phase = ViewerPhase::Collapsing;
        debug!("exhibit collapsing");
        true
    }

    /// The collapse blend reached 0. Drops the render scale back down, parks
    /// the loop if the panel has scrolled away, and hands back the deferred
    /// continuation for the caller to replay.
    ///
    /// The caller must invoke the continuation with no gate lock held.
    pub fn finish_collapse(&mut self) -> Option<Continuation> {
        if self.phase != ViewerPhase::Collapsing {
            debug!(phase = ?self.phase, "stray collapse completion");
            return None;
        }
        {
            let mut host = self.host.lock().unwrap();
            host.set_render_scale(self.collapsed_scale);
            if !self.in_view {
                host.set_loop_running(false);
            }
        }
        self.phase = ViewerPhase::Collapsed;
        debug!(deferred = self.after_collapse.is_some(), "exhibit collapsed");
        self.after_collapse.take()
    }

    /// Park a navigation request until the collapse lands. Replaces any
    /// previously deferred request.
    pub fn defer(&mut self, continuation: Continuation) {
        if self.after_collapse.is_some() {
            debug!("replacing deferred navigation");
        }
        self.after_collapse = Some(continuation);
    }

    /// Feed the exhibit panel's visibility ratio. Edge-triggered: the render
    /// loop is only touched when visibility crosses the threshold, and only
    /// while collapsed (expansion owns the loop otherwise).
    pub fn observe_visibility(&mut self, ratio: f32) {
        let visible = ratio > self.view_ratio;
        if visible == self.in_view {
            return;
        }
        trace!(ratio, visible, "exhibit visibility");
        self.in_view = visible;
        if self.phase == ViewerPhase::Collapsed {
            self.host.lock().unwrap().set_loop_running(visible);
        }
    }
}

/// Shared handle to the gate.
pub type SharedGate = Arc<Mutex<ViewerGate>>;

pub fn shared_gate(host: SharedExhibit, tuning: &SurfaceTuning) -> SharedGate {
    Arc::new(Mutex::new(ViewerGate::new(host, tuning)))
}

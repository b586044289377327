//! Navigation state machine
//!
//! The single owner of `current_index` and the transition lock. Everything
//! that wants to move the surface funnels into [`NavigationMachine::request_navigate`]:
//! link wiring, unified gestures, the keyboard trap, the deferred-continuation
//! replay. The machine serializes transitions (at most one in flight,
//! incoming requests during that window are dropped, not queued), drives the
//! motion scheduler, and emits `SECTION_CHANGE` once per completed
//! transition.
//!
//! Completion handling is pull-based: the frame loop ticks the scheduler,
//! collects finished tweens, and feeds their tags to
//! [`NavigationMachine::handle_completion`]. No engine callback ever runs
//! with a lock held, which is what keeps the deferred-continuation replay
//! (which re-enters `request_navigate`) safe.

use tracing::{debug, trace};

use crate::context::SurfaceContext;
use crate::gate::{SharedGate, ViewerPhase};
use crate::hosts::SharedExhibit;
use podium_core::events::{event_types, Event, EventData};
use podium_core::{NavSource, StepMode, SurfaceTuning};
use podium_motion::{ChannelTag, Ease};

/// Channel handle for the document scroll offset.
pub const SCROLL_CHANNEL: u64 = 1;
/// Channel handle for the progress indicator.
pub const PROGRESS_CHANNEL: u64 = 2;
/// Channel handle for the exhibit expansion blend.
pub const EXHIBIT_CHANNEL: u64 = 3;

/// Serializes section transitions for one surface.
pub struct NavigationMachine {
    ctx: SurfaceContext,
    gate: SharedGate,
    exhibit: SharedExhibit,
    tuning: SurfaceTuning,
    step_mode: StepMode,
    viewport_height: f32,
}

impl NavigationMachine {
    pub fn new(
        ctx: SurfaceContext,
        gate: SharedGate,
        exhibit: SharedExhibit,
        tuning: SurfaceTuning,
        step_mode: StepMode,
    ) -> Self {
        Self {
            ctx,
            gate,
            exhibit,
            tuning,
            step_mode,
            viewport_height: 0.0,
        }
    }

    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Updated by the orchestrator when viewport metrics re-measure.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    pub fn current_index(&self) -> usize {
        self.ctx.state.lock().unwrap().current_index()
    }

    pub fn is_animating(&self) -> bool {
        self.ctx.state.lock().unwrap().is_animating()
    }

    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    /// Request a transition to `requested` (clamped into range).
    ///
    /// Never errors: every refusal path is a silent drop recorded at debug
    /// level, and `is_animating` is never set on a path that cannot reach
    /// completion.
    pub fn request_navigate(&mut self, requested: isize, source: NavSource) {
        let target = self.ctx.deck.clamp(requested);

        let (current, animating) = {
            let nav = self.ctx.state.lock().unwrap();
            (nav.current_index(), nav.is_animating())
        };
        if target == current {
            trace!(target, "navigate to current panel, no-op");
            return;
        }
        if animating {
            debug!(target, source = source.label(), "navigate dropped: transition in flight");
            return;
        }

        let phase = self.gate.lock().unwrap().phase();
        if phase != ViewerPhase::Collapsed {
            debug!(target, source = source.label(), ?phase, "navigate deferred behind exhibit");
            self.gate.lock().unwrap().defer(Box::new(move |machine| {
                machine.request_navigate(target as isize, source);
            }));
            if phase == ViewerPhase::Expanded {
                self.collapse_exhibit();
            }
            return;
        }

        let Some(panel) = self.ctx.deck.get(target) else {
            return;
        };
        if panel.node.is_none() {
            debug!(target, "navigate dropped: panel not realized");
            return;
        }

        match self.step_mode {
            StepMode::Animated => self.begin_transition(target, source),
            StepMode::NativeMomentum => self.native_scroll(target),
        }
    }

    /// Instant offset jump used for the startup fragment target. Takes no
    /// transition lock and publishes nothing; the visibility sensor
    /// reconciles the index on a later tick.
    pub fn jump_to(&mut self, requested: isize) {
        let target = self.ctx.deck.clamp(requested);
        let Some(panel) = self.ctx.deck.get(target) else {
            return;
        };
        if panel.node.is_none() {
            debug!(target, "jump dropped: panel not realized");
            return;
        }
        self.ctx.motion.lock().unwrap().kill_target(SCROLL_CHANNEL);
        *self.ctx.offset.lock().unwrap() = self.ctx.deck.offset_of(target, self.viewport_height);
        debug!(target, "offset jump");
    }

    /// Re-align the offset onto the current panel after a viewport
    /// re-measure, instantly.
    pub fn realign(&mut self) {
        let (current, animating) = {
            let nav = self.ctx.state.lock().unwrap();
            (nav.current_index(), nav.is_animating())
        };
        if animating {
            return;
        }
        *self.ctx.offset.lock().unwrap() = self.ctx.deck.offset_of(current, self.viewport_height);
        trace!(current, "offset realigned");
    }

    /// Scrollbar release (or scroll quiescence): snap to whichever panel's
    /// center is nearest the viewport center. A full transition when that is
    /// a different panel, a short fine re-alignment when it is the current
    /// one.
    pub fn snap_release(&mut self) {
        if self.is_animating() {
            return;
        }
        let offset = *self.ctx.offset.lock().unwrap();
        let nearest = self.ctx.deck.nearest_index(offset, self.viewport_height);
        let current = self.current_index();
        if nearest != current {
            self.request_navigate(nearest as isize, NavSource::Scrollbar);
            return;
        }

        let to = self.ctx.deck.offset_of(current, self.viewport_height);
        if (to - offset).abs() <= f32::EPSILON {
            return;
        }
        trace!(current, from = offset, to, "fine snap");
        let channel = self.ctx.offset.clone();
        let mut motion = self.ctx.motion.lock().unwrap();
        motion.kill_target(SCROLL_CHANNEL);
        motion.animate(
            SCROLL_CHANNEL,
            offset,
            to,
            self.tuning.fine_snap_duration_ms,
            Ease::QuadOut,
            ChannelTag::FineSnap,
            move |v| *channel.lock().unwrap() = v,
        );
    }

    /// Accept a dominant-panel report from the visibility sensor.
    ///
    /// The machine stays the single writer of `current_index`: the sensor
    /// only reports, and the report is taken only when nothing is in flight.
    /// On the native-momentum path this is the sole source of index updates.
    pub fn reconcile(&mut self, dominant: usize) {
        if dominant >= self.ctx.deck.len() {
            return;
        }
        let accept = {
            let nav = self.ctx.state.lock().unwrap();
            !nav.is_animating() && nav.current_index() != dominant
        };
        if !accept {
            return;
        }
        if self.gate.lock().unwrap().phase() != ViewerPhase::Collapsed {
            return;
        }
        self.ctx.state.lock().unwrap().set_current_index(dominant);
        debug!(current = dominant, "index reconciled from visibility");
        self.publish(&Event::section_change(dominant));
    }

    /// Expand the exhibit to full bleed. Refused by the gate unless the
    /// viewer is collapsed and full-bleed room is granted.
    pub fn expand_exhibit(&mut self) {
        if !self.gate.lock().unwrap().begin_expand() {
            return;
        }
        let from = *self.ctx.blend.lock().unwrap();
        let blend = self.ctx.blend.clone();
        let mut motion = self.ctx.motion.lock().unwrap();
        motion.kill_target(EXHIBIT_CHANNEL);
        motion.animate(
            EXHIBIT_CHANNEL,
            from,
            1.0,
            self.tuning.exhibit_toggle_ms,
            Ease::CubicInOut,
            ChannelTag::ExhibitExpand,
            move |v| *blend.lock().unwrap() = v,
        );
    }

    /// Collapse the exhibit back into its panel. No-op unless expanded, so
    /// the completion path can call it unconditionally.
    pub fn collapse_exhibit(&mut self) {
        if !self.gate.lock().unwrap().begin_collapse() {
            return;
        }
        let from = *self.ctx.blend.lock().unwrap();
        let blend = self.ctx.blend.clone();
        let mut motion = self.ctx.motion.lock().unwrap();
        motion.kill_target(EXHIBIT_CHANNEL);
        motion.animate(
            EXHIBIT_CHANNEL,
            from,
            0.0,
            self.tuning.exhibit_toggle_ms,
            Ease::CubicInOut,
            ChannelTag::ExhibitCollapse,
            move |v| *blend.lock().unwrap() = v,
        );
    }

    /// React to a finished tween. Called by the frame loop with no scheduler
    /// lock held.
    pub fn handle_completion(&mut self, tag: ChannelTag) {
        match tag {
            ChannelTag::SectionScroll { target, source } => {
                self.complete_transition(target, source);
            }
            ChannelTag::Progress => {}
            ChannelTag::FineSnap => trace!("fine snap settled"),
            ChannelTag::ExhibitExpand => {
                self.gate.lock().unwrap().finish_expand();
                self.publish(&Event::new(event_types::EXHIBIT_EXPANDED, EventData::None));
            }
            ChannelTag::ExhibitCollapse => {
                // take() the continuation under the lock, invoke it after.
                let continuation = self.gate.lock().unwrap().finish_collapse();
                self.publish(&Event::new(event_types::EXHIBIT_COLLAPSED, EventData::None));
                if let Some(continuation) = continuation {
                    continuation(self);
                }
            }
        }
    }

    fn transition_profile(&self, source: NavSource) -> (u32, Ease) {
        match source {
            NavSource::Link => (self.tuning.link_duration_ms, Ease::QuartInOut),
            _ => (self.tuning.step_duration_ms, Ease::CubicOut),
        }
    }

    fn begin_transition(&mut self, target: usize, source: NavSource) {
        let (duration_ms, ease) = self.transition_profile(source);
        let to = self.ctx.deck.offset_of(target, self.viewport_height);
        let from = *self.ctx.offset.lock().unwrap();
        let fraction = self.ctx.deck.progress_fraction(target);
        let progress_from = *self.ctx.progress.lock().unwrap();

        self.ctx.state.lock().unwrap().set_animating(true);
        debug!(target, source = source.label(), duration_ms, "transition start");

        let mut motion = self.ctx.motion.lock().unwrap();
        motion.kill_target(SCROLL_CHANNEL);
        let offset = self.ctx.offset.clone();
        motion.animate(
            SCROLL_CHANNEL,
            from,
            to,
            duration_ms,
            ease,
            ChannelTag::SectionScroll { target, source },
            move |v| *offset.lock().unwrap() = v,
        );

        // Progress approach runs concurrently; the reactor lands the exact
        // fraction again on SECTION_CHANGE.
        motion.kill_target(PROGRESS_CHANNEL);
        let progress = self.ctx.progress.clone();
        motion.animate(
            PROGRESS_CHANNEL,
            progress_from,
            fraction,
            self.tuning.progress_duration_ms,
            Ease::QuadOut,
            ChannelTag::Progress,
            move |v| *progress.lock().unwrap() = v,
        );
    }

    /// The touch-primary bypass: the surface keeps native momentum, so the
    /// machine only places the offset and leaves the index to the sensor.
    /// `is_animating` stays false throughout.
    fn native_scroll(&mut self, target: usize) {
        let offset = self.ctx.deck.offset_of(target, self.viewport_height);
        self.ctx.motion.lock().unwrap().kill_target(SCROLL_CHANNEL);
        *self.ctx.offset.lock().unwrap() = offset;
        debug!(target, offset, "native momentum scroll");
    }

    /// Completion order mirrors the transition contract: index first, then
    /// the idempotent exhibit hooks, then the notification, and only then
    /// the lock release.
    fn complete_transition(&mut self, target: usize, source: NavSource) {
        self.ctx.state.lock().unwrap().set_current_index(target);
        self.exhibit.lock().unwrap().reset_camera();
        self.collapse_exhibit();
        self.publish(&Event::section_change(target));
        self.ctx.state.lock().unwrap().set_animating(false);
        debug!(current = target, source = source.label(), "transition complete");
    }

    fn publish(&mut self, event: &Event) {
        self.ctx.bus.lock().unwrap().publish(event);
    }
}

//! Surface orchestrator
//!
//! Owns every navigation component for one surface and wires them together:
//! the panel deck, the navigation machine, the input arbiter, the focus
//! subsystem, the visibility sensor, and the viewport metrics. The embedder
//! drives it with two calls, [`Orchestrator::handle_input`] for every
//! normalized event and [`Orchestrator::tick`] once per frame, and reads
//! the shared channels of [`SurfaceContext`] back for rendering.
//!
//! Input handling never publishes a navigation notification; those originate
//! from the tick path (transition completions, sensor reconciliation), which
//! is what keeps delivery ordering auditable and subscribers safe from
//! reentrancy.

use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use podium_core::events::{event_types, Event, EventData, KeyCode};
use podium_core::{
    NavSource, PanelDeck, PanelKind, ResizeCause, StepMode, SurfaceTuning, ViewportMetrics,
};
use podium_focus::{FocusOutcome, FocusPool, FocusSystem};
use podium_input::{DeviceCapabilities, DeviceProbe, InputArbiter, Intent, Suppression, TargetSpec};
use podium_motion::MotionMode;
use podium_nav::{
    attach_indicator_reactor, attach_progress_reactor, attach_video_reactor, shared_gate,
    NavigationMachine, SharedGate, SurfaceContext, VisibilitySensor,
};

use crate::error::{PodiumError, Result};
use crate::session::{intro_played, mark_intro_played, SessionStore};

/// Static description of a surface: its panels and their focus structure.
pub struct SurfaceDescriptor {
    pub panels: Vec<podium_core::Panel>,
    /// Per-panel tab rings.
    pub focus_pools: Vec<FocusPool>,
    /// Card rails for card-grid panels.
    pub card_rails: Vec<podium_focus::CardRail>,
    /// Startup fragment (`#anchor` form accepted), consumed once.
    pub fragment: Option<String>,
}

impl SurfaceDescriptor {
    pub fn new(panels: Vec<podium_core::Panel>) -> Self {
        Self {
            panels,
            focus_pools: Vec::new(),
            card_rails: Vec::new(),
            fragment: None,
        }
    }

    pub fn with_focus_pool(mut self, pool: FocusPool) -> Self {
        self.focus_pools.push(pool);
        self
    }

    pub fn with_card_rail(mut self, rail: podium_focus::CardRail) -> Self {
        self.card_rails.push(rail);
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }
}

/// The embedder-side hosts the surface talks to.
pub struct HostBundle {
    pub exhibit: podium_nav::SharedExhibit,
    pub media: podium_nav::SharedMedia,
    pub indicator: podium_nav::SharedIndicator,
    pub focus: podium_focus::SharedFocus,
}

impl HostBundle {
    /// Hosts that ignore every call, for headless runs and tests.
    pub fn null() -> Self {
        Self {
            exhibit: Arc::new(Mutex::new(podium_nav::NullExhibit)),
            media: Arc::new(Mutex::new(podium_nav::NullMedia)),
            indicator: Arc::new(Mutex::new(podium_nav::NullIndicator)),
            focus: podium_focus::shared_focus(podium_focus::NullFocus),
        }
    }
}

/// Startup configuration for one surface.
#[derive(Clone, Debug)]
pub struct SurfaceConfig {
    pub tuning: SurfaceTuning,
    /// Device capabilities as probed by the embedder.
    pub probe: DeviceProbe,
    pub motion: MotionMode,
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            tuning: SurfaceTuning::default(),
            probe: DeviceProbe::default(),
            motion: MotionMode::default(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// The assembled navigation stack for one surface.
pub struct Orchestrator {
    ctx: SurfaceContext,
    machine: NavigationMachine,
    arbiter: InputArbiter,
    focus: Arc<Mutex<FocusSystem>>,
    gate: SharedGate,
    sensor: VisibilitySensor,
    metrics: ViewportMetrics,
    session: Box<dyn SessionStore>,
    tuning: SurfaceTuning,
    exhibit_panel: Option<usize>,
    exhibit_node: Option<u64>,
    fragment_index: Option<usize>,
    fragment_deadline: Option<f64>,
    armed: bool,
    now_ms: f64,
}

impl Orchestrator {
    pub fn new(
        descriptor: SurfaceDescriptor,
        hosts: HostBundle,
        config: SurfaceConfig,
        session: Box<dyn SessionStore>,
    ) -> Result<Self> {
        let deck = Arc::new(PanelDeck::try_new(descriptor.panels)?);
        for pool in &descriptor.focus_pools {
            if pool.panel() >= deck.len() {
                return Err(PodiumError::UnknownPanel(pool.panel()));
            }
        }
        for rail in &descriptor.card_rails {
            if rail.panel() >= deck.len() {
                return Err(PodiumError::UnknownPanel(rail.panel()));
            }
        }

        let caps = DeviceCapabilities::from_probe(config.probe);
        let adapter = podium_input::resolve_adapter(caps);
        let tuning = config.tuning;

        let ctx = SurfaceContext::new(deck.clone(), config.motion);
        let gate = shared_gate(hosts.exhibit.clone(), &tuning);
        let machine = NavigationMachine::new(
            ctx.clone(),
            gate.clone(),
            hosts.exhibit,
            tuning.clone(),
            adapter.step_mode(),
        )
        .with_viewport_height(config.height);
        let arbiter = InputArbiter::new(&tuning, config.width);

        let mut focus = FocusSystem::new(hosts.focus);
        for pool in descriptor.focus_pools {
            focus = focus.with_pool(pool);
        }
        for rail in descriptor.card_rails {
            focus = focus.with_card_rail(rail);
        }
        focus.on_section_change(0);
        let focus = Arc::new(Mutex::new(focus));

        // Reactors first, focus resync last, so the pools re-aim after the
        // side effects of a section change have landed.
        attach_video_reactor(&ctx.bus, deck.clone(), hosts.media);
        attach_progress_reactor(&ctx.bus, deck.clone(), ctx.progress.clone());
        attach_indicator_reactor(&ctx.bus, hosts.indicator);
        let focus_resync = focus.clone();
        ctx.bus
            .lock()
            .unwrap()
            .subscribe(event_types::SECTION_CHANGE, move |ev| {
                if let EventData::Section { current } = ev.data {
                    focus_resync.lock().unwrap().on_section_change(current);
                }
            });

        let exhibit_panel = deck.find_kind(PanelKind::Exhibit);
        let exhibit_node = exhibit_panel.and_then(|i| deck.get(i).and_then(|p| p.node));
        let fragment_index = descriptor
            .fragment
            .as_deref()
            .and_then(|f| deck.index_of_anchor(f));

        let sensor = VisibilitySensor::new(&tuning);
        let metrics = ViewportMetrics::new(config.width, config.height, tuning.orientation_settle_ms);
        let already_played = intro_played(session.as_ref());

        let mut orchestrator = Self {
            ctx,
            machine,
            arbiter,
            focus,
            gate,
            sensor,
            metrics,
            session,
            tuning,
            exhibit_panel,
            exhibit_node,
            fragment_index,
            fragment_deadline: None,
            armed: false,
            now_ms: 0.0,
        };
        if already_played {
            orchestrator.arm();
        }
        Ok(orchestrator)
    }

    /// Shared channel bundle (deck, offset, progress, blend, bus) for
    /// rendering and subscription.
    pub fn context(&self) -> &SurfaceContext {
        &self.ctx
    }

    pub fn current_section(&self) -> usize {
        self.machine.current_index()
    }

    pub fn is_animating(&self) -> bool {
        self.machine.is_animating()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_modal_open(&self) -> bool {
        self.focus.lock().unwrap().modal_active()
    }

    pub fn is_exhibit_expanded(&self) -> bool {
        self.gate.lock().unwrap().is_expanded()
    }

    pub fn is_exhibit_transitioning(&self) -> bool {
        self.gate.lock().unwrap().is_transitioning()
    }

    /// The sole external navigation entry point, used by link/button wiring.
    pub fn go_to_section(&mut self, index: usize, source: NavSource) {
        self.machine.request_navigate(index as isize, source);
    }

    pub fn expand_exhibit(&mut self) {
        self.machine.expand_exhibit();
    }

    pub fn collapse_exhibit(&mut self) {
        self.machine.collapse_exhibit();
    }

    /// Grant or revoke full-bleed room for the exhibit. The embedding panel
    /// re-asserts this on layout changes.
    pub fn set_full_bleed(&mut self, allowed: bool) {
        self.gate.lock().unwrap().set_full_bleed_allowed(allowed);
    }

    /// Route one normalized event through the input pipeline. Events an
    /// upstream handler marked consumed are dropped unrouted.
    pub fn handle_input(&mut self, event: &Event) {
        if event.consumed {
            return;
        }
        match event.event_type {
            event_types::LOADER_END => {
                self.arm();
                self.forward(event);
                return;
            }
            event_types::MODAL_OPENED => {
                if let EventData::Modal { focusables } = &event.data {
                    self.focus.lock().unwrap().open_modal(focusables);
                }
                self.forward(event);
                return;
            }
            event_types::MODAL_CLOSED => {
                self.focus.lock().unwrap().close_modal();
                self.forward(event);
                return;
            }
            event_types::RESIZE => {
                if let EventData::Resize { width, height } = event.data {
                    if self.metrics.observe(width, height, ResizeCause::Resize, self.now_ms) {
                        self.apply_metrics();
                    }
                }
                // Falls through: the arbiter tracks viewport width too.
            }
            event_types::ORIENTATION_CHANGE => {
                if let EventData::Resize { width, height } = event.data {
                    self.metrics
                        .observe(width, height, ResizeCause::OrientationChange, self.now_ms);
                }
                return;
            }
            event_types::SCROLL => {
                // Native-momentum offset report. During an animated
                // transition the scheduler owns the offset.
                if let EventData::Scroll { offset } = event.data {
                    if !self.machine.is_animating() {
                        *self.ctx.offset.lock().unwrap() = offset;
                    }
                }
                // Falls through: the arbiter's quiescence clock needs it.
            }
            _ => {}
        }

        if self.exhibit_captures(event) {
            trace!(event_type = event.event_type, "captured by exhibit");
            return;
        }

        if event.event_type == event_types::KEY_DOWN {
            if let EventData::Key { key, modifiers } = event.data {
                if self.exhibit_key(key, event.target) {
                    return;
                }
                if key == KeyCode::TAB && (!self.armed || self.machine.is_animating()) {
                    return;
                }
                let outcome = self.focus.lock().unwrap().handle_key(key, modifiers);
                match outcome {
                    FocusOutcome::Handled => return,
                    FocusOutcome::Advance(step) => {
                        let target = self.machine.current_index() as isize + step;
                        self.machine.request_navigate(target, NavSource::Keyboard);
                        return;
                    }
                    FocusOutcome::Ignored => {}
                }
            }
        }

        let suppression = self.suppression();
        if let Some(intent) = self.arbiter.route(event, self.now_ms, suppression) {
            self.apply_intent(intent);
        }
    }

    /// Advance the surface by one frame.
    pub fn tick(&mut self, dt_ms: f32) {
        self.now_ms += f64::from(dt_ms);

        // Deferred orientation re-measure.
        if self.metrics.tick(self.now_ms) {
            self.apply_metrics();
        }

        // Startup fragment: one instant jump; the sensor pass below lands
        // the index and publishes the section change.
        if let Some(deadline) = self.fragment_deadline {
            if self.now_ms >= deadline {
                self.fragment_deadline = None;
                if let Some(index) = self.fragment_index.take() {
                    debug!(index, "applying startup fragment");
                    self.machine.jump_to(index as isize);
                }
            }
        }

        // Scroll-quiescence fallback for a missed pointer-up.
        if let Some(intent) = self.arbiter.tick(self.now_ms) {
            self.apply_intent(intent);
        }

        // Advance tweens, then react to completions with no scheduler lock
        // held (completion handling may publish and replay continuations).
        let completed = self.ctx.motion.lock().unwrap().tick(dt_ms);
        for completion in completed {
            self.machine.handle_completion(completion.tag);
        }

        // Offset-derived feedback: dominant-panel reconciliation and the
        // exhibit's render-loop visibility.
        let offset = *self.ctx.offset.lock().unwrap();
        let height = self.metrics.stable_height();
        if let Some(dominant) = self.sensor.observe(&self.ctx.deck, offset, height) {
            self.machine.reconcile(dominant);
        }
        if let Some(exhibit) = self.exhibit_panel {
            let ratio = self.ctx.deck.visible_ratio(exhibit, offset, height);
            self.gate.lock().unwrap().observe_visibility(ratio);
        }

        // On the native-momentum path nothing tweens the indicator; it
        // follows the scroll fraction directly.
        if self.armed && self.machine.step_mode() == StepMode::NativeMomentum {
            let max = self
                .ctx
                .deck
                .offset_of(self.ctx.deck.last_index(), height);
            if max > 0.0 {
                *self.ctx.progress.lock().unwrap() = (offset / max).clamp(0.0, 1.0);
            }
        }
    }

    /// Arm navigation: initial progress write and the fragment settle clock.
    /// Runs at most once, either at construction (intro already played) or
    /// on the first `LOADER_END`.
    fn arm(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        let current = self.machine.current_index();
        *self.ctx.progress.lock().unwrap() = self.ctx.deck.progress_fraction(current);
        if self.fragment_index.is_some() {
            self.fragment_deadline = Some(self.now_ms + self.tuning.fragment_settle_ms);
        }
        mark_intro_played(self.session.as_mut());
        debug!(current, "surface armed");
    }

    fn suppression(&self) -> Suppression {
        let exclusive = !self.armed
            || self.gate.lock().unwrap().is_transitioning()
            || self.focus.lock().unwrap().modal_active();
        Suppression {
            animating: self.machine.is_animating(),
            exclusive,
        }
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Nav(nav) => {
                let target = match nav.target {
                    TargetSpec::Step(step) => {
                        self.machine.current_index() as isize + step as isize
                    }
                    TargetSpec::Index(index) => index as isize,
                    TargetSpec::First => 0,
                    TargetSpec::Last => self.ctx.deck.last_index() as isize,
                };
                self.machine.request_navigate(target, nav.source);
            }
            Intent::SnapRelease => self.machine.snap_release(),
        }
    }

    fn apply_metrics(&mut self) {
        let height = self.metrics.stable_height();
        self.machine.set_viewport_height(height);
        self.machine.realign();
    }

    /// While the viewer is away from `Collapsed`, gestures aimed at the
    /// exhibit node stay local to the camera instead of steering the deck.
    fn exhibit_captures(&self, event: &Event) -> bool {
        let local = matches!(
            event.event_type,
            event_types::WHEEL
                | event_types::TOUCH_START
                | event_types::TOUCH_MOVE
                | event_types::TOUCH_END
                | event_types::POINTER_DOWN
                | event_types::POINTER_UP
        );
        if !local {
            return false;
        }
        let Some(node) = self.exhibit_node else {
            return false;
        };
        event.target == node && self.gate.lock().unwrap().wants_local_capture()
    }

    /// Keyboard contract of the exhibit container: Enter/Space toggles,
    /// Escape collapses, Tab out of an expanded viewer collapses and lets
    /// focus continue on its way.
    fn exhibit_key(&mut self, key: KeyCode, target: u64) -> bool {
        use podium_nav::ViewerPhase;

        let Some(node) = self.exhibit_node else {
            return false;
        };
        let phase = self.gate.lock().unwrap().phase();
        match key {
            KeyCode::ENTER | KeyCode::SPACE if target == node => {
                match phase {
                    ViewerPhase::Collapsed => self.machine.expand_exhibit(),
                    ViewerPhase::Expanded => self.machine.collapse_exhibit(),
                    _ => {}
                }
                true
            }
            KeyCode::ESCAPE if phase == ViewerPhase::Expanded => {
                self.machine.collapse_exhibit();
                true
            }
            KeyCode::TAB if phase == ViewerPhase::Expanded => {
                self.machine.collapse_exhibit();
                false
            }
            _ => false,
        }
    }

    fn forward(&mut self, event: &Event) {
        self.ctx.bus.lock().unwrap().publish(event);
    }
}

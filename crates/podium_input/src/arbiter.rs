//! Input arbiter
//!
//! Front door for normalized input: every wheel/touch/key/pointer event is
//! offered here, runs through its source's de-bounce gate, and comes out as
//! at most one navigation intent. Suppression is a per-call snapshot:
//! while a transition animates or an exclusive-input mode (preloader,
//! exhibit transition, modal) is active, all four sources are muted and
//! dropped inputs are not retried.

use podium_core::events::{event_types, Event, EventData};
use podium_core::NavSource;
use podium_core::SurfaceTuning;
use tracing::trace;

use crate::keys::{map_key, NavCommand};
use crate::scrollbar::ScrollbarDrag;
use crate::touch::TouchTracker;
use crate::wheel::WheelGate;

/// Where a navigation intent points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetSpec {
    Step(i32),
    Index(usize),
    First,
    Last,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavIntent {
    pub target: TargetSpec,
    pub source: NavSource,
}

/// What the arbiter asks the machine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Nav(NavIntent),
    /// Scrollbar drag released; snap to the nearest panel center.
    SnapRelease,
}

/// Per-call suppression snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Suppression {
    pub animating: bool,
    /// Preloader, exhibit transition, or modal owns input.
    pub exclusive: bool,
}

impl Suppression {
    pub fn blocked(&self) -> bool {
        self.animating || self.exclusive
    }
}

/// Unifies the four gesture sources into step/index intents.
pub struct InputArbiter {
    wheel: WheelGate,
    touch: TouchTracker,
    scrollbar: ScrollbarDrag,
    viewport_width: f32,
}

impl InputArbiter {
    pub fn new(tuning: &SurfaceTuning, viewport_width: f32) -> Self {
        Self {
            wheel: WheelGate::new(tuning.wheel_threshold, tuning.wheel_rearm_ms),
            touch: TouchTracker::new(tuning.touch_step_px),
            scrollbar: ScrollbarDrag::new(tuning.scrollbar_hit_px, tuning.snap_quiescence_ms),
            viewport_width,
        }
    }

    pub fn is_scrollbar_dragging(&self) -> bool {
        self.scrollbar.is_dragging()
    }

    /// Route one normalized event. Gesture bookkeeping (touch start/end,
    /// drag detection) always runs; step commits honor the suppression
    /// snapshot.
    pub fn route(&mut self, event: &Event, now_ms: f64, suppression: Suppression) -> Option<Intent> {
        match (event.event_type, &event.data) {
            (event_types::WHEEL, EventData::Wheel { delta_y }) => {
                if suppression.blocked() {
                    trace!(delta_y, "wheel suppressed");
                    return None;
                }
                self.wheel
                    .offer(*delta_y, now_ms)
                    .map(|step| Intent::Nav(NavIntent {
                        target: TargetSpec::Step(step),
                        source: NavSource::Wheel,
                    }))
            }
            (event_types::TOUCH_START, EventData::Touch { y, .. }) => {
                self.touch.begin(*y);
                None
            }
            (event_types::TOUCH_MOVE, EventData::Touch { y, .. }) => {
                if suppression.blocked() {
                    return None;
                }
                self.touch.offer(*y).map(|step| {
                    Intent::Nav(NavIntent {
                        target: TargetSpec::Step(step),
                        source: NavSource::Touch,
                    })
                })
            }
            (event_types::TOUCH_END, _) => {
                self.touch.end();
                None
            }
            (event_types::KEY_DOWN, EventData::Key { key, .. }) => {
                if suppression.blocked() {
                    return None;
                }
                map_key(*key).map(|command| {
                    let target = match command {
                        NavCommand::Step(step) => TargetSpec::Step(step),
                        NavCommand::First => TargetSpec::First,
                        NavCommand::Last => TargetSpec::Last,
                    };
                    Intent::Nav(NavIntent {
                        target,
                        source: NavSource::Keyboard,
                    })
                })
            }
            (event_types::POINTER_DOWN, EventData::Pointer { x, .. }) => {
                self.scrollbar.pointer_down(*x, self.viewport_width);
                None
            }
            (event_types::POINTER_UP, _) => {
                if self.scrollbar.pointer_up() {
                    Some(Intent::SnapRelease)
                } else {
                    None
                }
            }
            (event_types::SCROLL, _) => {
                self.scrollbar.observe_scroll(now_ms);
                None
            }
            (event_types::RESIZE, EventData::Resize { width, .. }) => {
                self.viewport_width = *width;
                None
            }
            _ => None,
        }
    }

    /// Advance the quiescence clock; may emit the fallback snap.
    pub fn tick(&mut self, now_ms: f64) -> Option<Intent> {
        if self.scrollbar.tick(now_ms) {
            Some(Intent::SnapRelease)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_core::events::{KeyCode, Modifiers};

    fn wheel(delta_y: f32) -> Event {
        Event::new(event_types::WHEEL, EventData::Wheel { delta_y })
    }

    fn key(code: KeyCode) -> Event {
        Event::new(
            event_types::KEY_DOWN,
            EventData::Key {
                key: code,
                modifiers: Modifiers::NONE,
            },
        )
    }

    fn arbiter() -> InputArbiter {
        InputArbiter::new(&SurfaceTuning::default(), 1280.0)
    }

    #[test]
    fn test_wheel_step_routed() {
        let mut a = arbiter();
        let intent = a.route(&wheel(50.0), 0.0, Suppression::default());
        assert_eq!(
            intent,
            Some(Intent::Nav(NavIntent {
                target: TargetSpec::Step(1),
                source: NavSource::Wheel,
            }))
        );
    }

    #[test]
    fn test_suppression_mutes_all_sources() {
        let mut a = arbiter();
        let blocked = Suppression {
            animating: true,
            exclusive: false,
        };
        assert_eq!(a.route(&wheel(80.0), 0.0, blocked), None);
        assert_eq!(a.route(&key(KeyCode::END), 0.0, blocked), None);

        a.route(
            &Event::new(event_types::TOUCH_START, EventData::Touch { x: 0.0, y: 400.0 }),
            0.0,
            blocked,
        );
        assert_eq!(
            a.route(
                &Event::new(event_types::TOUCH_MOVE, EventData::Touch { x: 0.0, y: 300.0 }),
                0.0,
                blocked,
            ),
            None
        );
        // Same gesture commits after the suppression lifts (no latch on
        // suppressed offers).
        assert!(a
            .route(
                &Event::new(event_types::TOUCH_MOVE, EventData::Touch { x: 0.0, y: 290.0 }),
                0.0,
                Suppression::default(),
            )
            .is_some());
    }

    #[test]
    fn test_keyboard_commands() {
        let mut a = arbiter();
        let end = a.route(&key(KeyCode::END), 0.0, Suppression::default());
        assert_eq!(
            end,
            Some(Intent::Nav(NavIntent {
                target: TargetSpec::Last,
                source: NavSource::Keyboard,
            }))
        );
        assert_eq!(a.route(&key(KeyCode::ENTER), 0.0, Suppression::default()), None);
    }

    #[test]
    fn test_scrollbar_release_snaps() {
        let mut a = arbiter();
        a.route(
            &Event::new(event_types::POINTER_DOWN, EventData::Pointer { x: 1275.0, y: 300.0 }),
            0.0,
            Suppression::default(),
        );
        assert!(a.is_scrollbar_dragging());
        let release = a.route(
            &Event::new(event_types::POINTER_UP, EventData::Pointer { x: 1275.0, y: 500.0 }),
            10.0,
            Suppression::default(),
        );
        assert_eq!(release, Some(Intent::SnapRelease));
    }

    #[test]
    fn test_scrollbar_quiescence_snaps_via_tick() {
        let mut a = arbiter();
        a.route(
            &Event::new(event_types::POINTER_DOWN, EventData::Pointer { x: 1275.0, y: 300.0 }),
            0.0,
            Suppression::default(),
        );
        a.route(
            &Event::new(event_types::SCROLL, EventData::Scroll { offset: 900.0 }),
            50.0,
            Suppression::default(),
        );
        assert_eq!(a.tick(100.0), None);
        assert_eq!(a.tick(180.0), Some(Intent::SnapRelease));
    }

    #[test]
    fn test_pointer_up_without_drag_is_silent() {
        let mut a = arbiter();
        assert_eq!(
            a.route(
                &Event::new(event_types::POINTER_UP, EventData::Pointer { x: 100.0, y: 100.0 }),
                0.0,
                Suppression::default(),
            ),
            None
        );
    }
}

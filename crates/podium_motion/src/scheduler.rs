//! Motion scheduler
//!
//! Owns every active tween and advances them on the surface's frame tick.
//! Each tween is bound to a channel sink (a closure writing the eased value
//! into a shared channel) and tagged with what it animates, so the
//! navigation machine can react to completions without holding callbacks
//! inside the engine. Completions are reported in spawn order.
//!
//! `MotionMode::Immediate` is the degraded no-animation mode: every tween is
//! forced to zero duration and completes on the next tick, so completion
//! ordering is identical to the animated mode.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::easing::Ease;
use crate::tween::Tween;
use podium_core::NavSource;

new_key_type! {
    pub struct TweenId;
}

/// What a tween is animating. Carried back to the machine on completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelTag {
    /// The deck scroll offset moving to a panel.
    SectionScroll { target: usize, source: NavSource },
    /// Progress-indicator approach.
    Progress,
    /// Fine re-alignment onto the current panel after a snap.
    FineSnap,
    /// Exhibit container expanding to full bleed.
    ExhibitExpand,
    /// Exhibit container collapsing back into its panel.
    ExhibitCollapse,
}

/// Writes a tween's current value into its bound channel.
pub type Sink = Box<dyn FnMut(f32) + Send>;

/// A finished tween, reported from [`MotionScheduler::tick`].
#[derive(Debug)]
pub struct Completion {
    pub id: TweenId,
    pub tag: ChannelTag,
    pub target: u64,
}

/// Whether tweens actually animate or complete immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionMode {
    #[default]
    Animated,
    /// Degraded fallback: zero-duration tweens, same completion path.
    Immediate,
}

struct Entry {
    tween: Tween,
    tag: ChannelTag,
    target: u64,
    sink: Sink,
}

/// The scheduler that ticks all active tweens.
pub struct MotionScheduler {
    entries: SlotMap<TweenId, Entry>,
    /// Spawn order; slotmap iteration order is not insertion order.
    order: Vec<TweenId>,
    mode: MotionMode,
}

impl MotionScheduler {
    pub fn new(mode: MotionMode) -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Start a tween on a channel. In `Immediate` mode the duration is
    /// forced to zero and the tween completes on the next tick.
    pub fn animate<F>(
        &mut self,
        target: u64,
        from: f32,
        to: f32,
        duration_ms: u32,
        ease: Ease,
        tag: ChannelTag,
        sink: F,
    ) -> TweenId
    where
        F: FnMut(f32) + Send + 'static,
    {
        let duration = match self.mode {
            MotionMode::Animated => duration_ms,
            MotionMode::Immediate => 0,
        };
        trace!(?tag, target, from, to, duration, "tween start");
        let id = self.entries.insert(Entry {
            tween: Tween::new(from, to, duration, ease),
            tag,
            target,
            sink: Box::new(sink),
        });
        self.order.push(id);
        id
    }

    /// Remove every tween bound to a channel handle. Returns how many were
    /// dropped. Killed tweens do not report completion.
    pub fn kill_target(&mut self, target: u64) -> usize {
        let doomed: Vec<TweenId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.entries.get(*id).is_some_and(|e| e.target == target))
            .collect();
        for id in &doomed {
            self.entries.remove(*id);
        }
        self.order.retain(|id| self.entries.contains_key(*id));
        if !doomed.is_empty() {
            debug!(target, count = doomed.len(), "killed tweens");
        }
        doomed.len()
    }

    /// Advance all tweens by `dt_ms`, push values into their sinks, and
    /// return the tweens that completed this tick, in spawn order.
    pub fn tick(&mut self, dt_ms: f32) -> SmallVec<[Completion; 4]> {
        let mut completed: SmallVec<[Completion; 4]> = SmallVec::new();
        for id in self.order.clone() {
            let Some(entry) = self.entries.get_mut(id) else {
                continue;
            };
            let finished = entry.tween.tick(dt_ms);
            (entry.sink)(entry.tween.value());
            if finished {
                completed.push(Completion {
                    id,
                    tag: entry.tag,
                    target: entry.target,
                });
            }
        }
        for completion in &completed {
            self.entries.remove(completion.id);
        }
        self.order.retain(|id| self.entries.contains_key(*id));
        completed
    }

    pub fn has_active(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }
}

/// Shared handle to the scheduler.
pub type SharedMotion = std::sync::Arc<std::sync::Mutex<MotionScheduler>>;

pub fn shared_motion(mode: MotionMode) -> SharedMotion {
    std::sync::Arc::new(std::sync::Mutex::new(MotionScheduler::new(mode)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const SCROLL: u64 = 1;
    const PROGRESS: u64 = 2;

    #[test]
    fn test_sink_receives_values_and_completion_fires_once() {
        let mut scheduler = MotionScheduler::new(MotionMode::Animated);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        scheduler.animate(SCROLL, 0.0, 100.0, 32, Ease::Linear, ChannelTag::Progress, move |v| {
            s.lock().unwrap().push(v);
        });

        assert!(scheduler.tick(16.0).is_empty());
        let done = scheduler.tick(16.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].tag, ChannelTag::Progress);
        assert!(!scheduler.has_active());

        let values = seen.lock().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(*values.last().unwrap(), 100.0);
    }

    #[test]
    fn test_completions_in_spawn_order() {
        let mut scheduler = MotionScheduler::new(MotionMode::Animated);
        scheduler.animate(
            SCROLL,
            0.0,
            720.0,
            16,
            Ease::Linear,
            ChannelTag::SectionScroll {
                target: 1,
                source: NavSource::Wheel,
            },
            |_| {},
        );
        scheduler.animate(PROGRESS, 0.0, 0.25, 16, Ease::Linear, ChannelTag::Progress, |_| {});

        let done = scheduler.tick(16.0);
        assert_eq!(done.len(), 2);
        assert!(matches!(done[0].tag, ChannelTag::SectionScroll { .. }));
        assert_eq!(done[1].tag, ChannelTag::Progress);
    }

    #[test]
    fn test_kill_target_drops_without_completion() {
        let mut scheduler = MotionScheduler::new(MotionMode::Animated);
        scheduler.animate(SCROLL, 0.0, 720.0, 200, Ease::Linear, ChannelTag::FineSnap, |_| {});
        scheduler.animate(PROGRESS, 0.0, 1.0, 200, Ease::Linear, ChannelTag::Progress, |_| {});

        assert_eq!(scheduler.kill_target(SCROLL), 1);
        assert_eq!(scheduler.active_count(), 1);
        let done = scheduler.tick(500.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].tag, ChannelTag::Progress);
    }

    #[test]
    fn test_immediate_mode_completes_next_tick() {
        let mut scheduler = MotionScheduler::new(MotionMode::Immediate);
        let value = Arc::new(Mutex::new(0.0f32));
        let v = value.clone();
        scheduler.animate(SCROLL, 0.0, 720.0, 750, Ease::QuartInOut, ChannelTag::Progress, move |x| {
            *v.lock().unwrap() = x;
        });

        // Ticking with any dt lands the final value and completes.
        let done = scheduler.tick(0.0);
        assert_eq!(done.len(), 1);
        assert_eq!(*value.lock().unwrap(), 720.0);
    }
}

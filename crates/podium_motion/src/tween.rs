//! Tweens
//!
//! One numeric channel interpolated over a fixed duration with an easing
//! curve. Tweens are advanced by the scheduler's frame tick; a zero-duration
//! tween completes on its first tick, which is what the no-animation
//! degraded mode relies on.

use crate::easing::Ease;

#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    ease: Ease,
    elapsed_ms: f32,
    done: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_ms,
            ease,
            elapsed_ms: 0.0,
            done: false,
        }
    }

    /// Advance by `dt_ms`. Returns true on the tick that completes the
    /// tween; false before and after.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.done {
            return false;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.duration_ms as f32 {
            self.elapsed_ms = self.duration_ms as f32;
            self.done = true;
            return true;
        }
        false
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return if self.done { 1.0 } else { 0.0 };
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current eased value. Exactly `to` once complete.
    pub fn value(&self) -> f32 {
        if self.done {
            return self.to;
        }
        let eased = self.ease.sample(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn end_value(&self) -> f32 {
        self.to
    }
}

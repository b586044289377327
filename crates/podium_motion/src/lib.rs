//! Podium Motion Engine
//!
//! The tween engine the navigation machine drives:
//!
//! - **Easing**: polynomial curve families plus arbitrary cubic beziers
//! - **Tweens**: one numeric channel over a fixed duration
//! - **Scheduler**: frame-tick advancement, channel sinks, tagged
//!   completions in spawn order, kill-by-target
//!
//! # Example
//!
//! ```ignore
//! use podium_motion::{ChannelTag, Ease, MotionMode, MotionScheduler};
//!
//! let mut motion = MotionScheduler::new(MotionMode::Animated);
//! motion.animate(1, 0.0, 720.0, 350, Ease::CubicOut, ChannelTag::Progress, |v| {
//!     // write v into the bound channel
//! });
//! let completed = motion.tick(16.0);
//! ```

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Ease;
pub use scheduler::{
    shared_motion, ChannelTag, Completion, MotionMode, MotionScheduler, SharedMotion, TweenId,
};
pub use tween::Tween;

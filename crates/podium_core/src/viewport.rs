//! Viewport metrics
//!
//! Mobile browsers resize the visual viewport when chrome shows or hides
//! (URL bar collapse, soft keyboard). Panel geometry must not follow those
//! transient shrinks or the deck would re-layout mid-gesture. The rule here:
//!
//! - a width change re-measures both dimensions (real resize or rotation),
//! - height growth is accepted immediately,
//! - same-width height shrink is ignored (that is the chrome),
//! - an orientation change defers the re-measure by a settle delay, because
//!   the reported dimensions are unreliable until rotation finishes.

use tracing::debug;

/// Why a resize observation happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeCause {
    Resize,
    OrientationChange,
}

#[derive(Debug)]
pub struct ViewportMetrics {
    width: f32,
    stable_height: f32,
    /// Most recent raw dimensions, applied on settle.
    raw_width: f32,
    raw_height: f32,
    /// Deadline (surface clock, ms) for an orientation re-measure.
    settle_deadline: Option<f64>,
    settle_ms: f64,
}

impl ViewportMetrics {
    pub fn new(width: f32, height: f32, settle_ms: f64) -> Self {
        Self {
            width,
            stable_height: height,
            raw_width: width,
            raw_height: height,
            settle_deadline: None,
            settle_ms,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Viewport height immune to mobile-chrome resizing.
    pub fn stable_height(&self) -> f32 {
        self.stable_height
    }

    /// Feed a resize observation. Returns true when the stable metrics
    /// changed immediately (orientation changes return false here and apply
    /// on [`ViewportMetrics::tick`] after the settle delay).
    pub fn observe(&mut self, width: f32, height: f32, cause: ResizeCause, now_ms: f64) -> bool {
        self.raw_width = width;
        self.raw_height = height;

        if cause == ResizeCause::OrientationChange {
            self.settle_deadline = Some(now_ms + self.settle_ms);
            return false;
        }

        self.apply_policy(width, height)
    }

    /// Advance the settle clock. Returns true when a deferred orientation
    /// re-measure was applied this tick.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.settle_deadline {
            Some(deadline) if now_ms >= deadline => {
                self.settle_deadline = None;
                self.width = self.raw_width;
                self.stable_height = self.raw_height;
                debug!(
                    width = self.width,
                    height = self.stable_height,
                    "viewport settled after orientation change"
                );
                true
            }
            _ => false,
        }
    }

    fn apply_policy(&mut self, width: f32, height: f32) -> bool {
        if (width - self.width).abs() > f32::EPSILON {
            self.width = width;
            self.stable_height = height;
            return true;
        }
        if height > self.stable_height {
            self.stable_height = height;
            return true;
        }
        // Same-width shrink: URL bar or soft keyboard, keep the stable value.
        false
    }
}

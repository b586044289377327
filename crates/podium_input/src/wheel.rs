//! Wheel gate
//!
//! Wheel hardware reports a burst of deltas for one flick of the finger.
//! Two rules turn a burst into exactly one logical step: deltas below the
//! noise threshold are ignored outright, and an accepted step disarms the
//! gate for a short re-arm window so the tail of the burst cannot fire
//! again.

#[derive(Debug)]
pub struct WheelGate {
    threshold: f32,
    rearm_ms: f64,
    /// Surface clock at which the gate accepts the next step.
    armed_at: f64,
}

impl WheelGate {
    pub fn new(threshold: f32, rearm_ms: f64) -> Self {
        Self {
            threshold,
            rearm_ms,
            armed_at: 0.0,
        }
    }

    /// Offer a wheel delta. Returns the step direction (+1 down, -1 up)
    /// when this delta commits a step.
    pub fn offer(&mut self, delta_y: f32, now_ms: f64) -> Option<i32> {
        if delta_y.abs() < self.threshold {
            return None;
        }
        if now_ms < self.armed_at {
            return None;
        }
        self.armed_at = now_ms + self.rearm_ms;
        Some(if delta_y > 0.0 { 1 } else { -1 })
    }
}

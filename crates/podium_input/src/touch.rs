//! Touch swipe tracker
//!
//! One swipe, one step: the tracker records the start Y, fires when the
//! travel crosses the commit threshold, then latches until the finger
//! lifts. Suppressed offers (mid-animation) do not latch, so a swipe that
//! keeps moving after a transition finishes may still commit.

#[derive(Debug)]
pub struct TouchTracker {
    step_px: f32,
    start_y: Option<f32>,
    latched: bool,
}

impl TouchTracker {
    pub fn new(step_px: f32) -> Self {
        Self {
            step_px,
            start_y: None,
            latched: false,
        }
    }

    pub fn begin(&mut self, y: f32) {
        self.start_y = Some(y);
        self.latched = false;
    }

    /// Offer a move sample. Returns the step direction (+1 when swiping up,
    /// toward the next panel) once per gesture.
    pub fn offer(&mut self, y: f32) -> Option<i32> {
        let start = self.start_y?;
        if self.latched {
            return None;
        }
        let delta = start - y;
        if delta.abs() < self.step_px {
            return None;
        }
        self.latched = true;
        Some(if delta > 0.0 { 1 } else { -1 })
    }

    pub fn end(&mut self) {
        self.start_y = None;
        self.latched = false;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_y.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_per_gesture() {
        let mut tracker = TouchTracker::new(35.0);
        tracker.begin(400.0);
        assert_eq!(tracker.offer(380.0), None);
        assert_eq!(tracker.offer(360.0), Some(1));
        // Latched: further travel in the same gesture is ignored.
        assert_eq!(tracker.offer(200.0), None);
        tracker.end();

        tracker.begin(200.0);
        assert_eq!(tracker.offer(260.0), Some(-1));
    }

    #[test]
    fn test_move_without_begin_is_ignored() {
        let mut tracker = TouchTracker::new(35.0);
        assert_eq!(tracker.offer(100.0), None);
    }

    #[test]
    fn test_end_resets_latch() {
        let mut tracker = TouchTracker::new(35.0);
        tracker.begin(400.0);
        assert_eq!(tracker.offer(300.0), Some(1));
        tracker.end();
        assert!(!tracker.is_tracking());
        tracker.begin(400.0);
        assert_eq!(tracker.offer(300.0), Some(1));
    }
}

//! Scrollbar drag snap
//!
//! Dragging the browser-reserved scrollbar region moves the content freely;
//! nothing here intercepts that. The work happens on release: snap to
//! whichever panel's center is nearest the viewport center. Release is the
//! pointer-up inside the drag, or, when the pointer-up lands outside the
//! surface and is never seen, a scroll-quiescence fallback that fires once
//! the content has stopped moving for the configured window.

use tracing::debug;

/// Scrollbar drag interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag in progress
    #[default]
    Idle,
    /// Pointer went down inside the scrollbar hit-region
    Dragging,
}

/// Tracks one scrollbar drag and decides when the release snap fires.
#[derive(Debug)]
pub struct ScrollbarDrag {
    phase: DragPhase,
    hit_px: f32,
    quiescence_ms: f64,
    /// Deadline for the scroll-quiescence fallback, refreshed on every
    /// scroll sample while dragging.
    quiet_deadline: Option<f64>,
}

impl ScrollbarDrag {
    pub fn new(hit_px: f32, quiescence_ms: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            hit_px,
            quiescence_ms,
            quiet_deadline: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Feed a pointer-down. Returns true when it starts a scrollbar drag.
    pub fn pointer_down(&mut self, x: f32, viewport_width: f32) -> bool {
        if x >= viewport_width - self.hit_px {
            self.phase = DragPhase::Dragging;
            self.quiet_deadline = None;
            debug!(x, "scrollbar drag started");
            return true;
        }
        false
    }

    /// Feed a pointer-up. Returns true when a drag just released and the
    /// snap should run.
    pub fn pointer_up(&mut self) -> bool {
        if self.phase != DragPhase::Dragging {
            return false;
        }
        self.phase = DragPhase::Idle;
        self.quiet_deadline = None;
        true
    }

    /// Feed a scroll sample while dragging; refreshes the quiescence
    /// fallback deadline.
    pub fn observe_scroll(&mut self, now_ms: f64) {
        if self.phase == DragPhase::Dragging {
            self.quiet_deadline = Some(now_ms + self.quiescence_ms);
        }
    }

    /// Advance the fallback clock. Returns true when quiescence expired and
    /// the snap should run without a pointer-up.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.quiet_deadline {
            Some(deadline) if now_ms >= deadline => {
                self.phase = DragPhase::Idle;
                self.quiet_deadline = None;
                debug!("scrollbar drag ended by scroll quiescence");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_region_detection() {
        let mut drag = ScrollbarDrag::new(18.0, 120.0);
        assert!(!drag.pointer_down(600.0, 1280.0));
        assert!(!drag.is_dragging());
        assert!(drag.pointer_down(1270.0, 1280.0));
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_pointer_up_releases_once() {
        let mut drag = ScrollbarDrag::new(18.0, 120.0);
        drag.pointer_down(1275.0, 1280.0);
        assert!(drag.pointer_up());
        assert!(!drag.pointer_up());
    }

    #[test]
    fn test_quiescence_fallback() {
        let mut drag = ScrollbarDrag::new(18.0, 120.0);
        drag.pointer_down(1275.0, 1280.0);
        drag.observe_scroll(1000.0);
        assert!(!drag.tick(1100.0));
        // Movement keeps pushing the deadline.
        drag.observe_scroll(1110.0);
        assert!(!drag.tick(1200.0));
        assert!(drag.tick(1230.0));
        assert!(!drag.is_dragging());
        // Expired fallback does not refire.
        assert!(!drag.tick(1300.0));
    }

    #[test]
    fn test_scroll_outside_drag_is_ignored() {
        let mut drag = ScrollbarDrag::new(18.0, 120.0);
        drag.observe_scroll(1000.0);
        assert!(!drag.tick(2000.0));
    }
}

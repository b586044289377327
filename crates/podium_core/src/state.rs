//! Navigation state
//!
//! The single source of truth for "which section is current." One instance
//! exists per surface, shared behind [`SharedNav`]; it is written only by the
//! navigation machine and read by everything else. Keeping all writes in one
//! component is what makes the reentrancy story auditable: any handler that
//! might fire while a transition is unwinding checks `is_animating` here
//! before touching anything.

use std::sync::{Arc, Mutex};

/// Which input produced a navigation request. Selects transition
/// duration/easing and is carried through to the log stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavSource {
    Wheel,
    Touch,
    Keyboard,
    /// Scrollbar-drag release snap.
    Scrollbar,
    /// Navigation link or button; gets the longer, more pronounced ease.
    Link,
}

impl NavSource {
    pub fn label(self) -> &'static str {
        match self {
            NavSource::Wheel => "wheel",
            NavSource::Touch => "touch",
            NavSource::Keyboard => "keyboard",
            NavSource::Scrollbar => "scrollbar",
            NavSource::Link => "link",
        }
    }
}

/// How single-step requests move the deck, resolved once at startup from the
/// device probe. Pointer devices get the discrete animated snap; touch-primary
/// devices keep native momentum and let the visibility sensor settle the
/// index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepMode {
    #[default]
    Animated,
    NativeMomentum,
}

/// Navigation state for one surface.
///
/// Invariants:
/// - `current_index` is always the target of the last *completed* transition
///   (or the reconciled dominant panel on the native-momentum path).
/// - `is_animating` is true strictly between transition start and its
///   completion handling; it is never left true without an unlock path.
#[derive(Debug, Default)]
pub struct NavigationState {
    current_index: usize,
    is_animating: bool,
}

impl NavigationState {
    pub fn new(initial_index: usize) -> Self {
        Self {
            current_index: initial_index,
            is_animating: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    /// Written only by the navigation machine.
    pub fn set_current_index(&mut self, index: usize) {
        self.current_index = index;
    }

    /// Written only by the navigation machine.
    pub fn set_animating(&mut self, animating: bool) {
        self.is_animating = animating;
    }
}

/// Shared handle to the navigation state.
pub type SharedNav = Arc<Mutex<NavigationState>>;

/// Shared scroll offset channel, in document pixels. Written by the motion
/// scheduler during animated transitions and by the embedding surface during
/// native-momentum scrolling; read by the visibility sensor and the renderer.
pub type SharedOffset = Arc<Mutex<f32>>;

/// Shared progress-indicator fraction in `[0, 1]`.
pub type SharedProgress = Arc<Mutex<f32>>;

/// Shared exhibit expansion blend in `[0, 1]` (0 = collapsed layout,
/// 1 = full-bleed). Sampled by the exhibit host for its container geometry.
pub type SharedBlend = Arc<Mutex<f32>>;

pub fn shared_nav(initial_index: usize) -> SharedNav {
    Arc::new(Mutex::new(NavigationState::new(initial_index)))
}

pub fn shared_value(value: f32) -> Arc<Mutex<f32>> {
    Arc::new(Mutex::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults() {
        let state = NavigationState::new(2);
        assert_eq!(state.current_index(), 2);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_shared_handle_roundtrip() {
        let nav = shared_nav(0);
        nav.lock().unwrap().set_current_index(3);
        nav.lock().unwrap().set_animating(true);
        let guard = nav.lock().unwrap();
        assert_eq!(guard.current_index(), 3);
        assert!(guard.is_animating());
    }
}

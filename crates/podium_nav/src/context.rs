//! Shared surface context
//!
//! The handle bundle every navigation component receives at construction.
//! One context exists per surface; cloning it clones the `Arc` handles, not
//! the state behind them.

use std::sync::Arc;

use podium_core::{
    shared_bus, shared_nav, shared_value, PanelDeck, SharedBus, SharedNav, SharedOffset,
    SharedProgress,
};
use podium_motion::{shared_motion, MotionMode, SharedMotion};

/// Shared exhibit expansion blend in `[0, 1]`.
pub type SharedBlend = podium_core::SharedBlend;

/// Everything the navigation components share for one surface.
#[derive(Clone)]
pub struct SurfaceContext {
    pub deck: Arc<PanelDeck>,
    pub state: SharedNav,
    pub motion: SharedMotion,
    pub bus: SharedBus,
    /// Document scroll offset in pixels.
    pub offset: SharedOffset,
    /// Progress indicator fraction.
    pub progress: SharedProgress,
    /// Exhibit expansion blend.
    pub blend: SharedBlend,
}

impl SurfaceContext {
    pub fn new(deck: Arc<PanelDeck>, mode: MotionMode) -> Self {
        Self {
            deck,
            state: shared_nav(0),
            motion: shared_motion(mode),
            bus: shared_bus(),
            offset: shared_value(0.0),
            progress: shared_value(0.0),
            blend: shared_value(0.0),
        }
    }
}

//! Surface tuning
//!
//! Every constant the navigation core runs on, in one struct with the
//! canonical values as its `Default`. An embedder can overlay these from a
//! TOML profile (see `podium_app`); the core itself never reads files.

use serde::{Deserialize, Serialize};

/// Tuning constants for gesture gating, transitions, and the exhibit gate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceTuning {
    /// Wheel deltas below this magnitude are sensor noise.
    pub wheel_threshold: f32,
    /// Re-arm window after an accepted wheel step; a burst inside it is one
    /// physical gesture.
    pub wheel_rearm_ms: f64,
    /// Touch-swipe travel that commits one step.
    pub touch_step_px: f32,
    /// Width of the reserved scrollbar hit-region at the right edge.
    pub scrollbar_hit_px: f32,
    /// Scroll quiescence window that ends a scrollbar drag when the
    /// pointer-up was missed.
    pub snap_quiescence_ms: f64,

    /// Single-step transition duration (wheel, touch, keyboard, snap).
    pub step_duration_ms: u32,
    /// Link-jump transition duration (the pronounced ease).
    pub link_duration_ms: u32,
    /// Progress-indicator approach duration.
    pub progress_duration_ms: u32,
    /// Fine re-alignment when a snap resolves to the current panel.
    pub fine_snap_duration_ms: u32,
    /// Exhibit expand/collapse duration.
    pub exhibit_toggle_ms: u32,

    /// Visibility ratio above which a panel dominates the viewport.
    pub dominance_ratio: f32,
    /// Visibility ratio below which the exhibit's render loop may pause.
    pub exhibit_view_ratio: f32,
    /// Render scale applied to the exhibit while collapsed.
    pub collapsed_render_scale: f32,

    /// Delay before trusting dimensions after an orientation change.
    pub orientation_settle_ms: f64,
    /// Delay before applying the startup fragment target.
    pub fragment_settle_ms: f64,
}

impl Default for SurfaceTuning {
    fn default() -> Self {
        Self {
            wheel_threshold: 20.0,
            wheel_rearm_ms: 120.0,
            touch_step_px: 35.0,
            scrollbar_hit_px: 18.0,
            snap_quiescence_ms: 120.0,

            step_duration_ms: 350,
            link_duration_ms: 750,
            progress_duration_ms: 280,
            fine_snap_duration_ms: 200,
            exhibit_toggle_ms: 500,

            dominance_ratio: 0.55,
            exhibit_view_ratio: 0.1,
            collapsed_render_scale: 0.5,

            orientation_settle_ms: 400.0,
            fragment_settle_ms: 50.0,
        }
    }
}

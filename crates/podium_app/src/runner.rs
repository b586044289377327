//! Deterministic frame loop for headless runs.
//!
//! No wall clock anywhere: the loop advances the orchestrator by a fixed
//! logical tick per frame, and the callback injects events at chosen frames.
//! The same scenario therefore produces the same transition timeline on
//! every run, which is what the scenario tests build on.

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use crate::orchestrator::Orchestrator;

/// Configuration for a fixed-budget frame run.
#[derive(Debug, Clone, Copy)]
pub struct FrameLoopConfig {
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: f32,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            max_frames: 600,
            tick_ms: 16.0,
        }
    }
}

/// Frame context passed to the frame callback.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub frame_index: u32,
    pub elapsed_ms: f64,
}

/// Fixed-tick driver for one orchestrator.
pub struct FrameLoop;

impl FrameLoop {
    /// Run a fixed frame budget. The callback runs before each tick, so an
    /// event injected at frame `n` is processed by frame `n`'s tick.
    pub fn run<F>(cfg: FrameLoopConfig, orchestrator: &mut Orchestrator, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&mut Orchestrator, &FrameContext),
    {
        if cfg.max_frames == 0 {
            bail!("frame loop max_frames must be > 0");
        }
        if !cfg.tick_ms.is_finite() || cfg.tick_ms <= 0.0 {
            bail!("frame loop tick_ms must be positive");
        }

        for frame in 0..cfg.max_frames {
            let ctx = FrameContext {
                frame_index: frame,
                elapsed_ms: f64::from(cfg.tick_ms) * f64::from(frame),
            };
            on_frame(orchestrator, &ctx);
            orchestrator.tick(cfg.tick_ms);
        }

        Ok(())
    }
}

/// Install the fmt subscriber honoring `RUST_LOG`. Safe to call more than
/// once; repeat installs are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

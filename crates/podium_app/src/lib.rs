//! Podium Application Assembly
//!
//! Wires the podium crates into one ready-to-drive surface: describe the
//! panel deck, hand over the embedder hosts, and pump events and frames.
//!
//! # Example
//!
//! ```ignore
//! use podium_app::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     init_tracing();
//!
//!     let descriptor = SurfaceDescriptor::new(vec![
//!         Panel::new(0, 101).with_anchor("intro"),
//!         Panel::new(1, 102).with_kind(PanelKind::Exhibit),
//!         Panel::new(2, 103),
//!     ])
//!     .with_focus_pool(FocusPool::new(0, vec![1001, 1002]));
//!
//!     let mut surface = Orchestrator::new(
//!         descriptor,
//!         HostBundle::null(),
//!         SurfaceConfig::default(),
//!         Box::new(MemorySession::new()),
//!     )?;
//!
//!     surface.go_to_section(2, NavSource::Link);
//!     FrameLoop::run(FrameLoopConfig::default(), &mut surface, |_, _| {})?;
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod orchestrator;
pub mod runner;
pub mod session;

#[cfg(test)]
mod tests;

pub use config::TuningProfile;
pub use error::{PodiumError, Result};
pub use orchestrator::{HostBundle, Orchestrator, SurfaceConfig, SurfaceDescriptor};
pub use runner::{init_tracing, FrameContext, FrameLoop, FrameLoopConfig};
pub use session::{MemorySession, SessionStore, INTRO_PLAYED_KEY};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::orchestrator::{HostBundle, Orchestrator, SurfaceConfig, SurfaceDescriptor};
    pub use crate::runner::{init_tracing, FrameContext, FrameLoop, FrameLoopConfig};
    pub use crate::session::{MemorySession, SessionStore};

    // Core types
    pub use podium_core::events::{Event, EventData, KeyCode, Modifiers};
    pub use podium_core::{NavSource, Panel, PanelKind, SurfaceTuning};
    pub use podium_focus::{Card, CardRail, FocusPool};
    pub use podium_input::DeviceProbe;
    pub use podium_motion::MotionMode;
}

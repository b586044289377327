//! Podium navigation core
//!
//! The section-navigation machinery for one presentation surface:
//!
//! - [`machine::NavigationMachine`] - owns `current_index` and serializes
//!   transitions (at most one in flight, drop-incoming backpressure)
//! - [`gate::ViewerGate`] - expand/collapse lifecycle of the 3D exhibit and
//!   the single deferred-navigation slot behind it
//! - [`sensor::VisibilitySensor`] - dominant-panel reports for index
//!   reconciliation
//! - [`reactors`] - pure `SECTION_CHANGE` subscribers (media, progress,
//!   indicator)
//! - [`hosts`] - the traits an embedding surface implements
//!
//! Assembly sketch:
//!
//! ```ignore
//! let ctx = SurfaceContext::new(deck, MotionMode::Animated);
//! let gate = shared_gate(exhibit.clone(), &tuning);
//! let mut machine =
//!     NavigationMachine::new(ctx.clone(), gate, exhibit, tuning, StepMode::Animated)
//!         .with_viewport_height(720.0);
//! machine.request_navigate(2, NavSource::Wheel);
//! // each frame:
//! let completed = ctx.motion.lock().unwrap().tick(dt_ms);
//! for c in completed {
//!     machine.handle_completion(c.tag);
//! }
//! ```

pub mod context;
pub mod gate;
pub mod hosts;
pub mod machine;
pub mod reactors;
pub mod sensor;

pub use context::SurfaceContext;
pub use gate::{shared_gate, Continuation, SharedGate, ViewerGate, ViewerPhase};
pub use hosts::{
    ExhibitHost, IndicatorHost, MediaHost, NullExhibit, NullIndicator, NullMedia, SharedExhibit,
    SharedIndicator, SharedMedia,
};
pub use machine::{NavigationMachine, EXHIBIT_CHANNEL, PROGRESS_CHANNEL, SCROLL_CHANNEL};
pub use reactors::{attach_indicator_reactor, attach_progress_reactor, attach_video_reactor};
pub use sensor::VisibilitySensor;

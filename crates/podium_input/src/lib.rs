//! Podium Input Layer
//!
//! Normalizes four gesture sources (wheel, touch swipe, keyboard, and
//! scrollbar drag) into single-step navigation intents:
//!
//! - **Device probe**: capabilities resolved once at startup into an
//!   [`InputAdapter`] strategy (pointer snap vs. touch native momentum)
//! - **Gates**: per-source de-bounce guaranteeing one physical gesture →
//!   one logical step
//! - **Arbiter**: routes normalized events through the gates under a
//!   suppression snapshot (animating / exclusive-input modes)
//!
//! # Example
//!
//! ```ignore
//! use podium_input::{InputArbiter, Suppression};
//! use podium_core::{events::Event, SurfaceTuning};
//!
//! let mut arbiter = InputArbiter::new(&SurfaceTuning::default(), 1280.0);
//! if let Some(intent) = arbiter.route(&event, now_ms, Suppression::default()) {
//!     // hand the intent to the navigation machine
//! }
//! ```

pub mod adapter;
pub mod arbiter;
pub mod device;
pub mod keys;
pub mod scrollbar;
pub mod touch;
pub mod wheel;

pub use adapter::{resolve_adapter, AdapterKind, InputAdapter, PointerAdapter, TouchAdapter};
pub use arbiter::{InputArbiter, Intent, NavIntent, Suppression, TargetSpec};
pub use device::{DeviceCapabilities, DeviceProbe};
pub use keys::{map_key, NavCommand};
pub use scrollbar::{DragPhase, ScrollbarDrag};
pub use touch::TouchTracker;
pub use wheel::WheelGate;

//! Podium Core Runtime
//!
//! Foundational primitives for the Podium section-navigation engine:
//!
//! - **Panel Deck**: the fixed, ordered sequence of full-viewport sections
//!   and its vertical-stack geometry
//! - **Navigation State**: the single source of truth for the current
//!   section and the in-flight transition flag
//! - **Event Bus**: one vocabulary for normalized input and surface
//!   notifications, with auditable per-type delivery order
//! - **Viewport Metrics**: a stable viewport height immune to mobile-chrome
//!   resizing
//! - **Surface Tuning**: every constant the core runs on, defaulting to the
//!   canonical values
//!
//! # Example
//!
//! ```ignore
//! use podium_core::{Panel, PanelDeck};
//! use podium_core::events::{event_types, Event, EventBus};
//!
//! let deck = PanelDeck::new(vec![
//!     Panel::new(0, 101).with_anchor("intro"),
//!     Panel::new(1, 102),
//! ]);
//!
//! let mut bus = EventBus::new();
//! bus.subscribe(event_types::SECTION_CHANGE, |ev| {
//!     println!("now at {:?}", ev.data);
//! });
//! bus.publish(&Event::section_change(deck.index_of_anchor("intro").unwrap()));
//! ```

pub mod error;
pub mod events;
pub mod panel;
pub mod state;
pub mod tuning;
pub mod viewport;

pub use error::{Result, SurfaceError};
pub use events::{shared_bus, Event, EventBus, EventData, EventType, KeyCode, Modifiers, SharedBus};
pub use panel::{Panel, PanelDeck, PanelKind};
pub use state::{
    shared_nav, shared_value, NavSource, NavigationState, SharedBlend, SharedNav, SharedOffset,
    SharedProgress, StepMode,
};
pub use tuning::SurfaceTuning;
pub use viewport::{ResizeCause, ViewportMetrics};

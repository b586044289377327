//! Input adapter strategy
//!
//! One capability probe at startup resolves into a strategy object; no other
//! code branches on touch-vs-pointer. The adapter decides how a single step
//! moves the deck: pointer devices take the discrete animated snap, touch-
//! primary devices keep the platform's native momentum and let the
//! visibility sensor settle the index.

use podium_core::StepMode;
use tracing::debug;

use crate::device::DeviceCapabilities;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterKind {
    Pointer,
    Touch,
}

/// Device-policy seam between raw gestures and the navigation machine.
pub trait InputAdapter: Send {
    fn kind(&self) -> AdapterKind;
    fn step_mode(&self) -> StepMode;
}

/// Discrete-step policy for mouse/trackpad surfaces.
pub struct PointerAdapter;

impl InputAdapter for PointerAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Pointer
    }

    fn step_mode(&self) -> StepMode {
        StepMode::Animated
    }
}

/// Native-momentum policy for touch-primary surfaces.
pub struct TouchAdapter;

impl InputAdapter for TouchAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Touch
    }

    fn step_mode(&self) -> StepMode {
        StepMode::NativeMomentum
    }
}

/// Resolve the adapter for the probed capabilities.
pub fn resolve_adapter(caps: DeviceCapabilities) -> Box<dyn InputAdapter> {
    if caps.touch_primary {
        debug!("input adapter: touch (native momentum)");
        Box::new(TouchAdapter)
    } else {
        debug!("input adapter: pointer (discrete snap)");
        Box::new(PointerAdapter)
    }
}

//! Device capability probe
//!
//! Resolved exactly once at startup; everything downstream branches on the
//! resolved adapter, never on raw capabilities.

/// Raw capability readings supplied by the embedding surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceProbe {
    pub max_touch_points: u32,
    pub coarse_pointer: bool,
    pub has_hover: bool,
}

/// Interpreted device capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Any touch input is available.
    pub touch: bool,
    /// Touch is the primary interaction (coarse pointer, no hover).
    pub touch_primary: bool,
    pub has_hover: bool,
}

impl DeviceCapabilities {
    pub fn from_probe(probe: DeviceProbe) -> Self {
        let touch = probe.max_touch_points > 0 || probe.coarse_pointer;
        Self {
            touch,
            touch_primary: touch && !probe.has_hover,
            has_hover: probe.has_hover,
        }
    }

    /// Desktop-style pointer device.
    pub fn pointer() -> Self {
        Self {
            touch: false,
            touch_primary: false,
            has_hover: true,
        }
    }

    /// Phone/tablet-style touch device.
    pub fn touch_primary() -> Self {
        Self {
            touch: true,
            touch_primary: true,
            has_hover: false,
        }
    }
}

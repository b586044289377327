//! Host traits - the seams between the navigation core and the embedding surface
//!
//! The navigation core never touches a renderer, a video element, or a DOM
//! node directly. Everything it needs from the outside world goes through one
//! of these traits:
//!
//! - [`ExhibitHost`] - the 3D exhibit viewer (render scale, loop, controls, camera)
//! - [`MediaHost`] - per-panel ambient media (play/pause by node id)
//! - [`IndicatorHost`] - the section indicator rail (active dot)
//!
//! Hosts are shared as `Arc<Mutex<dyn Trait>>` so reactors and the machine can
//! hold clones. Implementations must not call back into the navigation core;
//! the core drops its own locks before invoking any host method that could
//! re-enter.

use std::sync::{Arc, Mutex};

/// Surface controls for the 3D exhibit viewer.
///
/// All methods are expected to be idempotent: the gate calls them on every
/// phase change without tracking whether the value actually changed.
pub trait ExhibitHost: Send {
    /// Scale the viewer's render resolution (1.0 = full, 0.5 = half).
    fn set_render_scale(&mut self, scale: f32);

    /// Start or stop the viewer's render loop.
    fn set_loop_running(&mut self, running: bool);

    /// Enable or disable local camera controls (orbit/zoom).
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Reset the camera to its home pose.
    fn reset_camera(&mut self);
}

/// Ambient media elements owned by panels (background videos).
pub trait MediaHost: Send {
    fn play(&mut self, node: u64);
    fn pause(&mut self, node: u64);
}

/// The section indicator rail.
pub trait IndicatorHost: Send {
    /// Mark `index` as the active section, clearing the previous one.
    fn set_active(&mut self, index: usize);
}

pub type SharedExhibit = Arc<Mutex<dyn ExhibitHost>>;
pub type SharedMedia = Arc<Mutex<dyn MediaHost>>;
pub type SharedIndicator = Arc<Mutex<dyn IndicatorHost>>;

/// Host that ignores every call. Stands in when a surface has no exhibit.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExhibit;

impl ExhibitHost for NullExhibit {
    fn set_render_scale(&mut self, _scale: f32) {}
    fn set_loop_running(&mut self, _running: bool) {}
    fn set_controls_enabled(&mut self, _enabled: bool) {}
    fn reset_camera(&mut self) {}
}

/// Media host for surfaces without panel videos.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMedia;

impl MediaHost for NullMedia {
    fn play(&mut self, _node: u64) {}
    fn pause(&mut self, _node: u64) {}
}

/// Indicator host for surfaces without an indicator rail.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullIndicator;

impl IndicatorHost for NullIndicator {
    fn set_active(&mut self, _index: usize) {}
}

#[cfg(test)]
pub(crate) mod test_hosts {
    use super::*;

    /// Records every call for assertion in tests.
    #[derive(Debug, Default)]
    pub struct RecordingExhibit {
        pub calls: Vec<ExhibitCall>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum ExhibitCall {
        RenderScale(f32),
        Loop(bool),
        Controls(bool),
        ResetCamera,
    }

    impl ExhibitHost for RecordingExhibit {
        fn set_render_scale(&mut self, scale: f32) {
            self.calls.push(ExhibitCall::RenderScale(scale));
        }
        fn set_loop_running(&mut self, running: bool) {
            self.calls.push(ExhibitCall::Loop(running));
        }
        fn set_controls_enabled(&mut self, enabled: bool) {
            self.calls.push(ExhibitCall::Controls(enabled));
        }
        fn reset_camera(&mut self) {
            self.calls.push(ExhibitCall::ResetCamera);
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingMedia {
        pub playing: Vec<u64>,
        pub paused: Vec<u64>,
    }

    impl MediaHost for RecordingMedia {
        fn play(&mut self, node: u64) {
            self.playing.push(node);
        }
        fn pause(&mut self, node: u64) {
            self.paused.push(node);
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingIndicator {
        pub active: Vec<usize>,
    }

    impl IndicatorHost for RecordingIndicator {
        fn set_active(&mut self, index: usize) {
            self.active.push(index);
        }
    }
}

//! Host-side focus mutation trait
//!
//! The focus subsystem decides which node should hold keyboard focus and
//! which nodes belong to the tab order; the embedder performs the actual
//! platform calls. [`FocusHost`] is that seam. The subsystem is the single
//! writer of focus state, so it mirrors the focused node itself and never
//! needs to query the host back.

use std::sync::{Arc, Mutex};

/// Embedder-side focus operations.
pub trait FocusHost: Send {
    /// Include or exclude a node from the tab order.
    fn set_focusable(&mut self, node: u64, focusable: bool);

    /// Move keyboard focus to a node.
    fn focus(&mut self, node: u64);

    /// Drop keyboard focus entirely.
    fn blur(&mut self);
}

/// Shared handle to the embedder's focus host.
pub type SharedFocus = Arc<Mutex<dyn FocusHost>>;

/// Wraps a focus host for shared use.
pub fn shared_focus<H: FocusHost + 'static>(host: H) -> SharedFocus {
    Arc::new(Mutex::new(host))
}

/// A focus host that ignores every call, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFocus;

impl FocusHost for NullFocus {
    fn set_focusable(&mut self, _node: u64, _focusable: bool) {}
    fn focus(&mut self, _node: u64) {}
    fn blur(&mut self) {}
}

#[cfg(test)]
pub(crate) mod test_host {
    use super::*;

    /// Records every host call for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingFocus {
        pub calls: Vec<FocusCall>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FocusCall {
        Focusable(u64, bool),
        Focus(u64),
        Blur,
    }

    impl FocusHost for RecordingFocus {
        fn set_focusable(&mut self, node: u64, focusable: bool) {
            self.calls.push(FocusCall::Focusable(node, focusable));
        }

        fn focus(&mut self, node: u64) {
            self.calls.push(FocusCall::Focus(node));
        }

        fn blur(&mut self) {
            self.calls.push(FocusCall::Blur);
        }
    }
}

//! Application error types

use thiserror::Error;

/// Errors surfaced while assembling an orchestrator. Once assembly
/// succeeds, the navigation paths absorb their failures internally and
/// never return these.
#[derive(Error, Debug)]
pub enum PodiumError {
    /// Deck validation failed
    #[error("surface assembly failed: {0}")]
    Assembly(#[from] podium_core::SurfaceError),

    /// A focus pool or card rail points at a panel the deck does not have
    #[error("descriptor references missing panel {0}")]
    UnknownPanel(usize),
}

/// Result type for surface assembly
pub type Result<T> = std::result::Result<T, PodiumError>;

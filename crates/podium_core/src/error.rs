//! Surface error types

use thiserror::Error;

/// Errors surfaced while assembling a surface. The navigation paths
/// themselves are absorbing (drop-and-log) and never return these.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// A surface needs at least one panel
    #[error("panel deck is empty")]
    EmptyDeck,

    /// Panel list was not in document order
    #[error("panel order mismatch: expected index {expected}, found {found}")]
    PanelOrder { expected: usize, found: usize },

    /// Tuning overlay was structurally invalid
    #[error("invalid tuning overlay: {0}")]
    Tuning(String),
}

/// Result type for surface assembly
pub type Result<T> = std::result::Result<T, SurfaceError>;

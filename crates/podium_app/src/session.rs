//! Session-scoped persistence
//!
//! The surface persists exactly one thing: whether the intro sequence has
//! already played this session. That flag decides whether the orchestrator
//! arms immediately at construction or waits for the first `LOADER_END`.
//! The store is a trait so embedders can back it with whatever their
//! platform offers; the in-memory implementation covers headless runs and
//! tests.

use rustc_hash::FxHashMap;

/// The only key the navigation core writes.
pub const INTRO_PLAYED_KEY: &str = "podium.intro_played";

/// Session-scoped key/value persistence.
pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Whether the intro sequence already played this session.
pub fn intro_played(store: &dyn SessionStore) -> bool {
    store.get(INTRO_PLAYED_KEY).is_some()
}

pub fn mark_intro_played(store: &mut dyn SessionStore) {
    store.set(INTRO_PLAYED_KEY, "1");
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySession {
    values: FxHashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already carries the intro-played flag, for surfaces that
    /// should arm without waiting for a loader.
    pub fn with_intro_played() -> Self {
        let mut session = Self::default();
        mark_intro_played(&mut session);
        session
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_flag_roundtrip() {
        let mut session = MemorySession::new();
        assert!(!intro_played(&session));
        mark_intro_played(&mut session);
        assert!(intro_played(&session));
    }

    #[test]
    fn test_preseeded_store() {
        let session = MemorySession::with_intro_played();
        assert!(intro_played(&session));
        assert_eq!(session.get(INTRO_PLAYED_KEY).as_deref(), Some("1"));
    }
}

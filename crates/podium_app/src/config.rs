//! Tuning profile file handling
//!
//! The canonical tuning constants live in `SurfaceTuning::default()`; a
//! `podium.toml` next to the embedding application can overlay any subset of
//! them. A missing file is not an error, it just means the canonical values.

use anyhow::{Context, Result};
use podium_core::SurfaceTuning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk tuning overlay (podium.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TuningProfile {
    #[serde(default)]
    pub surface: SurfaceTuning,
}

impl TuningProfile {
    /// Load the profile from a directory (looks for podium.toml) or a file
    /// path. A missing file yields the canonical defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let profile_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join("podium.toml")
        };

        if !profile_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&profile_path)
            .with_context(|| format!("Failed to read {}", profile_path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", profile_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid tuning profile")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize tuning profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overlay_keeps_defaults() {
        let profile = TuningProfile::parse(
            r#"
            [surface]
            step_duration_ms = 500
            wheel_threshold = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(profile.surface.step_duration_ms, 500);
        assert_eq!(profile.surface.wheel_threshold, 30.0);
        // Untouched fields keep the canonical values.
        assert_eq!(profile.surface.link_duration_ms, 750);
        assert_eq!(profile.surface.dominance_ratio, 0.55);
    }

    #[test]
    fn test_empty_profile_is_canonical() {
        let profile = TuningProfile::parse("").unwrap();
        assert_eq!(profile.surface.step_duration_ms, 350);
        assert_eq!(profile.surface.fragment_settle_ms, 50.0);
    }

    #[test]
    fn test_missing_file_is_canonical() {
        let profile = TuningProfile::load_from_dir(Path::new("/nonexistent/dir")).unwrap();
        assert_eq!(profile.surface.touch_step_px, 35.0);
    }

    #[test]
    fn test_malformed_profile_errors() {
        assert!(TuningProfile::parse("[surface\nstep_duration_ms = ").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let profile = TuningProfile::default();
        let toml = profile.to_toml().unwrap();
        let back = TuningProfile::parse(&toml).unwrap();
        assert_eq!(back.surface.step_duration_ms, profile.surface.step_duration_ms);
        assert_eq!(back.surface.collapsed_render_scale, profile.surface.collapsed_render_scale);
    }
}

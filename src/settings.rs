//! Runtime settings
//!
//! Gameplay balance is compile-time (`crate::consts`); this covers how a host
//! runs the game. Stored as JSON; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_FRAME_DELTA_MS;

/// Environment variable naming a settings file (native only)
pub const SETTINGS_ENV: &str = "TORUS_ASTEROIDS_SETTINGS";
/// Settings file looked for in the working directory when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; a fresh system seed is drawn when absent
    pub seed: Option<u64>,
    /// Where the native build keeps the high score
    pub high_score_path: String,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Wall-clock delta cap per frame (ms), so a stalled host doesn't fast-forward
    pub max_frame_delta_ms: f32,
    /// Length of the headless autopilot run (seconds)
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            high_score_path: "torus_asteroids_high_score.txt".to_string(),
            log_filter: "info".to_string(),
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            demo_seconds: 60.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Read a settings file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write a settings file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Settings from `$TORUS_ASTEROIDS_SETTINGS` or `settings.json`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let explicit = std::env::var(SETTINGS_ENV).ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());

        if explicit.is_none() && !Path::new(&path).exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// The page owns configuration on the web
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Clamp values that would stall or break the frame loop
    fn sanitize(&mut self) {
        if !self.max_frame_delta_ms.is_finite() || self.max_frame_delta_ms <= 0.0 {
            self.max_frame_delta_ms = MAX_FRAME_DELTA_MS;
        }
        if !self.demo_seconds.is_finite() || self.demo_seconds < 0.0 {
            self.demo_seconds = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7 }"#).expect("parse");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.max_frame_delta_ms, MAX_FRAME_DELTA_MS);
    }

    #[test]
    fn test_bad_values_are_sanitized() {
        let settings =
            Settings::from_json(r#"{ "max_frame_delta_ms": -3.0, "demo_seconds": -1.0 }"#)
                .expect("parse");
        assert_eq!(settings.max_frame_delta_ms, MAX_FRAME_DELTA_MS);
        assert_eq!(settings.demo_seconds, 0.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ seed: "),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("torus-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(99),
            demo_seconds: 5.0,
            ..Settings::default()
        };
        settings.save_to(&path).expect("save");
        assert_eq!(Settings::load_from(&path).expect("load"), settings);
        let _ = std::fs::remove_file(&path);
    }
}

//! Game settings and tuning
//!
//! Loaded from a JSON file by the driver; every field has a default so a
//! partial file is enough.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::consts::*;

/// Ball integrator tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Per-axis speed clamp
    pub max_speed: f32,
    /// Tilt divisor (higher = less sensitive)
    pub compensator: f32,
    /// Velocity divisor on wall bounce
    pub rebound: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            compensator: COMPENSATOR,
            rebound: REBOUND,
        }
    }
}

/// How the ball radius is derived from the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pixels taken by system bars, not part of the surface
    pub reserved_height: u32,
    /// Surface height in ball radii
    pub surface_ratio: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reserved_height: RESERVED_HEIGHT,
            surface_ratio: SURFACE_RATIO,
        }
    }
}

impl DisplayConfig {
    /// Ball radius in whole pixels for a screen of the given height (never below 1)
    pub fn radius_for_screen_height(&self, screen_height: u32) -> f32 {
        let usable = screen_height.saturating_sub(self.reserved_height);
        let ratio = self.surface_ratio.max(1);
        // Whole pixels: the grid scale follows the integer radius
        (usable / ratio).max(1) as f32
    }
}

/// Shake detector tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Samples averaged per reading
    pub window: u32,
    /// Average jerk that counts as shaking
    pub limit: f64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            window: SHAKE_WINDOW,
            limit: SHAKE_LIMIT,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsTuning,
    pub display: DisplayConfig,
    pub shake: ShakeConfig,
    /// Built-in level indices played in order
    pub campaign: Vec<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            display: DisplayConfig::default(),
            shake: ShakeConfig::default(),
            // Labyrinth 0 is the practice floor, the run starts at 1
            campaign: vec![1, 2, 3],
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::info!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.physics.max_speed, 4.0);
        assert_eq!(settings.physics.compensator, 8.0);
        assert_eq!(settings.physics.rebound, 1.75);
        assert_eq!(settings.shake.window, 50);
        assert_eq!(settings.campaign, vec![1, 2, 3]);
    }

    #[test]
    fn test_radius_for_screen_height() {
        let display = DisplayConfig::default();
        // (643 - 143) / 25
        assert_eq!(display.radius_for_screen_height(643), 20.0);
        // (1080 - 143) / 25 = 37.48, truncated
        assert_eq!(display.radius_for_screen_height(1080), 37.0);
        // Tiny screens never produce a zero radius
        assert_eq!(display.radius_for_screen_height(100), 1.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "physics": { "max_speed": 6.0 } }"#).unwrap();
        assert_eq!(settings.physics.max_speed, 6.0);
        assert_eq!(settings.physics.rebound, REBOUND);
        assert_eq!(settings.display, DisplayConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "tilt_labyrinth_settings_{}.json",
            std::process::id()
        ));
        let mut settings = Settings::default();
        settings.campaign = vec![0, 3];
        settings.shake.limit = 0.5;

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = Path::new("/nonexistent/tilt_labyrinth/settings.json");
        assert_eq!(Settings::load_or_default(path), Settings::default());
    }
}

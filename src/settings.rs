//! Game settings and world tuning
//!
//! Persisted in LocalStorage on the web, read from a JSON file on native.
//! Bad settings never stop the game: they are logged and replaced by defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::WorldParams;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

impl WorldParams {
    /// Reject tunings the simulation can't run sensibly
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("gap_height", self.gap_height),
            ("obstacle_width", self.obstacle_width),
            ("spawn_threshold", self.spawn_threshold),
            ("actor_size", self.actor_size),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a positive number"));
            }
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("speed", self.speed),
            ("actor_spawn_x", self.actor_spawn_x),
            ("impulse_strength", self.impulse_strength),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }

        if self.gravity < 0.0 {
            return Err(invalid("gravity", "must not be negative"));
        }
        if self.speed < 0.0 {
            return Err(invalid("speed", "must not be negative"));
        }
        if self.impulse_strength >= 0.0 {
            return Err(invalid("impulse_strength", "must point up (negative)"));
        }
        if self.gap_height >= self.world_height {
            return Err(invalid("gap_height", "must be smaller than world_height"));
        }
        if self.spawn_threshold > self.world_width {
            return Err(invalid("spawn_threshold", "must not exceed world_width"));
        }
        if self.actor_size * 2.0 >= self.world_height {
            return Err(invalid("actor_size", "actor must fit in the world"));
        }
        Ok(())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World tuning; defaults reproduce the classic game
    pub world: WorldParams,
    /// Fixed session seed (otherwise taken from the clock)
    pub seed: Option<u64>,
    /// Show FPS counter
    pub show_fps: bool,
    /// Start in idle/demo mode
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldParams::default(),
            seed: None,
            show_fps: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_settings";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.world.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Read settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.world, WorldParams::default());
    }

    #[test]
    fn test_partial_world_override() {
        let settings =
            Settings::from_json(r#"{"world": {"gravity": 0.25, "clamp_resets_velocity": true}, "seed": 9}"#)
                .unwrap();
        assert_eq!(settings.world.gravity, 0.25);
        assert!(settings.world.clamp_resets_velocity);
        assert_eq!(settings.world.speed, crate::consts::SCROLL_SPEED);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.autopilot = true;
        settings.world.gap_height = 180.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_world() {
        let err = Settings::from_json(r#"{"world": {"gap_height": 600.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "gap_height",
                ..
            }
        ));

        let err = Settings::from_json(r#"{"world": {"impulse_strength": 6.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "impulse_strength",
                ..
            }
        ));

        let world = WorldParams {
            world_width: f32::NAN,
            ..WorldParams::default()
        };
        assert!(world.validate().is_err());
    }

    #[test]
    fn test_fallback_to_default() {
        let settings = Settings::from_json_or_default(r#"{"world": {"actor_size": -1.0}}"#);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_error_messages() {
        let err = invalid("speed", "must not be negative");
        assert_eq!(err.to_string(), "invalid speed: must not be negative");
    }

    #[test]
    fn test_default_world_is_valid() {
        assert!(WorldParams::default().validate().is_ok());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from_path(std::path::Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}

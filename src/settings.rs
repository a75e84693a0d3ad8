//! Game settings
//!
//! Layout, timing and palette. Loaded from an optional JSON file; every field
//! falls back to its default.

use std::path::Path;
use std::time::Duration;
use std::{env, fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::renderer::Palette;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "PINBALL_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed sleep between loop iterations
    pub frame_interval_ms: u64,

    // === Ball ===
    pub ball_radius: f32,
    /// Initial per-tick displacement [x, y]
    pub ball_speed: [f32; 2],

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between each paddle and its side wall
    pub paddle_inset: f32,
    /// Paddle top edge sits this far above the arena floor
    pub paddle_bottom_offset: f32,

    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_INTERVAL_MS,

            ball_radius: BALL_RADIUS,
            ball_speed: [BALL_SPEED_X, BALL_SPEED_Y],

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            palette: Palette::default(),
        }
    }
}

impl Settings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would break the simulation or spin the loop
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(msg)) };

        if self.frame_interval_ms == 0 {
            return invalid("frame_interval_ms must be at least 1".into());
        }
        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            return invalid(format!("ball_radius must be positive, got {}", self.ball_radius));
        }
        if !self.ball_speed.iter().all(|v| v.is_finite()) {
            return invalid(format!("ball_speed must be finite, got {:?}", self.ball_speed));
        }
        for (name, value) in [
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{} must be positive, got {}", name, value));
            }
        }
        for (name, value) in [
            ("paddle_inset", self.paddle_inset),
            ("paddle_bottom_offset", self.paddle_bottom_offset),
        ] {
            if !value.is_finite() {
                return invalid(format!("{} must be finite, got {}", name, value));
            }
        }
        Ok(())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `$PINBALL_SETTINGS`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", Path::new(&path).display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Rgba;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.frame_interval(), Duration::from_millis(16));
        assert_eq!(settings.ball_radius, 30.0);
        assert_eq!(settings.ball_speed, [5.0, 5.0]);
        assert_eq!(settings.palette.paddle_pressed, Rgba::YELLOW);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(
            r#"{ "frame_interval_ms": 8, "palette": { "ball": { "r": 0, "g": 255, "b": 0, "a": 255 } } }"#,
        )
        .unwrap();

        assert_eq!(settings.frame_interval_ms, 8);
        assert_eq!(settings.palette.ball, Rgba::rgb(0, 255, 0));
        assert_eq!(settings.palette.background, Rgba::BLACK);
        assert_eq!(settings.paddle_width, 200.0);
    }

    #[test]
    fn test_bad_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        for json in [r#"{ "ball_radius": -30.0 }"#, r#"{ "ball_radius": 0.0 }"#] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid(_)), "{}", json);
        }
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Settings::from_json(r#"{ "frame_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_paddle_size() {
        for json in [
            r#"{ "paddle_width": 0.0 }"#,
            r#"{ "paddle_width": -200.0 }"#,
            r#"{ "paddle_height": 0.0 }"#,
            r#"{ "paddle_height": -1.0 }"#,
        ] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid(_)), "{}", json);
        }
    }

    #[test]
    fn test_rejects_non_finite_speed() {
        // JSON has no literal for infinity; build it directly
        let settings = Settings {
            ball_speed: [f32::INFINITY, 5.0],
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let settings = Settings {
            ball_speed: [5.0, f32::NAN],
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = env::temp_dir().join(format!("pinball-invalid-{}.json", std::process::id()));
        fs::write(&path, r#"{ "ball_radius": -30.0 }"#).unwrap();

        let result = Settings::load_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_from("/nonexistent/pinball.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let path = env::temp_dir().join(format!("pinball-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.paddle_inset = 40.0;
        fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}

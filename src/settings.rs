//! Game settings and tuning
//!
//! Every balance constant lives here so a run can be reconfigured from a JSON
//! file without rebuilding. `Default` reproduces the values in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Exponential smoothing factor in (0, 1]
    pub paddle_smoothing: f32,
    pub paddle_start_offset: f32,
    /// Height of the movement zone as a fraction of the field height
    pub zone_height_fraction: f32,
    pub zone_side_margin: f32,
    pub zone_bottom_margin: f32,

    // === Spawning ===
    /// Per-frame probability of spawning one object
    pub spawn_chance: f64,
    /// Probability that a spawned object is a reward
    pub reward_chance: f64,
    pub reward_radius: f32,
    pub hazard_radius: f32,
    pub base_fall_speed: f32,
    pub fall_speed_per_level: f32,

    // === Scoring ===
    pub reward_points: u32,
    pub hazard_penalty: u32,
    pub starting_lives: u32,
    pub max_missed_rewards: u32,
    /// Ascending score thresholds; level = 1 + number of thresholds reached
    pub level_thresholds: Vec<u32>,

    // === Tracking ===
    pub max_hands: usize,
    /// Mirror detector x coordinates (camera feed is shown mirrored)
    pub mirror: bool,

    /// Fixed RNG seed; a fresh one is drawn per session when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_smoothing: PADDLE_SMOOTHING,
            paddle_start_offset: PADDLE_START_OFFSET,
            zone_height_fraction: ZONE_HEIGHT_FRACTION,
            zone_side_margin: ZONE_SIDE_MARGIN,
            zone_bottom_margin: ZONE_BOTTOM_MARGIN,

            spawn_chance: SPAWN_CHANCE,
            reward_chance: REWARD_CHANCE,
            reward_radius: REWARD_RADIUS,
            hazard_radius: HAZARD_RADIUS,
            base_fall_speed: BASE_FALL_SPEED,
            fall_speed_per_level: FALL_SPEED_PER_LEVEL,

            reward_points: REWARD_POINTS,
            hazard_penalty: HAZARD_PENALTY,
            starting_lives: STARTING_LIVES,
            max_missed_rewards: MAX_MISSED_REWARDS,
            level_thresholds: LEVEL_THRESHOLDS.to_vec(),

            max_hands: MAX_HANDS,
            mirror: true,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Check that the geometry and probabilities describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return invalid("field_width", "field dimensions must be positive");
        }
        if !(self.paddle_width > 0.0 && self.paddle_height > 0.0) {
            return invalid("paddle_width", "paddle dimensions must be positive");
        }
        if !(self.zone_side_margin >= 0.0 && self.zone_bottom_margin >= 0.0) {
            return invalid("zone_side_margin", "margins must keep the paddle inside the field");
        }
        if self.paddle_width + 2.0 * self.zone_side_margin > self.field_width {
            return invalid("zone_side_margin", "paddle does not fit between the margins");
        }
        if !(self.paddle_smoothing > 0.0 && self.paddle_smoothing <= 1.0) {
            return invalid("paddle_smoothing", "must be in (0, 1]");
        }
        if !(self.zone_height_fraction > 0.0 && self.zone_height_fraction <= 1.0) {
            return invalid("zone_height_fraction", "must be in (0, 1]");
        }
        let zone_top = self.field_height * (1.0 - self.zone_height_fraction);
        if zone_top > self.field_height - self.paddle_height - self.zone_bottom_margin {
            return invalid("zone_height_fraction", "movement zone is shorter than the paddle");
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return invalid("spawn_chance", "must be a probability");
        }
        if !(0.0..=1.0).contains(&self.reward_chance) {
            return invalid("reward_chance", "must be a probability");
        }
        let widest = self.reward_radius.max(self.hazard_radius);
        if !(self.reward_radius > 0.0 && self.hazard_radius > 0.0) || 2.0 * widest > self.field_width {
            return invalid("reward_radius", "object radii must be positive and fit the field");
        }
        if !(self.base_fall_speed > 0.0 && self.fall_speed_per_level >= 0.0) {
            return invalid("base_fall_speed", "objects must fall downward");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.max_missed_rewards == 0 {
            return invalid("max_missed_rewards", "must be at least 1");
        }
        if self.level_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return invalid("level_thresholds", "must be strictly ascending");
        }
        if self.max_hands == 0 {
            return invalid("max_hands", "must track at least one hand");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.level_thresholds, vec![50, 150, 300]);
        assert_eq!(settings.starting_lives, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json_str(r#"{ "spawn_chance": 0.5, "seed": 7 }"#).unwrap();
        assert_eq!(settings.spawn_chance, 0.5);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.paddle_width, PADDLE_WIDTH);
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let err = Settings::from_json_str(r#"{ "level_thresholds": [50, 50, 300] }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "level_thresholds",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let settings = Settings {
            reward_chance: 1.5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_margins() {
        let json = r#"{ "zone_bottom_margin": -100.0, "zone_side_margin": -50.0 }"#;
        let err = Settings::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "zone_side_margin",
                ..
            }
        ));

        let settings = Settings {
            zone_bottom_margin: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_non_falling_speeds() {
        for (base, per_level) in [(0.0, 0.8), (f32::NAN, 0.8), (1.5, -0.1), (1.5, f32::NAN)] {
            let settings = Settings {
                base_fall_speed: base,
                fall_speed_per_level: per_level,
                ..Default::default()
            };
            assert!(
                matches!(
                    settings.validate(),
                    Err(ConfigError::Invalid {
                        field: "base_fall_speed",
                        ..
                    })
                ),
                "base {base}, per level {per_level}"
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Some(Path::new("/nonexistent/handcatch.json")));
        assert_eq!(settings, Settings::default());
    }
}

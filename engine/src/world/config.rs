//! World Configuration
//!
//! Level-layout parameters the tick driver needs besides the physics
//! constants: where the run starts, where the default ground plane sits,
//! how long the level is and how big the player is.
//!
//! Like [`crate::player::PhysicsConfig`], a `WorldConfig` is supplied once per
//! session and never changes mid-tick.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, require_finite, require_non_negative, require_positive};

use super::speed::SpeedTier;

/// Default ground-plane tolerance band in units.
pub const DEFAULT_GROUND_TOLERANCE: f32 = 2.0;

/// Default player edge length in units (one grid block).
pub const DEFAULT_PLAYER_SIZE: f32 = 30.0;

/// Level layout for one session.
///
/// `+Y` is down, so the playable area is `y < ground_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Horizontal position at music time zero
    pub start_x: f32,
    /// Spawn center Y; `None` rests the player on the ground plane
    pub spawn_y: Option<f32>,
    /// Default ground plane; `None` disables it
    pub ground_y: Option<f32>,
    /// Distance above the ground plane that still counts as grounded
    pub ground_tolerance: f32,
    /// Horizontal length of the level, used for progress
    pub level_length: f32,
    /// Visual edge length of the (square) player
    pub player_size: f32,
    /// Speed tier at level start
    pub start_speed: SpeedTier,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            spawn_y: None,
            ground_y: Some(0.0),
            ground_tolerance: DEFAULT_GROUND_TOLERANCE,
            level_length: 6000.0,
            player_size: DEFAULT_PLAYER_SIZE,
            start_speed: SpeedTier::Normal,
        }
    }
}

impl WorldConfig {
    /// Parses a (possibly partial) JSON document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field is usable by the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("start_x", self.start_x)?;
        if let Some(spawn_y) = self.spawn_y {
            require_finite("spawn_y", spawn_y)?;
        }
        if let Some(ground_y) = self.ground_y {
            require_finite("ground_y", ground_y)?;
        }
        require_non_negative("ground_tolerance", self.ground_tolerance)?;
        require_non_negative("level_length", self.level_length)?;
        require_positive("player_size", self.player_size)?;
        Ok(())
    }

    /// Level completion fraction for a horizontal position, clamped to `[0, 1]`.
    ///
    /// Returns 0 for a zero-length level.
    pub fn progress_at(&self, x: f32) -> f32 {
        if self.level_length <= 0.0 {
            return 0.0;
        }
        ((x - self.start_x) / self.level_length).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = WorldConfig::default();
        assert_eq!(config.start_x, 0.0);
        assert_eq!(config.ground_y, Some(0.0));
        assert_eq!(config.ground_tolerance, 2.0);
        assert_eq!(config.player_size, 30.0);
        assert_eq!(config.start_speed, SpeedTier::Normal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            WorldConfig::from_json_str(r#"{ "level_length": 1200.0, "start_speed": "fast" }"#)
                .unwrap();
        assert_eq!(config.level_length, 1200.0);
        assert_eq!(config.start_speed, SpeedTier::Fast);
        assert_eq!(config.player_size, DEFAULT_PLAYER_SIZE);
    }

    #[test]
    fn test_rejects_zero_player_size() {
        let err = WorldConfig::from_json_str(r#"{ "player_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "player_size" }));
    }

    #[test]
    fn test_progress_clamps() {
        let config = WorldConfig {
            start_x: 100.0,
            level_length: 1000.0,
            ..WorldConfig::default()
        };
        assert_eq!(config.progress_at(50.0), 0.0);
        assert_eq!(config.progress_at(600.0), 0.5);
        assert_eq!(config.progress_at(5000.0), 1.0);

        let empty = WorldConfig {
            level_length: 0.0,
            ..WorldConfig::default()
        };
        assert_eq!(empty.progress_at(10.0), 0.0);
    }
}

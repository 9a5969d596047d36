//! Player physics constants and configuration.
//!
//! This module defines the session-wide physics parameters shared by every
//! movement mode. Mode-specific scaling (ship gravity, ship terminal
//! velocity, ball impulse) is applied on top of these values by the modes.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, require_non_negative, require_positive};

/// Physics constants for the player.
///
/// Supplied once per session and immutable for its duration. Replacing it
/// means building a new tick driver.
///
/// # Example
///
/// ```ignore
/// use pulse_runner_engine::player::PhysicsConfig;
///
/// // Use default physics
/// let physics = PhysicsConfig::default();
///
/// // Floatier jumps
/// let floaty = PhysicsConfig {
///     gravity: 1800.0,
///     ..PhysicsConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration in units per second squared.
    pub gravity: f32,

    /// Initial vertical speed of a jump in units per second.
    pub jump_force: f32,

    /// Maximum vertical speed in units per second (before mode scaling).
    pub terminal_velocity: f32,

    /// Seconds after leaving the ground during which a jump still succeeds.
    pub coyote_time: f32,

    /// Seconds an early jump press stays queued waiting for a landing.
    pub jump_buffer_time: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 2600.0,          // units/sec²
            jump_force: 800.0,        // units/sec
            terminal_velocity: 1200.0, // units/sec
            coyote_time: 0.08,        // 80 ms
            jump_buffer_time: 0.1,    // 100 ms
        }
    }
}

impl PhysicsConfig {
    /// Creates a PhysicsConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a (possibly partial) JSON document and validates it.
    ///
    /// Missing fields keep their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every constant is finite and in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("gravity", self.gravity)?;
        require_non_negative("jump_force", self.jump_force)?;
        require_positive("terminal_velocity", self.terminal_velocity)?;
        require_non_negative("coyote_time", self.coyote_time)?;
        require_positive("jump_buffer_time", self.jump_buffer_time)?;
        Ok(())
    }

    /// Terminal velocity after applying a mode's scale factor.
    pub fn terminal_velocity_scaled(&self, scale: f32) -> f32 {
        self.terminal_velocity * scale
    }
}

//! Player Physics State
//!
//! The single mutable record of the simulation. It is owned by the tick
//! driver for the whole activation (level start or respawn) and lent by
//! `&mut` to exactly one movement-mode strategy per tick.
//!
//! # Units
//!
//! - Position/velocity in units and units/second, `+Y` down
//! - Rotation in degrees, always within `[0, 360)`
//! - Timers in seconds

use serde::{Deserialize, Serialize};

use crate::physics::types::Vec2;
use crate::world::SpeedTier;

/// Identifier of a movement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeId {
    #[default]
    Cube,
    Ship,
    Ball,
}

impl ModeId {
    pub fn name(self) -> &'static str {
        match self {
            ModeId::Cube => "cube",
            ModeId::Ship => "ship",
            ModeId::Ball => "ball",
        }
    }
}

/// Per-player kinematic state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsState {
    /// Player center
    pub position: Vec2,
    /// `x` mirrors the active speed tier; `y` is integrated by the mode
    pub velocity: Vec2,
    pub is_grounded: bool,
    pub gravity_inverted: bool,
    /// Visual rotation in degrees, `[0, 360)`
    pub rotation: f32,
    /// Degrees per second
    pub angular_velocity: f32,
    /// Coyote grace remaining; nonzero only while airborne
    pub coyote_time_remaining: f32,
    /// Jump-buffer grace remaining; positive whenever `jump_buffered`
    pub jump_buffer_time_remaining: f32,
    pub jump_buffered: bool,
    /// Terminal: the state is frozen until an external reset/respawn
    pub is_dead: bool,
    pub mode: ModeId,
    pub speed: SpeedTier,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self::new(Vec2::ZERO, SpeedTier::Normal)
    }
}

impl PhysicsState {
    /// Fresh, grounded, upright Cube state at `position`.
    pub fn new(position: Vec2, speed: SpeedTier) -> Self {
        Self {
            position,
            velocity: Vec2::new(speed.units_per_second(), 0.0),
            is_grounded: true,
            gravity_inverted: false,
            rotation: 0.0,
            angular_velocity: 0.0,
            coyote_time_remaining: 0.0,
            jump_buffer_time_remaining: 0.0,
            jump_buffered: false,
            is_dead: false,
            mode: ModeId::Cube,
            speed,
        }
    }

    /// `+1.0` when gravity pulls toward `+Y` (down), `-1.0` when inverted.
    pub fn gravity_sign(&self) -> f32 {
        if self.gravity_inverted { -1.0 } else { 1.0 }
    }

    /// Clears both input grace timers.
    pub fn clear_grace_timers(&mut self) {
        self.coyote_time_remaining = 0.0;
        self.jump_buffer_time_remaining = 0.0;
        self.jump_buffered = false;
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

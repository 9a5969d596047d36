//! Checkpoints
//!
//! A checkpoint is a snapshot of the parts of the player state needed to
//! resume a run mid-level: where the player was, how it was moving, which
//! mode/gravity/speed was active and the music time to seek the audio to.
//! Keeping checkpoints across sessions is the caller's business.

use serde::{Deserialize, Serialize};

use crate::physics::types::Vec2;
use crate::player::{ModeId, PhysicsState};
use crate::world::SpeedTier;

/// Resumable snapshot of a live player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub position: Vec2,
    pub velocity_y: f32,
    pub is_grounded: bool,
    pub gravity_inverted: bool,
    pub mode: ModeId,
    pub speed: SpeedTier,
    /// Music time the audio should be sought to on respawn
    pub music_time: f32,
}

impl Checkpoint {
    /// Captures a checkpoint from a state at `music_time`.
    pub fn capture(state: &PhysicsState, music_time: f32) -> Self {
        Self {
            position: state.position,
            velocity_y: state.velocity.y,
            is_grounded: state.is_grounded,
            gravity_inverted: state.gravity_inverted,
            mode: state.mode,
            speed: state.speed,
            music_time,
        }
    }

    /// A fresh live state matching this checkpoint (mode hooks not yet run).
    pub fn to_state(&self) -> PhysicsState {
        let mut state = PhysicsState::new(self.position, self.speed);
        state.velocity.y = self.velocity_y;
        state.is_grounded = self.is_grounded;
        state.gravity_inverted = self.gravity_inverted;
        state.mode = self.mode;
        state
    }
}

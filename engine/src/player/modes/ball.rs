//! Ball Mode
//!
//! Rolls under the cube's gravity law. A jump press while grounded flips
//! gravity and kicks the ball toward the new "down" with half the jump force.
//! Rotation is a roll derived from horizontal speed: one full turn per
//! visual diameter of travel. The roll distance is fixed at the default
//! player size and does not follow `WorldConfig::player_size`.

use tracing::trace;

use crate::input::InputState;
use crate::player::config::PhysicsConfig;
use crate::player::state::{ModeId, PhysicsState, wrap_degrees};
use crate::world::DEFAULT_PLAYER_SIZE;

use super::{MovementStrategy, apply_gravity, clamp_vertical, integrate_vertical};

/// Fraction of the configured jump force applied on a gravity flip.
pub const BALL_IMPULSE_SCALE: f32 = 0.5;

/// Horizontal travel per full roll: one visual diameter.
pub const BALL_ROLL_DISTANCE: f32 = DEFAULT_PLAYER_SIZE;

/// Gravity-flipping rolling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BallMode;

impl BallMode {
    /// Roll rate in degrees per second for a horizontal speed.
    pub fn roll_rate(horizontal_speed: f32, gravity_sign: f32) -> f32 {
        gravity_sign * horizontal_speed / BALL_ROLL_DISTANCE * 360.0
    }

    /// Flips gravity and applies the reduced impulse toward the new down.
    pub fn flip(state: &mut PhysicsState, config: &PhysicsConfig) {
        state.gravity_inverted = !state.gravity_inverted;
        state.velocity.y = state.gravity_sign() * config.jump_force * BALL_IMPULSE_SCALE;
        state.is_grounded = false;
        trace!(inverted = state.gravity_inverted, "ball: gravity flip");
    }
}

impl MovementStrategy for BallMode {
    fn id(&self) -> ModeId {
        ModeId::Ball
    }

    fn update(
        &self,
        state: &mut PhysicsState,
        input: &InputState,
        dt: f32,
        config: &PhysicsConfig,
    ) {
        if state.is_dead {
            return;
        }

        let terminal = config.terminal_velocity_scaled(self.terminal_velocity_scale());
        apply_gravity(state, config.gravity, terminal, dt);

        if input.jump_pressed && state.is_grounded {
            Self::flip(state, config);
            clamp_vertical(state, terminal);
        }

        state.clear_grace_timers();

        state.angular_velocity = Self::roll_rate(state.velocity.x, state.gravity_sign());
        state.rotation = wrap_degrees(state.rotation + state.angular_velocity * dt);

        integrate_vertical(state, dt);
    }

    fn on_enter(&self, state: &mut PhysicsState, _config: &PhysicsConfig) {
        state.mode = ModeId::Ball;
        state.clear_grace_timers();
        state.angular_velocity = 0.0;
    }

    fn on_exit(&self, state: &mut PhysicsState) {
        trace!(rotation = state.rotation, "ball: exit");
    }
}

//! Ship Mode
//!
//! Continuous flight: holding jump thrusts against gravity, releasing lets a
//! reduced gravity pull the ship back. There is no discrete jump, so the
//! coyote and buffer timers stay cleared.
//!
//! The visual tilt follows vertical velocity and eases toward its target at
//! a damping rate defined per nominal 60 Hz update, so the easing is the same
//! at any frame rate.

use tracing::trace;

use crate::input::InputState;
use crate::player::config::PhysicsConfig;
use crate::player::state::{ModeId, PhysicsState, wrap_degrees};

use super::{MovementStrategy, clamp_vertical, integrate_vertical};

/// Ship gravity as a fraction of the configured gravity.
pub const SHIP_GRAVITY_SCALE: f32 = 0.4;

/// Ship terminal velocity as a fraction of the configured terminal velocity.
pub const SHIP_TERMINAL_SCALE: f32 = 0.8;

/// Upward thrust in units per second squared while jump is held.
pub const SHIP_THRUST: f32 = 1600.0;

/// Vertical speed that maps to the full tilt.
pub const SHIP_TILT_REFERENCE_SPEED: f32 = 600.0;

/// Maximum tilt in degrees either way.
pub const SHIP_MAX_TILT: f32 = 30.0;

/// Fraction of the remaining tilt error removed per 1/60 s.
pub const SHIP_TILT_DAMPING: f32 = 0.15;

/// Nominal update rate the damping is expressed against.
const NOMINAL_RATE: f32 = 60.0;

/// Thrust-based flying mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShipMode;

impl ShipMode {
    /// Tilt target in signed degrees for a vertical velocity.
    pub fn target_tilt(velocity_y: f32, gravity_sign: f32) -> f32 {
        let tilt = (velocity_y / SHIP_TILT_REFERENCE_SPEED * SHIP_MAX_TILT)
            .clamp(-SHIP_MAX_TILT, SHIP_MAX_TILT);
        tilt * gravity_sign
    }
}

/// Maps `[0, 360)` to `(-180, 180]`.
fn signed_degrees(rotation: f32) -> f32 {
    if rotation > 180.0 { rotation - 360.0 } else { rotation }
}

impl MovementStrategy for ShipMode {
    fn id(&self) -> ModeId {
        ModeId::Ship
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

        let sign = state.gravity_sign();
        if input.jump_held {
            state.velocity.y -= sign * SHIP_THRUST * dt;
        } else {
            state.velocity.y += sign * config.gravity * SHIP_GRAVITY_SCALE * dt;
        }
        clamp_vertical(
            state,
            config.terminal_velocity_scaled(self.terminal_velocity_scale()),
        );

        state.clear_grace_timers();

        let current = signed_degrees(state.rotation);
        let target = Self::target_tilt(state.velocity.y, sign);
        let blend = (SHIP_TILT_DAMPING * dt * NOMINAL_RATE).min(1.0);
        let eased = current + (target - current) * blend;
        state.angular_velocity = if dt > 0.0 { (eased - current) / dt } else { 0.0 };
        state.rotation = wrap_degrees(eased);

        integrate_vertical(state, dt);
    }

    fn on_enter(&self, state: &mut PhysicsState, config: &PhysicsConfig) {
        state.mode = ModeId::Ship;
        state.clear_grace_timers();
        state.rotation = 0.0;
        clamp_vertical(
            state,
            config.terminal_velocity_scaled(self.terminal_velocity_scale()),
        );
    }

    fn on_exit(&self, state: &mut PhysicsState) {
        trace!(velocity_y = state.velocity.y, "ship: exit");
    }

    fn terminal_velocity_scale(&self) -> f32 {
        SHIP_TERMINAL_SCALE
    }
}

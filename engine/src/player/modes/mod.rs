//! Movement Modes
//!
//! Each mode owns the vertical and rotational physics law for one player
//! form. Modes are zero-sized and stateless: every per-player value lives in
//! [`PhysicsState`], which the active mode mutates in place.
//!
//! # Contract
//!
//! - [`MovementStrategy::update`] mutates the state for one tick and must do
//!   nothing once `state.is_dead` is set.
//! - [`MovementStrategy::on_enter`] / [`MovementStrategy::on_exit`] run exactly
//!   once at a mode-switch boundary. `on_enter` sets `state.mode`, clears the
//!   coyote and jump-buffer timers and resets the mode's visual state.
//!
//! [`MovementMode`] is the closed set of modes, dispatched by `match`.

pub mod ball;
pub mod cube;
pub mod ship;

use static_assertions::assert_eq_size;

pub use ball::{BALL_ROLL_DISTANCE, BALL_IMPULSE_SCALE, BallMode};
pub use cube::{CUBE_SPIN_RATE, CubeMode};
pub use ship::{
    SHIP_GRAVITY_SCALE, SHIP_MAX_TILT, SHIP_TERMINAL_SCALE, SHIP_THRUST, SHIP_TILT_DAMPING,
    SHIP_TILT_REFERENCE_SPEED, ShipMode,
};

use crate::input::InputState;

use super::config::PhysicsConfig;
use super::state::{ModeId, PhysicsState};

assert_eq_size!(CubeMode, ());
assert_eq_size!(ShipMode, ());
assert_eq_size!(BallMode, ());

/// Shared four-operation contract of every movement mode.
pub trait MovementStrategy {
    /// Which mode this is.
    fn id(&self) -> ModeId;

    /// Advances vertical and rotational physics by `dt` seconds.
    fn update(
        &self,
        state: &mut PhysicsState,
        input: &InputState,
        dt: f32,
        config: &PhysicsConfig,
    );

    /// Called once when this mode becomes active.
    fn on_enter(&self, state: &mut PhysicsState, config: &PhysicsConfig);

    /// Called once when this mode stops being active.
    fn on_exit(&self, state: &mut PhysicsState);

    /// Multiplier applied to the configured terminal velocity.
    fn terminal_velocity_scale(&self) -> f32 {
        1.0
    }
}

/// The closed set of movement modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    Cube(CubeMode),
    Ship(ShipMode),
    Ball(BallMode),
}

impl MovementMode {
    /// The mode instance for an id.
    pub fn from_id(id: ModeId) -> Self {
        match id {
            ModeId::Cube => MovementMode::Cube(CubeMode),
            ModeId::Ship => MovementMode::Ship(ShipMode),
            ModeId::Ball => MovementMode::Ball(BallMode),
        }
    }

    fn strategy(&self) -> &dyn MovementStrategy {
        match self {
            MovementMode::Cube(mode) => mode,
            MovementMode::Ship(mode) => mode,
            MovementMode::Ball(mode) => mode,
        }
    }
}

impl Default for MovementMode {
    fn default() -> Self {
        MovementMode::Cube(CubeMode)
    }
}

impl MovementStrategy for MovementMode {
    fn id(&self) -> ModeId {
        self.strategy().id()
    }

    fn update(
        &self,
        state: &mut PhysicsState,
        input: &InputState,
        dt: f32,
        config: &PhysicsConfig,
    ) {
        self.strategy().update(state, input, dt, config);
    }

    fn on_enter(&self, state: &mut PhysicsState, config: &PhysicsConfig) {
        self.strategy().on_enter(state, config);
    }

    fn on_exit(&self, state: &mut PhysicsState) {
        self.strategy().on_exit(state);
    }

    fn terminal_velocity_scale(&self) -> f32 {
        self.strategy().terminal_velocity_scale()
    }
}

/// Applies signed gravity for one tick and clamps to `terminal`.
pub(crate) fn apply_gravity(state: &mut PhysicsState, gravity: f32, terminal: f32, dt: f32) {
    state.velocity.y += state.gravity_sign() * gravity * dt;
    clamp_vertical(state, terminal);
}

/// Clamps `|velocity.y|` to `terminal`.
pub(crate) fn clamp_vertical(state: &mut PhysicsState, terminal: f32) {
    state.velocity.y = state.velocity.y.clamp(-terminal, terminal);
}

/// Integrates vertical position from vertical velocity.
pub(crate) fn integrate_vertical(state: &mut PhysicsState, dt: f32) {
    state.position.y += state.velocity.y * dt;
}

//! Cube Mode
//!
//! The default mode: discrete jumps with coyote time and a jump buffer.
//!
//! # Per-Tick Order
//!
//! 1. Signed gravity, clamped to terminal velocity
//! 2. Grace timers: coyote decrements while airborne, the buffer decrements
//!    while queued and clears at zero
//! 3. A queued jump fires if the player is grounded (buffered landing)
//! 4. Jump-press edge: jump if grounded or within coyote time, else queue it
//! 5. Jump held while grounded and not moving away from the ground: jump
//! 6. Rotation: spin while airborne, snap to the nearest 90° when grounded
//! 7. Vertical position integration

use tracing::trace;

use crate::input::InputState;
use crate::player::config::PhysicsConfig;
use crate::player::state::{ModeId, PhysicsState, wrap_degrees};

use super::{MovementStrategy, apply_gravity, clamp_vertical, integrate_vertical};

/// Airborne spin in degrees per second (signed by gravity direction).
pub const CUBE_SPIN_RATE: f32 = 420.0;

/// Discrete-jump movement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CubeMode;

impl CubeMode {
    /// Whether a jump may start now.
    pub fn can_jump(state: &PhysicsState) -> bool {
        state.is_grounded || state.coyote_time_remaining > 0.0
    }

    /// Starts a jump: signed impulse, leaves the ground, spends coyote time.
    ///
    /// The impulse never exceeds the cube's terminal velocity.
    pub fn execute_jump(state: &mut PhysicsState, config: &PhysicsConfig) {
        let sign = state.gravity_sign();
        state.velocity.y = -sign * config.jump_force;
        clamp_vertical(state, config.terminal_velocity_scaled(CubeMode.terminal_velocity_scale()));
        state.is_grounded = false;
        state.coyote_time_remaining = 0.0;
        state.angular_velocity = sign * CUBE_SPIN_RATE;
    }

    fn tick_grace_timers(state: &mut PhysicsState, dt: f32) {
        if !state.is_grounded {
            state.coyote_time_remaining = (state.coyote_time_remaining - dt).max(0.0);
        }
        if state.jump_buffered {
            state.jump_buffer_time_remaining = (state.jump_buffer_time_remaining - dt).max(0.0);
            if state.jump_buffer_time_remaining <= 0.0 {
                state.jump_buffered = false;
            }
        }
    }

    fn clear_buffer(state: &mut PhysicsState) {
        state.jump_buffered = false;
        state.jump_buffer_time_remaining = 0.0;
    }
}

impl MovementStrategy for CubeMode {
    fn id(&self) -> ModeId {
        ModeId::Cube
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

        Self::tick_grace_timers(state, dt);

        let mut jumped = false;
        if state.is_grounded && state.jump_buffered {
            trace!("cube: buffered jump on landing");
            Self::clear_buffer(state);
            Self::execute_jump(state, config);
            jumped = true;
        }

        if !jumped {
            if input.jump_pressed {
                if Self::can_jump(state) {
                    Self::clear_buffer(state);
                    Self::execute_jump(state, config);
                } else {
                    state.jump_buffered = true;
                    state.jump_buffer_time_remaining = config.jump_buffer_time;
                }
            } else if input.jump_held
                && state.is_grounded
                && state.velocity.y * state.gravity_sign() >= 0.0
            {
                Self::execute_jump(state, config);
            }
        }

        if state.is_grounded {
            state.rotation = wrap_degrees((state.rotation / 90.0).round() * 90.0);
            state.angular_velocity = 0.0;
        } else {
            state.rotation = wrap_degrees(state.rotation + state.angular_velocity * dt);
        }

        integrate_vertical(state, dt);
    }

    fn on_enter(&self, state: &mut PhysicsState, _config: &PhysicsConfig) {
        state.mode = ModeId::Cube;
        state.clear_grace_timers();
        if state.is_grounded {
            state.angular_velocity = 0.0;
        }
    }

    fn on_exit(&self, state: &mut PhysicsState) {
        trace!(rotation = state.rotation, "cube: exit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::types::Vec2;
    use crate::world::SpeedTier;

    const DT: f32 = 1.0 / 60.0;

    fn grounded_state() -> PhysicsState {
        PhysicsState::new(Vec2::new(0.0, -13.5), SpeedTier::Normal)
    }

    fn press() -> InputState {
        InputState {
            jump_pressed: true,
            jump_held: true,
        }
    }

    #[test]
    fn test_jump_from_ground() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        CubeMode.update(&mut state, &press(), DT, &config);
        assert_eq!(state.velocity.y, -800.0);
        assert!(!state.is_grounded);
        assert_eq!(state.angular_velocity, CUBE_SPIN_RATE);
        assert!(state.position.y < -13.5);
    }

    #[test]
    fn test_jump_force_above_terminal_is_clamped() {
        let config = PhysicsConfig {
            jump_force: 1500.0,
            ..PhysicsConfig::default()
        };
        assert!(config.validate().is_ok());

        let mut state = grounded_state();
        CubeMode.update(&mut state, &press(), DT, &config);
        assert_eq!(state.velocity.y, -config.terminal_velocity);

        let mut state = grounded_state();
        state.gravity_inverted = true;
        CubeMode.update(&mut state, &press(), DT, &config);
        assert_eq!(state.velocity.y, config.terminal_velocity);
    }

    #[test]
    fn test_inverted_jump_goes_down() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.gravity_inverted = true;
        CubeMode.update(&mut state, &press(), DT, &config);
        assert_eq!(state.velocity.y, 800.0);
        assert_eq!(state.angular_velocity, -CUBE_SPIN_RATE);
    }

    #[test]
    fn test_airborne_press_is_buffered() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.is_grounded = false;
        state.velocity.y = 300.0;
        CubeMode.update(&mut state, &press(), DT, &config);
        assert!(state.jump_buffered);
        assert_eq!(state.jump_buffer_time_remaining, config.jump_buffer_time);
        assert!(state.velocity.y > 0.0);
    }

    #[test]
    fn test_buffer_fires_on_landing() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.is_grounded = false;
        state.velocity.y = 300.0;
        CubeMode.update(&mut state, &press(), DT, &config);

        // The driver lands the player
        state.is_grounded = true;
        state.velocity.y = 0.0;
        CubeMode.update(&mut state, &InputState::default(), DT, &config);
        assert_eq!(state.velocity.y, -800.0);
        assert!(!state.jump_buffered);
    }

    #[test]
    fn test_buffer_expires() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.is_grounded = false;
        CubeMode.update(&mut state, &press(), DT, &config);
        for _ in 0..7 {
            CubeMode.update(&mut state, &InputState::default(), DT, &config);
        }
        assert!(!state.jump_buffered);
        assert_eq!(state.jump_buffer_time_remaining, 0.0);
    }

    #[test]
    fn test_coyote_jump() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.is_grounded = false;
        state.coyote_time_remaining = config.coyote_time;
        CubeMode.update(&mut state, &press(), DT, &config);
        assert_eq!(state.velocity.y, -800.0);
        assert_eq!(state.coyote_time_remaining, 0.0);
        assert!(!state.jump_buffered);
    }

    #[test]
    fn test_held_auto_jump_when_grounded() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        let held = InputState {
            jump_pressed: false,
            jump_held: true,
        };
        CubeMode.update(&mut state, &held, DT, &config);
        assert_eq!(state.velocity.y, -800.0);

        // Airborne: holding does nothing
        let vy = state.velocity.y;
        CubeMode.update(&mut state, &held, DT, &config);
        assert!(state.velocity.y > vy);
    }

    #[test]
    fn test_rotation_snaps_when_grounded() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.rotation = 100.0;
        state.angular_velocity = 300.0;
        CubeMode.update(&mut state, &InputState::default(), DT, &config);
        assert_eq!(state.rotation, 90.0);
        assert_eq!(state.angular_velocity, 0.0);

        state.rotation = 350.0;
        CubeMode.update(&mut state, &InputState::default(), DT, &config);
        assert_eq!(state.rotation, 0.0);
    }

    #[test]
    fn test_airborne_rotation_wraps() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.is_grounded = false;
        state.rotation = 359.0;
        state.angular_velocity = CUBE_SPIN_RATE;
        CubeMode.update(&mut state, &InputState::default(), DT, &config);
        assert!(state.rotation >= 0.0 && state.rotation < 360.0);
        assert!(state.rotation < 10.0);
    }

    #[test]
    fn test_dead_is_noop() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.is_dead = true;
        let before = state;
        CubeMode.update(&mut state, &press(), DT, &config);
        assert_eq!(state, before);
    }

    #[test]
    fn test_on_enter_resets_timers() {
        let config = PhysicsConfig::default();
        let mut state = grounded_state();
        state.mode = ModeId::Ship;
        state.jump_buffered = true;
        state.jump_buffer_time_remaining = 0.05;
        state.angular_velocity = 90.0;
        CubeMode.on_enter(&mut state, &config);
        assert_eq!(state.mode, ModeId::Cube);
        assert!(!state.jump_buffered);
        assert_eq!(state.angular_velocity, 0.0);

        state.is_grounded = false;
        state.angular_velocity = 90.0;
        CubeMode.on_enter(&mut state, &config);
        assert_eq!(state.angular_velocity, 90.0);
    }
}

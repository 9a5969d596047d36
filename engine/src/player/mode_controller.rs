//! Mode Controller
//!
//! Owns the active movement mode, dispatches the per-tick update to it and
//! runs the mode-switch protocol.
//!
//! # Mode Switch Protocol
//!
//! 1. The old mode's `on_exit`
//! 2. The active mode is reassigned
//! 3. The new mode's `on_enter` (sets `state.mode`, clears grace timers,
//!    resets mode-specific visual state)
//!
//! # Usage
//!
//! ```rust,ignore
//! use pulse_runner_engine::player::{ModeController, ModeId, PhysicsConfig, PhysicsState};
//! use pulse_runner_engine::input::InputState;
//!
//! let config = PhysicsConfig::default();
//! let mut state = PhysicsState::default();
//! let mut modes = ModeController::new();
//!
//! // Each frame:
//! modes.update(&mut state, &input, delta_time, &config);
//!
//! // Ship portal touched:
//! modes.switch_to(ModeId::Ship, &mut state, &config);
//! ```

use tracing::debug;

use crate::input::InputState;

use super::config::PhysicsConfig;
use super::modes::{MovementMode, MovementStrategy};
use super::state::{ModeId, PhysicsState};

/// Holds the active movement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeController {
    active: MovementMode,
}

impl ModeController {
    /// Create a controller in Cube mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the active mode.
    pub fn mode(&self) -> ModeId {
        self.active.id()
    }

    /// Terminal velocity of the active mode.
    pub fn terminal_velocity(&self, config: &PhysicsConfig) -> f32 {
        config.terminal_velocity_scaled(self.active.terminal_velocity_scale())
    }

    /// Dispatches one tick to the active mode. Does nothing for a dead player.
    pub fn update(
        &self,
        state: &mut PhysicsState,
        input: &InputState,
        dt: f32,
        config: &PhysicsConfig,
    ) {
        if state.is_dead {
            return;
        }
        self.active.update(state, input, dt, config);
    }

    /// Switches to `target`, running the exit/enter hooks once each.
    ///
    /// # Returns
    /// `true` if the mode changed, `false` if `target` was already active.
    pub fn switch_to(
        &mut self,
        target: ModeId,
        state: &mut PhysicsState,
        config: &PhysicsConfig,
    ) -> bool {
        if target == self.mode() {
            return false;
        }

        let previous = self.mode();
        self.active.on_exit(state);
        self.active = MovementMode::from_id(target);
        self.active.on_enter(state, config);

        debug!(from = previous.name(), to = target.name(), "mode switch");
        true
    }

    /// Makes `target` active and runs only its `on_enter`.
    ///
    /// Used when a state is (re)created, where there is no previous mode to
    /// exit.
    pub fn enter(&mut self, target: ModeId, state: &mut PhysicsState, config: &PhysicsConfig) {
        self.active = MovementMode::from_id(target);
        self.active.on_enter(state, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_controller_is_cube() {
        let controller = ModeController::new();
        assert_eq!(controller.mode(), ModeId::Cube);
        assert_eq!(
            controller.terminal_velocity(&PhysicsConfig::default()),
            1200.0
        );
    }

    #[test]
    fn test_switch_runs_protocol() {
        let config = PhysicsConfig::default();
        let mut state = PhysicsState::default();
        state.rotation = 90.0;
        state.coyote_time_remaining = 0.05;
        let mut controller = ModeController::new();

        assert!(controller.switch_to(ModeId::Ship, &mut state, &config));
        assert_eq!(controller.mode(), ModeId::Ship);
        assert_eq!(state.mode, ModeId::Ship);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.coyote_time_remaining, 0.0);
        assert_eq!(controller.terminal_velocity(&config), 960.0);
    }

    #[test]
    fn test_switch_to_same_mode_is_noop() {
        let config = PhysicsConfig::default();
        let mut state = PhysicsState::default();
        state.rotation = 45.0;
        let mut controller = ModeController::new();
        assert!(!controller.switch_to(ModeId::Cube, &mut state, &config));
        assert_eq!(state.rotation, 45.0);
    }

    #[test]
    fn test_update_skips_dead_player() {
        let config = PhysicsConfig::default();
        let mut state = PhysicsState::default();
        state.is_dead = true;
        let before = state;
        let controller = ModeController::new();
        controller.update(&mut state, &InputState::default(), 1.0 / 60.0, &config);
        assert_eq!(state, before);
    }

    #[test]
    fn test_enter_without_exit() {
        let config = PhysicsConfig::default();
        let mut state = PhysicsState::default();
        state.angular_velocity = 100.0;
        let mut controller = ModeController::new();
        controller.enter(ModeId::Ball, &mut state, &config);
        assert_eq!(controller.mode(), ModeId::Ball);
        assert_eq!(state.mode, ModeId::Ball);
        assert_eq!(state.angular_velocity, 0.0);
    }
}

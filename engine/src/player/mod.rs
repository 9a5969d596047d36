//! Player Module
//!
//! Player kinematics for the side-scrolling runner.
//!
//! # Components
//!
//! - [`PhysicsState`] - The single mutable per-player record
//! - [`PhysicsConfig`] - Session-wide physics constants
//! - [`modes`] - Cube, Ship and Ball movement strategies
//!   - Cube: discrete jumps with coyote time and jump buffering
//!   - Ship: thrust-based flight with velocity-driven tilt
//!   - Ball: gravity flipping with a speed-derived roll
//! - [`ModeController`] - Active-mode dispatch and the mode-switch protocol

pub mod config;
pub mod mode_controller;
pub mod modes;
pub mod state;

pub use config::PhysicsConfig;
pub use mode_controller::ModeController;
pub use modes::{BallMode, CubeMode, MovementMode, MovementStrategy, ShipMode};
pub use state::{ModeId, PhysicsState, wrap_degrees};

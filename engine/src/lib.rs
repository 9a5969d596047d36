//! Pulse Runner Engine Library
//!
//! Deterministic physics core of a music-locked side-scrolling runner.
//! Horizontal motion follows the audio clock; vertical motion, rotation and
//! collision response run once per rendered frame. No rendering, audio or
//! file I/O lives here.
//!
//! # Modules
//!
//! - [`physics`] - AABB primitive, collision classifier, grounded query
//! - [`player`] - Physics state/config, Cube/Ship/Ball modes, mode controller
//! - [`input`] - Per-frame jump input and press-edge tracking
//! - [`world`] - Speed tiers, horizontal music clock, level layout config
//! - [`game`] - Tick driver, notifications, checkpoints
//!
//! # Example
//!
//! ```ignore
//! use pulse_runner_engine::{JumpInputTracker, PhysicsConfig, TickDriver, WorldConfig};
//!
//! let mut driver = TickDriver::try_new(PhysicsConfig::default(), WorldConfig::default())?;
//! let mut jump = JumpInputTracker::new();
//!
//! // Each frame:
//! let input = jump.sample(space_held);
//! let report = driver.tick(&input, delta_time, Some(audio.position()), &obstacles);
//! for event in &report.events {
//!     // play sounds, spawn particles...
//! }
//! ```

pub mod config;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use config::ConfigError;
pub use game::{Checkpoint, PhysicsEvent, TickDriver, TickReport};
pub use input::{InputState, JumpInputTracker};
pub use physics::{Aabb, Collidable, CollisionCategory, ObstacleKind};
pub use player::{ModeId, PhysicsConfig, PhysicsState};
pub use world::{SpeedTier, WorldConfig};

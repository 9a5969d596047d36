//! Game Module
//!
//! Session-level gameplay built on top of the engine: the per-frame physics
//! tick driver, its notification queue and checkpoint snapshots.

pub mod checkpoint;
pub mod events;
pub mod systems;

pub use checkpoint::Checkpoint;
pub use events::{EventKind, EventQueue, PhysicsEvent};
pub use systems::{TickDriver, TickReport};

//! Game systems: self-contained modules that own state and logic.

pub mod physics_tick;

pub use physics_tick::{TickDriver, TickReport};

//! Physics type re-exports from glam
//!
//! The simulation is strictly two-dimensional (side-scrolling), so only
//! the 2D vector type is re-exported.

pub use glam::Vec2;

//! Physics module
//!
//! Geometry and collision classification for the runner. Built from scratch
//! on plain axis-aligned boxes; no external physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 screen pixel at 1x zoom**, one grid block is 30 units.
//!
//! - Distances in units, `+Y` pointing down
//! - Velocities in units/s
//! - Accelerations in units/s²
//! - Angles in degrees
//!
//! # Submodules
//!
//! - [`types`] - Vector type re-exported from glam
//! - [`aabb`] - The AABB primitive: overlap, penetration, containment, scaling
//! - [`collision`] - Obstacle classification, hitbox scales and grounded query

pub mod aabb;
pub mod collision;
pub mod types;

// Re-export commonly used types at the physics module level
pub use aabb::{Aabb, Penetration};
pub use collision::{
    CategoryMask, Collidable, CollisionCategory, GroundPlane, ObstacleKind, is_grounded,
    player_hitbox, player_hitbox_scale, query_overlaps,
};
pub use types::Vec2;

//! Collision classification module
//!
//! Maps level obstacles to collision categories and hitboxes, and answers
//! the overlap queries the tick driver (and the layer above it) need.
//!
//! # Categories
//!
//! Every category is a distinct power of two, so sets of categories combine
//! with bitwise OR into a [`CategoryMask`]:
//!
//! | Category      | Bit  | Hitbox scale |
//! |---------------|------|--------------|
//! | `None`        | 0    | 0.0          |
//! | `Solid`       | 1    | 1.0 (exact)  |
//! | `Hazard`      | 2    | 0.5          |
//! | `Interactive` | 4    | 0.75         |
//! | `Portal`      | 8    | 1.0          |
//! | `Trigger`     | 16   | 1.0          |
//!
//! Hitboxes are scaled uniformly around the obstacle's visual extents.
//! Hazards are deliberately small and the player hitbox is shrunk per mode
//! (cube 0.9, ship/ball 0.85), so near misses favor the player.
//!
//! # Grounded Query
//!
//! [`is_grounded`] tests a thin probe just past the player's feet (on the
//! gravity side) against active solids, inset horizontally so a corner
//! grazing the probe does not count, and falls back to the default ground
//! plane with a tolerance band.
//!
//! # Example
//!
//! ```ignore
//! use pulse_runner_engine::physics::collision::{Collidable, ObstacleKind, CollisionCategory};
//! use glam::Vec2;
//!
//! let spike = Collidable::new(ObstacleKind::Spike, Vec2::new(300.0, -15.0), Vec2::splat(30.0));
//! assert_eq!(spike.category, CollisionCategory::Hazard);
//! assert_eq!(spike.hitbox().width, 15.0);
//! ```

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use super::aabb::Aabb;
use super::types::Vec2;
use crate::player::ModeId;
use crate::world::SpeedTier;

/// Height of the grounded probe below the player's feet.
pub const GROUND_PROBE_DEPTH: f32 = 2.0;

/// Horizontal inset of the grounded probe on each side.
pub const GROUND_PROBE_INSET: f32 = 2.0;

// =============================================================================
// CollisionCategory / CategoryMask
// =============================================================================

/// What happens when the player touches an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CollisionCategory {
    /// Never collides (decoration)
    #[default]
    None = 0,
    /// Pushes the player out
    Solid = 1 << 0,
    /// Kills on contact
    Hazard = 1 << 1,
    /// Pads and orbs, resolved by the caller
    Interactive = 1 << 2,
    /// Mode/gravity/speed portals, resolved by the caller
    Portal = 1 << 3,
    /// Checkpoints and other triggers, resolved by the caller
    Trigger = 1 << 4,
}

const_assert!((CollisionCategory::Solid as u8).is_power_of_two());
const_assert!((CollisionCategory::Hazard as u8).is_power_of_two());
const_assert!((CollisionCategory::Interactive as u8).is_power_of_two());
const_assert!((CollisionCategory::Portal as u8).is_power_of_two());
const_assert!((CollisionCategory::Trigger as u8).is_power_of_two());
const_assert!(
    (CollisionCategory::Solid as u8
        | CollisionCategory::Hazard as u8
        | CollisionCategory::Interactive as u8
        | CollisionCategory::Portal as u8
        | CollisionCategory::Trigger as u8)
        == 0b1_1111
);

impl CollisionCategory {
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Uniform hitbox scale applied around the obstacle's visual extents.
    pub fn hitbox_scale(self) -> f32 {
        match self {
            CollisionCategory::None => 0.0,
            CollisionCategory::Solid => 1.0,
            CollisionCategory::Hazard => 0.5,
            CollisionCategory::Interactive => 0.75,
            CollisionCategory::Portal => 1.0,
            CollisionCategory::Trigger => 1.0,
        }
    }
}

/// Bitwise-OR set of [`CollisionCategory`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategoryMask(u8);

impl CategoryMask {
    /// Categories the tick driver leaves to the caller
    pub const CALLER_RESOLVED: CategoryMask = CategoryMask(
        CollisionCategory::Interactive as u8
            | CollisionCategory::Portal as u8
            | CollisionCategory::Trigger as u8,
    );

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, category: CollisionCategory) -> bool {
        category != CollisionCategory::None && self.0 & category.bits() != 0
    }
}

impl From<CollisionCategory> for CategoryMask {
    fn from(category: CollisionCategory) -> Self {
        CategoryMask(category.bits())
    }
}

impl std::ops::BitOr for CollisionCategory {
    type Output = CategoryMask;

    fn bitor(self, rhs: Self) -> CategoryMask {
        CategoryMask(self.bits() | rhs.bits())
    }
}

impl std::ops::BitOr<CollisionCategory> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CollisionCategory) -> CategoryMask {
        CategoryMask(self.0 | rhs.bits())
    }
}

impl std::ops::BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: Self) -> CategoryMask {
        CategoryMask(self.0 | rhs.0)
    }
}

// =============================================================================
// ObstacleKind / Collidable
// =============================================================================

/// Level object kinds known to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Block,
    Slab,
    Spike,
    SmallSpike,
    Saw,
    JumpPad,
    JumpOrb,
    GravityPortal,
    CubePortal,
    ShipPortal,
    BallPortal,
    SpeedPortal(SpeedTier),
    Checkpoint,
    Decoration,
}

impl ObstacleKind {
    /// Collision category for this kind.
    pub fn category(self) -> CollisionCategory {
        match self {
            ObstacleKind::Block | ObstacleKind::Slab => CollisionCategory::Solid,
            ObstacleKind::Spike | ObstacleKind::SmallSpike | ObstacleKind::Saw => {
                CollisionCategory::Hazard
            }
            ObstacleKind::JumpPad | ObstacleKind::JumpOrb => CollisionCategory::Interactive,
            ObstacleKind::GravityPortal
            | ObstacleKind::CubePortal
            | ObstacleKind::ShipPortal
            | ObstacleKind::BallPortal
            | ObstacleKind::SpeedPortal(_) => CollisionCategory::Portal,
            ObstacleKind::Checkpoint => CollisionCategory::Trigger,
            ObstacleKind::Decoration => CollisionCategory::None,
        }
    }

    /// The mode a mode portal switches to, if this is one.
    pub fn target_mode(self) -> Option<ModeId> {
        match self {
            ObstacleKind::CubePortal => Some(ModeId::Cube),
            ObstacleKind::ShipPortal => Some(ModeId::Ship),
            ObstacleKind::BallPortal => Some(ModeId::Ball),
            _ => None,
        }
    }
}

/// One obstacle instance, as supplied by the level/pool collaborator for a
/// single tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collidable {
    /// Visual center
    pub center: Vec2,
    /// Visual width and height
    pub size: Vec2,
    pub kind: ObstacleKind,
    pub category: CollisionCategory,
    /// Inactive obstacles are skipped by every query
    pub active: bool,
}

impl Collidable {
    /// Creates an active obstacle, classifying `kind`.
    pub fn new(kind: ObstacleKind, center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size,
            kind,
            category: kind.category(),
            active: true,
        }
    }

    /// Creates an obstacle from its top-left corner.
    pub fn from_corner(kind: ObstacleKind, corner: Vec2, size: Vec2) -> Self {
        Self::new(kind, corner + size * 0.5, size)
    }

    /// Unscaled visual box.
    pub fn visual_box(&self) -> Aabb {
        Aabb::from_center(self.center, self.size)
    }

    /// Collision box: the visual box scaled by the category factor.
    pub fn hitbox(&self) -> Aabb {
        self.visual_box().scaled(self.category.hitbox_scale())
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Player hitbox scale for a movement mode.
pub fn player_hitbox_scale(mode: ModeId) -> f32 {
    match mode {
        ModeId::Cube => 0.9,
        ModeId::Ship | ModeId::Ball => 0.85,
    }
}

/// Player collision box for a center, visual size and mode.
pub fn player_hitbox(center: Vec2, size: f32, mode: ModeId) -> Aabb {
    Aabb::from_center(center, Vec2::splat(size)).scaled(player_hitbox_scale(mode))
}

/// Default ground plane with its tolerance band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// Y of the ground surface (`+Y` down)
    pub y: f32,
    /// Distance above the surface that still counts as grounded
    pub tolerance: f32,
}

/// Indices of active obstacles in `mask` whose hitboxes overlap `hitbox`.
///
/// Iterates in slice order. Used by the tick driver and by callers that
/// resolve pads, orbs, portals and checkpoints themselves.
pub fn query_overlaps<'a>(
    hitbox: &'a Aabb,
    obstacles: &'a [Collidable],
    mask: CategoryMask,
) -> impl Iterator<Item = usize> + 'a {
    obstacles
        .iter()
        .enumerate()
        .filter(move |(_, obstacle)| {
            obstacle.active
                && mask.contains(obstacle.category)
                && hitbox.overlaps(&obstacle.hitbox())
        })
        .map(|(index, _)| index)
}

/// Probe rectangle just past the player's feet on the gravity side.
pub fn ground_probe(hitbox: &Aabb, gravity_inverted: bool) -> Aabb {
    let left = hitbox.left + GROUND_PROBE_INSET;
    let width = (hitbox.width - GROUND_PROBE_INSET * 2.0).max(0.0);
    let top = if gravity_inverted {
        hitbox.top - GROUND_PROBE_DEPTH
    } else {
        hitbox.bottom()
    };
    Aabb::new(left, top, width, GROUND_PROBE_DEPTH)
}

/// Whether the player is standing on something.
///
/// True when the feet probe overlaps any active solid, or, under normal
/// gravity, when the hitbox bottom is within `ground.tolerance` of the
/// ground plane (or below it).
pub fn is_grounded(
    hitbox: &Aabb,
    gravity_inverted: bool,
    obstacles: &[Collidable],
    ground: Option<GroundPlane>,
) -> bool {
    let probe = ground_probe(hitbox, gravity_inverted);
    let on_solid = obstacles.iter().any(|obstacle| {
        obstacle.active
            && obstacle.category == CollisionCategory::Solid
            && probe.overlaps(&obstacle.hitbox())
    });
    if on_solid {
        return true;
    }

    match ground {
        Some(plane) if !gravity_inverted => hitbox.bottom() >= plane.y - plane.tolerance,
        _ => false,
    }
}

//! Axis-Aligned Bounding Box
//!
//! The single geometry primitive used for every player/obstacle test.
//!
//! # Coordinate System
//!
//! Screen space: +X points right, +Y points **down**. `top` is therefore the
//! smallest Y of the box and `bottom()` the largest.
//!
//! # Overlap Rules
//!
//! - [`Aabb::overlaps`] uses strict comparison: boxes that only share an edge
//!   do not overlap.
//! - [`Aabb::contains_point`] is inclusive on all four edges.
//! - [`Aabb::collide`] resolves along the axis of least penetration; equal
//!   horizontal and vertical penetration resolves vertically, which is the
//!   "land on a platform" case.
//!
//! All operations are pure and accept zero-sized boxes.

use serde::{Deserialize, Serialize};

use super::types::Vec2;

/// Axis-aligned box stored as top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Outcome of a penetration-resolving test between two boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Whether the boxes overlap at all
    pub colliding: bool,
    /// Signed overlap along `normal`'s axis; adding `overlap` to the
    /// corresponding coordinate of the first box separates the two
    pub overlap: f32,
    /// Unit push-out direction for the first box (zero when not colliding)
    pub normal: Vec2,
}

impl Penetration {
    /// A non-colliding result.
    pub fn none() -> Self {
        Self {
            colliding: false,
            overlap: 0.0,
            normal: Vec2::ZERO,
        }
    }

    /// Displacement that separates the first box from the second.
    pub fn push(&self) -> Vec2 {
        self.normal * self.overlap.abs()
    }

    /// True when resolution happens on the Y axis.
    pub fn is_vertical(&self) -> bool {
        self.colliding && self.normal.y != 0.0
    }
}

impl Aabb {
    /// Creates a box from its top-left corner and size.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Creates a box centered on `center` with the given full size.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            left: center.x - size.x * 0.5,
            top: center.y - size.y * 0.5,
            width: size.x,
            height: size.y,
        }
    }

    /// Creates a box from its top-left corner and full size.
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self::new(corner.x, corner.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Strict overlap test. Edge-touching boxes do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }

    /// Resolves penetration of `self` into `other`.
    ///
    /// The returned normal points the way `self` must move to leave `other`.
    /// When the penetration depth is equal on both axes the vertical axis wins.
    ///
    /// # Returns
    /// A [`Penetration`] with `colliding == false` when the boxes do not overlap.
    pub fn collide(&self, other: &Aabb) -> Penetration {
        if !self.overlaps(other) {
            return Penetration::none();
        }

        let overlap_x = self.right().min(other.right()) - self.left.max(other.left);
        let overlap_y = self.bottom().min(other.bottom()) - self.top.max(other.top);

        let a = self.center();
        let b = other.center();

        if overlap_x < overlap_y {
            // Coincident centers push back toward -X
            let sign = if a.x > b.x { 1.0 } else { -1.0 };
            Penetration {
                colliding: true,
                overlap: overlap_x * sign,
                normal: Vec2::new(sign, 0.0),
            }
        } else {
            // Coincident centers push up (-Y), on top of the other box
            let sign = if a.y > b.y { 1.0 } else { -1.0 };
            Penetration {
                colliding: true,
                overlap: overlap_y * sign,
                normal: Vec2::new(0.0, sign),
            }
        }
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Scales the box uniformly about its center.
    pub fn scaled(&self, factor: f32) -> Aabb {
        Aabb::from_center(self.center(), self.size() * factor)
    }

    /// Grows the box by `margin` on every side. Negative margins shrink it,
    /// never below zero size.
    pub fn expanded(&self, margin: f32) -> Aabb {
        let width = (self.width + margin * 2.0).max(0.0);
        let height = (self.height + margin * 2.0).max(0.0);
        Aabb::from_center(self.center(), Vec2::new(width, height))
    }

    /// Returns the box moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb::new(self.left + offset.x, self.top + offset.y, self.width, self.height)
    }
}

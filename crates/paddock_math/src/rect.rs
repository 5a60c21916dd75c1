//! Axis-aligned rectangles on the ground plane

use serde::{Serialize, Deserialize};
use crate::Vec2;

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner (smallest x and y)
    pub min: Vec2,
    /// Maximum corner (largest x and y)
    pub max: Vec2,
}

impl Rect {
    /// Create a new rectangle from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its minimum corner and its size
    pub fn from_corner_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Create a rectangle centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the rectangle
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size in each dimension
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Check if a point is inside or on the rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check whether two rectangles overlap with a non-zero area
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    /// Shrink the rectangle by `margin` on every side
    ///
    /// An axis narrower than `2 * margin` collapses onto its center line, so
    /// the result is never inverted.
    pub fn inset(&self, margin: Vec2) -> Self {
        let center = self.center();
        let half = (self.half_extents() - margin).max_components(Vec2::ZERO);
        Self::from_center_half_extents(center, half)
    }

    /// Get the closest point inside or on the rectangle to a given point
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Map unit coordinates `(u, v)` in `[0, 1]` to a point inside the rectangle
    pub fn point_at(&self, u: f32, v: f32) -> Vec2 {
        self.min + self.size().component_mul(Vec2::new(u, v))
    }
}

//! Destructive edit descriptions
//!
//! Gameplay code hands these to the removal engine; the painter never reads
//! them. They live here so embedders share one vocabulary for validating and
//! bounding destructive edits before scheduling them.

use crate::core::types::Vec3;
use crate::math::Aabb;

/// Shape swept by a destructive edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestructionShape {
    Sphere,
    Line,
    Cube,
}

/// One destructive edit request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DestructionData {
    pub shape: DestructionShape,
    /// World-space start of the edit
    pub start: Vec3,
    /// World-space end, equal to `start` for point edits
    pub end: Vec3,
    /// Effect radius in world units
    pub range: f32,
}

impl DestructionData {
    /// Spherical edit around a point
    pub fn sphere(center: Vec3, range: f32) -> Self {
        Self {
            shape: DestructionShape::Sphere,
            start: center,
            end: center,
            range,
        }
    }

    /// Swept edit along a segment
    pub fn line(start: Vec3, end: Vec3, range: f32) -> Self {
        Self {
            shape: DestructionShape::Line,
            start,
            end,
            range,
        }
    }

    /// Cubic edit around a point
    pub fn cube(center: Vec3, range: f32) -> Self {
        Self {
            shape: DestructionShape::Cube,
            start: center,
            end: center,
            range,
        }
    }

    /// An edit needs at least a unit of range to remove anything
    pub fn is_valid(&self) -> bool {
        self.range >= 1.0
    }

    /// World-space bounds the edit can touch
    pub fn affected_bounds(&self) -> Aabb {
        Aabb::new(self.start.min(self.end), self.start.max(self.end)).inflated(self.range)
    }
}

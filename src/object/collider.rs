//! Collision surface abstraction
//!
//! The painter projects free impact points onto the target's collision
//! surface and verifies anchored requests still refer to it. Identity is a
//! [`ColliderId`] rather than a reference so a recorded request stays
//! comparable across frames.

use crate::core::types::Vec3;
use crate::math::Aabb;

/// Stable identity of a collision surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderId(pub u64);

/// Closest-point queryable collision surface
pub trait CollisionSurface {
    /// Stable identity used to match anchored impact requests
    fn id(&self) -> ColliderId;

    /// Closest point on or inside the surface to `point`, in world space
    ///
    /// A point already inside the surface maps to itself.
    fn closest_point(&self, point: Vec3) -> Vec3;

    /// Classification tag used for color profile lookup
    fn tag(&self) -> Option<&str> {
        None
    }
}

/// Axis-aligned box collision surface
#[derive(Debug, Clone)]
pub struct BoxCollider {
    id: ColliderId,
    bounds: Aabb,
    tag: Option<String>,
}

impl BoxCollider {
    /// Create a box collider over the given bounds
    pub fn new(id: ColliderId, bounds: Aabb) -> Self {
        Self {
            id,
            bounds,
            tag: None,
        }
    }

    /// Attach a classification tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Collision bounds
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl CollisionSurface for BoxCollider {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.bounds.closest_point(point)
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// Spherical collision surface
#[derive(Debug, Clone)]
pub struct SphereCollider {
    id: ColliderId,
    center: Vec3,
    radius: f32,
    tag: Option<String>,
}

impl SphereCollider {
    /// Create a sphere collider
    pub fn new(id: ColliderId, center: Vec3, radius: f32) -> Self {
        Self {
            id,
            center,
            radius,
            tag: None,
        }
    }

    /// Attach a classification tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl CollisionSurface for SphereCollider {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        let offset = point - self.center;
        let dist = offset.length();
        if dist <= self.radius {
            point
        } else {
            self.center + offset * (self.radius / dist)
        }
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

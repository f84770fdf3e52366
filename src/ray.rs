//! Ray representation for sphere tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. Unlike an analytic
//! intersector, the marcher reads `t` as a travelled distance, so the
//! direction must be a unit vector.

use glam::Vec3A;

/// Ray in 3D space defined by origin and unit direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position for primary rays, the light position for
    /// shadow rays.
    pub origin: Vec3A,

    /// Unit-length direction of the ray.
    ///
    /// Step sizes taken by the tracer are distances, which only match the
    /// ray parameter when this vector is normalized. Zero-length directions
    /// are a caller error.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray. `direction` must already be normalized.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        debug_assert!(
            (direction.length() - 1.0).abs() < 1e-3,
            "ray direction must be unit length, got {:?}",
            direction
        );
        Self { origin, direction }
    }

    /// Create a ray from `origin` heading towards `target`.
    pub fn towards(origin: Vec3A, target: Vec3A) -> Self {
        Self::new(origin, (target - origin).normalize())
    }

    /// Compute a point at distance t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

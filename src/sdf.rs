//! Signed distance primitives and combinators.
//!
//! Primitive functions take a point already expressed in the primitive's
//! local space (callers subtract the center first). [`Primitive`] bundles
//! the constant layout of a shape with a single dispatch method, and
//! [`DistanceField`] is the seam every consumer of the scene is written
//! against.

use glam::Vec3A;

use crate::material::{Color, BLACK};

/// Distance used as the "nothing here" starting value of every fold.
pub const FAR: f32 = 1e10;

/// Exact distance to a sphere of radius `r` centered at the origin.
#[inline]
pub fn sphere(p: Vec3A, r: f32) -> f32 {
    p.length() - r
}

/// Approximate distance to an origin-centered ellipsoid with semi-axes `radii`.
///
/// Uses the `k0 * (k0 - 1) / k1` bound: exactly zero on the surface and a
/// close estimate elsewhere. Not a strict lower bound for very anisotropic
/// radii, which the tracer tolerates in practice.
#[inline]
pub fn ellipsoid(p: Vec3A, radii: Vec3A) -> f32 {
    let k0 = (p / radii).length();
    let k1 = (p / (radii * radii)).length();
    if k1 == 0.0 {
        // Dead center: the gradient vanishes, report the deepest interior point.
        return -radii.min_element();
    }
    k0 * (k0 - 1.0) / k1
}

/// Signed height above the XZ plane through the origin.
#[inline]
pub fn plane(p: Vec3A) -> f32 {
    p.y
}

/// Polynomial smooth minimum with blend radius `k`.
///
/// Never greater than `a.min(b)`, and equal to it once the two inputs are at
/// least `k` apart.
#[inline]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    let h = ((k - (a - b).abs()) / k).clamp(0.0, 1.0);
    a.min(b) - h * h * k * 0.25
}

/// A primitive placed in the scene.
///
/// Layout is constant data; the only dynamic input is the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Round sphere.
    Sphere {
        /// Center in creature space.
        center: Vec3A,
        /// Radius.
        radius: f32,
    },

    /// Axis-aligned ellipsoid.
    Ellipsoid {
        /// Center in creature space.
        center: Vec3A,
        /// Semi-axis lengths along x, y and z.
        radii: Vec3A,
    },

    /// Infinite ground plane `y = 0`.
    Plane,
}

impl Primitive {
    /// Distance from `p` to the surface of this primitive.
    pub fn distance(&self, p: Vec3A) -> f32 {
        match *self {
            Primitive::Sphere { center, radius } => sphere(p - center, radius),
            Primitive::Ellipsoid { center, radii } => ellipsoid(p - center, radii),
            Primitive::Plane => plane(p),
        }
    }

    /// Same primitive moved by `offset`. Planes are unaffected.
    pub fn translated(self, offset: Vec3A) -> Self {
        match self {
            Primitive::Sphere { center, radius } => Primitive::Sphere {
                center: center + offset,
                radius,
            },
            Primitive::Ellipsoid { center, radii } => Primitive::Ellipsoid {
                center: center + offset,
                radii,
            },
            Primitive::Plane => Primitive::Plane,
        }
    }
}

/// Result of evaluating a distance field at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSample {
    /// Signed distance to the nearest surface, negative inside.
    pub distance: f32,
    /// Albedo of the surface that produced `distance`.
    pub color: Color,
}

impl DistanceSample {
    /// Empty space: infinitely far away and black.
    pub const FAR: DistanceSample = DistanceSample {
        distance: FAR,
        color: BLACK,
    };

    /// Create a new sample.
    pub fn new(distance: f32, color: Color) -> Self {
        Self { distance, color }
    }

    /// Hard union: keeps whichever sample is closer. Ties keep `self`.
    pub fn nearest(self, other: DistanceSample) -> DistanceSample {
        if other.distance < self.distance {
            other
        } else {
            self
        }
    }
}

/// Anything that can be sphere traced.
///
/// Implementations must be pure: the same point always yields the same
/// sample. Must be thread-safe (Sync + Send) so pixels can be rendered in
/// parallel against a shared field.
pub trait DistanceField: Sync + Send {
    /// Nearest distance and surface color at `p`.
    fn sample(&self, p: Vec3A) -> DistanceSample;

    /// Nearest distance only.
    fn distance(&self, p: Vec3A) -> f32 {
        self.sample(p).distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_is_zero_on_surface() {
        let center = Vec3A::new(0.3, -1.2, 4.0);
        let r = 0.75;
        for dir in [
            Vec3A::X,
            Vec3A::NEG_Y,
            Vec3A::new(1.0, 1.0, -1.0).normalize(),
            Vec3A::new(-0.2, 0.7, 0.1).normalize(),
        ] {
            let p = center + dir * r;
            let d = sphere(p - center, r);
            assert!(d.abs() < 1e-5, "expected 0 on surface, got {}", d);
        }
    }

    #[test]
    fn sphere_sign() {
        assert!(sphere(Vec3A::ZERO, 1.0) < 0.0);
        assert!((sphere(Vec3A::new(0.0, 3.0, 0.0), 1.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn ellipsoid_is_zero_on_axes() {
        let radii = Vec3A::new(0.18, 0.06, 0.06);
        for p in [
            Vec3A::new(0.18, 0.0, 0.0),
            Vec3A::new(0.0, -0.06, 0.0),
            Vec3A::new(0.0, 0.0, 0.06),
        ] {
            let d = ellipsoid(p, radii);
            assert!(d.abs() < 1e-5, "expected 0 at {:?}, got {}", p, d);
        }
    }

    #[test]
    fn ellipsoid_center_is_finite_and_inside() {
        let d = ellipsoid(Vec3A::ZERO, Vec3A::new(0.07, 0.15, 0.07));
        assert!(d.is_finite());
        assert!((d + 0.07).abs() < 1e-6);
    }

    #[test]
    fn ellipsoid_matches_sphere_for_equal_radii() {
        let p = Vec3A::new(2.0, 1.0, -0.5);
        let d = ellipsoid(p, Vec3A::splat(0.5));
        assert!((d - sphere(p, 0.5)).abs() < 1e-5);
    }

    #[test]
    fn plane_is_height() {
        assert_eq!(plane(Vec3A::new(5.0, 0.25, -3.0)), 0.25);
        assert_eq!(plane(Vec3A::new(0.0, -1.0, 0.0)), -1.0);
    }

    #[test]
    fn smooth_min_never_exceeds_min() {
        let values = [-2.0, -0.3, -0.01, 0.0, 0.02, 0.1, 0.5, 3.0];
        for &k in &[0.04, 0.06, 0.25, 1.0] {
            for &a in &values {
                for &b in &values {
                    let s = smooth_min(a, b, k);
                    assert!(s <= a.min(b), "smooth_min({}, {}, {}) = {}", a, b, k, s);
                }
            }
        }
    }

    #[test]
    fn smooth_min_is_exact_when_far_apart() {
        assert_eq!(smooth_min(1.0, 0.5, 0.25), 0.5);
        assert_eq!(smooth_min(-1.0, 2.0, 0.06), -1.0);
        assert_eq!(smooth_min(0.0, 0.25, 0.25), 0.0);
        assert_eq!(smooth_min(FAR, 0.3, 0.25), 0.3);
    }

    #[test]
    fn smooth_min_rounds_equal_inputs() {
        let s = smooth_min(0.4, 0.4, 0.2);
        assert!((s - (0.4 - 0.05)).abs() < 1e-6);
    }

    #[test]
    fn primitive_dispatch_translates() {
        let s = Primitive::Sphere {
            center: Vec3A::new(0.0, 1.0, 0.0),
            radius: 0.5,
        };
        assert!((s.distance(Vec3A::new(0.0, 2.0, 0.0)) - 0.5).abs() < 1e-6);

        let moved = s.translated(Vec3A::new(0.0, -1.0, 0.0));
        assert!(moved.distance(Vec3A::ZERO) < 0.0);
        assert_eq!(Primitive::Plane.translated(Vec3A::Y), Primitive::Plane);
    }

    #[test]
    fn nearest_prefers_smaller_distance() {
        let a = DistanceSample::new(0.5, BLACK);
        let b = DistanceSample::new(0.2, Color::ONE);
        assert_eq!(a.nearest(b), b);
        assert_eq!(b.nearest(a), b);
        assert_eq!(DistanceSample::FAR.nearest(a), a);
    }
}

//! Sphere tracing: ray/surface intersection against a distance field.
//!
//! Each step advances the ray by the field value at its current position,
//! which cannot cross a surface as long as the field never overestimates the
//! true distance. There is no bounding volume or acceleration structure; the
//! cost is the step count times one field evaluation.

use crate::material::{Color, BLACK};
use crate::ray::Ray;
use crate::sdf::{DistanceField, FAR};

/// Default iteration budget per ray.
pub const MAX_STEPS: u32 = 200;

/// Default convergence threshold.
pub const SURFACE_EPSILON: f32 = 1e-3;

/// Outcome of tracing one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// Distance travelled to the surface, or [`FAR`] on a miss.
    pub distance: f32,
    /// Albedo of the surface hit, black on a miss.
    pub color: Color,
    /// Field evaluations spent.
    pub steps: u32,
}

impl TraceResult {
    /// Sentinel returned when the march does not converge.
    pub const MISS: TraceResult = TraceResult {
        distance: FAR,
        color: BLACK,
        steps: 0,
    };

    /// True if the march converged onto a surface.
    pub fn is_hit(&self) -> bool {
        self.distance < FAR
    }
}

/// Sphere tracer settings, shared by primary and shadow rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereTracer {
    /// Field evaluations allowed before giving up.
    pub max_steps: u32,
    /// A sample closer than this counts as a hit.
    pub surface_epsilon: f32,
}

impl Default for SphereTracer {
    fn default() -> Self {
        Self {
            max_steps: MAX_STEPS,
            surface_epsilon: SURFACE_EPSILON,
        }
    }
}

impl SphereTracer {
    /// Create a tracer with a custom step budget and the default epsilon.
    pub fn with_max_steps(max_steps: u32) -> Self {
        Self {
            max_steps,
            ..Self::default()
        }
    }

    /// March `ray` through `field` until it converges or the budget runs out.
    ///
    /// The ray direction must be unit length.
    pub fn trace<F: DistanceField + ?Sized>(&self, field: &F, ray: &Ray) -> TraceResult {
        let mut t = 0.0_f32;

        for step in 1..=self.max_steps {
            let sample = field.sample(ray.at(t));
            t += sample.distance;

            if sample.distance < self.surface_epsilon {
                return TraceResult {
                    distance: t,
                    color: sample.color,
                    steps: step,
                };
            }

            // inf/NaN never converges again
            if !t.is_finite() {
                break;
            }
        }

        TraceResult::MISS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material;
    use crate::scene::Scene;
    use crate::sdf::{sphere, DistanceSample};
    use glam::Vec3A;

    struct Ball;

    impl DistanceField for Ball {
        fn sample(&self, p: Vec3A) -> DistanceSample {
            DistanceSample::new(sphere(p, 1.0), material::WHITE)
        }
    }

    #[test]
    fn hits_ground_below_camera() {
        let ray = Ray::new(Vec3A::new(0.0, 0.5, 1.0), Vec3A::new(0.0, -1.0, 0.0));
        let hit = SphereTracer::default().trace(&Scene::at(0.0), &ray);
        assert!(hit.is_hit());
        assert!((hit.distance - 0.5).abs() < 2e-3, "t = {}", hit.distance);
        assert_eq!(hit.color, Vec3A::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn ray_into_the_sky_misses() {
        let ray = Ray::new(Vec3A::new(0.0, 0.5, 1.0), Vec3A::Y);
        let result = SphereTracer::default().trace(&Scene::at(0.0), &ray);
        assert_eq!(result.distance, 1e10);
        assert!(!result.is_hit());
        assert_eq!(result.color, BLACK);
    }

    #[test]
    fn converges_on_sphere() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::NEG_Z);
        let hit = SphereTracer::default().trace(&Ball, &ray);
        assert!((hit.distance - 4.0).abs() < 1e-3);
        assert!(hit.steps <= 3);
    }

    #[test]
    fn step_budget_is_respected() {
        // Grazing the sphere makes the march crawl.
        let ray = Ray::new(Vec3A::new(-5.0, 1.0005, 0.0), Vec3A::X);
        let tight = SphereTracer::with_max_steps(2).trace(&Ball, &ray);
        assert_eq!(tight, TraceResult::MISS);
    }

    #[test]
    fn hits_the_creature_head_on() {
        let origin = Vec3A::new(0.0, 0.5, 1.0);
        let ray = Ray::towards(origin, Vec3A::new(0.0, 0.5, -1.0));
        let hit = SphereTracer::default().trace(&Scene::at(0.0), &ray);
        assert!(hit.is_hit());
        assert_eq!(hit.color, material::BODY);
        // Torso front is 0.3 in front of its center, blending only adds bulk.
        assert!(hit.distance < 2.0 - 0.29, "t = {}", hit.distance);
    }
}

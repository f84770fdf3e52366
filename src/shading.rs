//! Phong-style shading with a hard shadow test.
//!
//! The final color is `albedo * min(diffuse, shadow) + white * specular`.
//! Nothing is clamped here; values above one are left for the output stage
//! to tone map.

use glam::Vec3A;

use crate::material::{Color, WHITE};
use crate::ray::Ray;
use crate::sdf::DistanceField;
use crate::tracer::SphereTracer;

/// Lowest value of the diffuse term. Surfaces facing away are never black.
pub const AMBIENT_FLOOR: f32 = 0.5;

/// Light attenuation applied to occluded points.
pub const SHADOW_FACTOR: f32 = 0.5;

/// How far short of the target a shadow hit must land to count as occlusion.
pub const SHADOW_SLACK: f32 = 1e-3;

/// Phong exponent used for every surface.
pub const SHININESS: f32 = 32.0;

/// Position of the light at `time`. It sways left and right above the scene.
pub fn light_position(time: f32) -> Vec3A {
    Vec3A::new(1.0 + 2.5 * time.sin(), 10.0, 10.0)
}

/// Half-lambert diffuse term in `[AMBIENT_FLOOR, 1]`.
pub fn diffuse(p: Vec3A, light: Vec3A, normal: Vec3A) -> f32 {
    (light - p).normalize().dot(normal).clamp(AMBIENT_FLOOR, 1.0)
}

/// Phong specular term, non-negative.
pub fn specular(p: Vec3A, light: Vec3A, normal: Vec3A, camera: Vec3A, shininess: f32) -> f32 {
    let incident = (p - light).normalize();
    let reflected = incident - 2.0 * incident.dot(normal) * normal;
    let view = (camera - p).normalize();
    reflected.dot(view).max(0.0).powf(shininess)
}

/// Hard shadow test: `SHADOW_FACTOR` if something sits between `light` and
/// `p`, `1.0` otherwise.
///
/// Marches from the light towards the point rather than away from the
/// surface, so the ray never starts inside the geometry it is testing.
pub fn cast_shadow<F: DistanceField + ?Sized>(
    field: &F,
    tracer: &SphereTracer,
    p: Vec3A,
    light: Vec3A,
) -> f32 {
    let to_point = p - light;
    let target = to_point.length();
    let hit = tracer.trace(field, &Ray::new(light, to_point / target));

    if hit.is_hit() && hit.distance < target - SHADOW_SLACK {
        SHADOW_FACTOR
    } else {
        1.0
    }
}

/// Full lighting for a surface point with the given albedo.
pub fn shade<F: DistanceField + ?Sized>(
    field: &F,
    tracer: &SphereTracer,
    p: Vec3A,
    albedo: Color,
    normal: Vec3A,
    light: Vec3A,
    camera: Vec3A,
) -> Color {
    let lit = diffuse(p, light, normal).min(cast_shadow(field, tracer, p, light));
    albedo * lit + WHITE * specular(p, light, normal, camera, SHININESS)
}

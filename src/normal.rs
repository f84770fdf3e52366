//! Surface normals from the field gradient.

use glam::Vec3A;

use crate::sdf::DistanceField;

/// Offset used for the central differences.
pub const NORMAL_EPSILON: f32 = 1e-4;

/// Unit surface normal at `p`, from symmetric differences along each axis.
///
/// Costs six field evaluations. Hard unions (the eye layers) have a
/// discontinuous gradient along their seams, so normals there are only
/// approximate.
pub fn estimate_normal<F: DistanceField + ?Sized>(field: &F, p: Vec3A) -> Vec3A {
    let dx = Vec3A::new(NORMAL_EPSILON, 0.0, 0.0);
    let dy = Vec3A::new(0.0, NORMAL_EPSILON, 0.0);
    let dz = Vec3A::new(0.0, 0.0, NORMAL_EPSILON);

    Vec3A::new(
        field.distance(p + dx) - field.distance(p - dx),
        field.distance(p + dy) - field.distance(p - dy),
        field.distance(p + dz) - field.distance(p - dz),
    )
    .normalize()
}

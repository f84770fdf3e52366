//! Surface colors used by the scene.
//!
//! Every surface carries a flat albedo; lighting is applied later by the
//! shading pipeline. Values are linear RGB and are never clamped here.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Background and miss color.
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

/// Specular highlight color.
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

/// Blended creature body.
pub const BODY: Color = Color::new(0.2, 0.75, 0.35);

/// Outer eye layer.
pub const SCLERA: Color = Color::new(1.0, 1.0, 1.0);

/// Middle eye layer.
pub const IRIS: Color = Color::new(0.1, 0.3, 0.9);

/// Inner eye layer.
pub const PUPIL: Color = Color::new(0.0, 0.0, 0.0);

/// Flat ground plane.
pub const GROUND: Color = Color::new(1.0, 0.0, 0.0);

//! Marchling sphere tracer
//!
//! Renders a small animated creature standing on a ground plane by sphere
//! tracing a signed distance field, with half-lambert diffuse lighting,
//! Phong highlights and hard shadows. Frames are written as PNG or EXR,
//! with optional TEV viewer integration.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod animation;
pub mod camera;
pub mod error;
pub mod material;
pub mod normal;
pub mod output;
pub mod ray;
pub mod scene;
pub mod sdf;
pub mod shading;
pub mod tracer;

pub use camera::{render_pixel, Camera, Frame};
pub use scene::Scene;
pub use sdf::{DistanceField, DistanceSample};
pub use tracer::{SphereTracer, TraceResult};

//! Camera for ray generation and frame rendering.
//!
//! This is the per-pixel entry point of the renderer: a pixel is turned into
//! a primary ray, traced through the scene, and shaded. Everything below it
//! is a pure function of the pixel, the resolution and the frame time.

use glam::{Vec2, Vec3A};
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::material::{Color, BLACK};
use crate::normal::estimate_normal;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::shading::{light_position, shade};
use crate::tracer::SphereTracer;

/// HDR frame buffer with linear f32 RGB values.
pub type Frame = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Fixed pinhole camera looking down -z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Eye position in world space
    pub origin: Vec3A,
    /// Distance from the eye to the image plane
    pub focal_length: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 450)
    }
}

impl Camera {
    /// Creates a camera at the default eye position for the given image size.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            origin: Vec3A::new(0.0, 0.5, 1.0),
            focal_length: 1.0,
        }
    }

    /// Image size as a float vector.
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.image_width as f32, self.image_height as f32)
    }

    /// Primary ray through `pixel`.
    ///
    /// `pixel` follows the fragment convention: origin at the bottom-left
    /// corner, y pointing up, pixel centers at half-integers. The image plane
    /// is centered on the view axis and scaled by the image height, so the
    /// vertical extent is always one unit at the focal distance.
    pub fn get_ray(&self, pixel: Vec2) -> Ray {
        self.ray_through(pixel, self.resolution())
    }

    /// Primary ray through `pixel` of a viewport of size `resolution`.
    ///
    /// Same mapping as [`Camera::get_ray`], for hosts whose resolution is not
    /// a whole number of pixels.
    pub fn ray_through(&self, pixel: Vec2, resolution: Vec2) -> Ray {
        let uv = (pixel - 0.5 * resolution) / resolution.y;
        let direction = Vec3A::new(uv.x, uv.y, -self.focal_length).normalize();
        Ray::new(self.origin, direction)
    }

    /// Color of one pixel of the frame at `scene.time`.
    ///
    /// Rays that miss everything return the background color, black.
    pub fn pixel_color(&self, scene: &Scene, tracer: &SphereTracer, pixel: Vec2) -> Color {
        self.ray_color(scene, tracer, &self.get_ray(pixel))
    }

    /// Traces and shades a primary ray.
    pub fn ray_color(&self, scene: &Scene, tracer: &SphereTracer, ray: &Ray) -> Color {
        let hit = tracer.trace(scene, ray);
        if !hit.is_hit() {
            return BLACK;
        }

        let p = ray.at(hit.distance);
        let normal = estimate_normal(scene, p);
        let light = light_position(scene.time);
        shade(scene, tracer, p, hit.color, normal, light, self.origin)
    }

    /// Fragment coordinate for image pixel `(i, j)`, row 0 being the top.
    fn fragment(&self, i: u32, j: u32) -> Vec2 {
        Vec2::new(i as f32 + 0.5, (self.image_height - j) as f32 - 0.5)
    }

    /// Renders one frame, spreading pixels over the rayon thread pool.
    ///
    /// Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(&self, scene: &Scene, tracer: &SphereTracer) -> Frame {
        let mut image = Frame::new(self.image_width, self.image_height);

        info!(
            "Rendering t = {:.3}s using {} CPU cores...",
            scene.time,
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(self.image_width) * u64::from(self.image_height));
        match ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}") {
            Ok(style) => pb.set_style(style),
            Err(e) => debug!("Falling back to default progress style: {}", e),
        }

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let color = self.pixel_color(scene, tracer, self.fragment(i, j));
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        });

        pb.finish_and_clear();
        info!("Frame generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Single-threaded reference render, used for benchmarking.
    pub fn render_sequential(&self, scene: &Scene, tracer: &SphereTracer) -> Frame {
        Frame::from_fn(self.image_width, self.image_height, |i, j| {
            let color = self.pixel_color(scene, tracer, self.fragment(i, j));
            Rgb([color.x, color.y, color.z])
        })
    }
}

/// Color of `pixel` in a frame of size `resolution` at `time`.
///
/// Uses the default camera and tracer; `resolution` is in pixels, may be
/// fractional, and must have a non-zero height.
pub fn render_pixel(pixel: Vec2, resolution: Vec2, time: f32) -> Color {
    let camera = Camera::default();
    let ray = camera.ray_through(pixel, resolution);
    camera.ray_color(&Scene::at(time), &SphereTracer::default(), &ray)
}

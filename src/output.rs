//! # Output Module
//!
//! Writes rendered frames to disk or to a running viewer:
//! - PNG export with clamping and sRGB gamma encoding
//! - EXR export keeping the full linear HDR values
//! - Real-time visualization via TEV (The EXR Viewer)
//!
//! Shading leaves colors unclamped (specular highlights routinely exceed
//! one), so tone mapping happens here and nowhere else.

use std::net::TcpStream;
use std::path::{Path, PathBuf};

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use crate::camera::Frame;
use crate::error::OutputError;

/// Default TEV port when the address has none.
pub const TEV_DEFAULT_PORT: u16 = 14158;

/// File format chosen from the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit, clamped and gamma encoded.
    Png,
    /// 32-bit float, linear.
    Exr,
}

impl OutputFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "exr" => Ok(OutputFormat::Exr),
            _ => Err(OutputError::UnsupportedFormat(extension)),
        }
    }
}

/// Path for frame `index` of a sequence: `out.png` becomes `out_0007.png`.
pub fn frame_path(path: &Path, index: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{:04}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{:04}", stem, index),
    };
    path.with_file_name(name)
}

/// sRGB transfer function with the linear segment for dark values.
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts an HDR frame to displayable 8-bit RGB.
pub fn to_ldr(image: &Frame) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let encode = |v: f32| (linear_to_gamma(v.clamp(0.0, 1.0)) * 255.0).round() as u8;
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([encode(pixel[0]), encode(pixel[1]), encode(pixel[2])])
    })
}

fn ensure_not_empty(image: &Frame) -> Result<(), OutputError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OutputError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

/// Saves a frame as an 8-bit PNG.
pub fn save_image_as_png(image: &Frame, output_path: &Path) -> Result<(), OutputError> {
    ensure_not_empty(image)?;
    to_ldr(image).save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Saves a frame as a linear 32-bit EXR, without tone mapping.
pub fn save_image_as_exr(image: &Frame, output_path: &Path) -> Result<(), OutputError> {
    ensure_not_empty(image)?;
    let width = image.width() as usize;
    write_rgb_file(output_path, width, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

/// Saves a frame in the format implied by the path's extension.
pub fn save_image(image: &Frame, output_path: &Path) -> Result<(), OutputError> {
    match OutputFormat::from_path(output_path)? {
        OutputFormat::Png => save_image_as_png(image, output_path),
        OutputFormat::Exr => save_image_as_exr(image, output_path),
    }
}

/// Adds the default TEV port to an address that has none.
pub fn tev_address_with_port(address: &str) -> String {
    if address.contains(':') {
        address.to_string()
    } else {
        format!("{}:{}", address, TEV_DEFAULT_PORT)
    }
}

/// Streams a frame to TEV for live inspection.
///
/// Best effort: connection or protocol failures are logged and ignored, a
/// missing viewer must never stop a render.
pub fn send_image_to_tev(image: &Frame, tev_address: &str, image_name: &str) {
    let tev_address = tev_address_with_port(tev_address);
    let (width, height) = image.dimensions();

    debug!("Attempting to connect to TEV at {}", tev_address);
    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }
    let mut client = TevClient::wrap(stream);

    let create_packet = PacketCreateImage {
        image_name,
        width,
        height,
        channel_names: &["R", "G", "B"],
        grab_focus: true,
    };
    if let Err(e) = client.send(create_packet) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    // TEV wants planar channels: RRR...GGG...BBB...
    let pixel_count = (width * height) as usize;
    let mut planar = Vec::with_capacity(pixel_count * 3);
    for channel in 0..3 {
        planar.extend(image.pixels().map(|pixel| pixel[channel]));
    }

    let start_time = std::time::Instant::now();
    let update_packet = PacketUpdateImage {
        image_name,
        grab_focus: false,
        channel_names: &["R", "G", "B"],
        x: 0,
        y: 0,
        width,
        height,
        channel_offsets: &[0, pixel_count as u64, 2 * pixel_count as u64],
        channel_strides: &[1, 1, 1],
        data: &planar,
    };
    match client.send(update_packet) {
        Ok(_) => info!(
            "Image data sent to TEV at {} in {:.2?}",
            tev_address,
            start_time.elapsed()
        ),
        Err(e) => warn!("Failed to send image data to TEV: {}", e),
    }
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use marchling::tracer::MAX_STEPS;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "marchling")]
#[command(about = "Sphere-traces an animated SDF creature")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 450, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Animation time of the first frame, in seconds
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub time: f32,

    /// Number of frames to render; more than one writes a numbered sequence
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Frames per second of the sequence
    #[arg(long, default_value_t = 30.0, value_parser = parse_fps)]
    pub fps: f32,

    /// Sphere tracing iteration budget per ray
    #[arg(long, default_value_t = MAX_STEPS)]
    pub max_steps: u32,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Send frames to TEV for real-time visualization
    #[arg(long)]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long)]
    pub tev_address: Option<String>,

    /// Compare single-threaded and parallel rendering of one frame
    #[arg(long)]
    pub bench: bool,
}

/// Frame rates must be finite and strictly positive.
fn parse_fps(value: &str) -> Result<f32, String> {
    let fps: f32 = value
        .parse()
        .map_err(|e| format!("'{}' is not a number: {}", value, e))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("frame rate must be positive, got {}", value))
    }
}

impl Args {
    /// Animation time of frame `index`.
    pub fn frame_time(&self, index: u32) -> f32 {
        self.time + index as f32 / self.fps
    }

    /// TEV address to stream to, if streaming is enabled.
    pub fn tev_target(&self) -> Option<&str> {
        match (&self.tev_address, self.tev) {
            (Some(address), _) => Some(address.as_str()),
            (None, true) => Some("localhost"),
            (None, false) => None,
        }
    }
}

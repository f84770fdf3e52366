use clap::Parser;
use log::{error, info};

use marchling::output::{frame_path, save_image, send_image_to_tev, OutputFormat};
use marchling::{Camera, Scene, SphereTracer};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("Marchling - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let camera = Camera::new(args.width, args.height);
    let tracer = SphereTracer::with_max_steps(args.max_steps);

    if args.bench {
        run_benchmark(&camera, &tracer, args.time);
        return;
    }

    // Fail on a bad extension before spending time on rendering
    if let Err(e) = OutputFormat::from_path(&args.output) {
        error!("{}", e);
        std::process::exit(1);
    }

    info!(
        "Image resolution: {}x{}, frames: {}, step budget: {}",
        args.width, args.height, args.frames, args.max_steps
    );

    for index in 0..args.frames {
        let scene = Scene::at(args.frame_time(index));
        let image = camera.render(&scene, &tracer);

        let path = if args.frames > 1 {
            frame_path(&args.output, index)
        } else {
            args.output.clone()
        };

        if let Some(address) = args.tev_target() {
            send_image_to_tev(&image, address, &path.to_string_lossy());
        }

        if let Err(e) = save_image(&image, &path) {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Render the same frame single-threaded and in parallel, and report the speedup.
fn run_benchmark(camera: &Camera, tracer: &SphereTracer, time: f32) {
    use std::time::Instant;

    info!(
        "🏁 Benchmark: {}x{}, t = {:.3}s",
        camera.image_width, camera.image_height, time
    );
    let scene = Scene::at(time);

    let start = Instant::now();
    let sequential = camera.render_sequential(&scene, tracer);
    let sequential_time = start.elapsed();
    info!("Sequential: {:.2?}", sequential_time);

    let start = Instant::now();
    let parallel = camera.render(&scene, tracer);
    let parallel_time = start.elapsed();
    info!(
        "Parallel:   {:.2?} on {} threads",
        parallel_time,
        rayon::current_num_threads()
    );

    let speedup = sequential_time.as_secs_f64() / parallel_time.as_secs_f64().max(f64::EPSILON);
    info!("Speedup:    {:.1}x", speedup);

    if sequential.as_raw() != parallel.as_raw() {
        error!("Parallel render differs from the sequential reference");
        std::process::exit(1);
    }
}

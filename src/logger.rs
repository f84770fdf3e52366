use log::LevelFilter;

/// Initialize the logger at `level`.
///
/// `RUST_LOG` is parsed afterwards, so per-module directives from the
/// environment still win. The EXR encoder is chatty at info and is capped
/// at warnings.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .filter_module("exr", LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

use env_logger::Builder;
use log::LevelFilter;

/// Installs the `env_logger` backend. Engine events are emitted with `tracing`,
/// whose `log` feature forwards them here.
///
/// `RUST_LOG` overrides the default level.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .parse_default_env();
    if let Err(e) = builder.try_init() {
        eprintln!("Warning: logger already initialized: {}", e);
    }
}

//! Tracing subscriber setup for the projlock binary.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a default level: warn, info, debug, trace.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; `fallback` applies otherwise.
pub fn init(fallback: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(fallback.into()));

    // A subscriber installed earlier (tests, embedding) is kept.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

//! Log subscriber for the binary. Everything goes to stderr so the progress
//! line on stdout stays intact.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Overrides the `-v` default, e.g. `CANVAS_LOG=canvas_vcs=trace`.
pub const LOG_ENV_VAR: &str = "CANVAS_LOG";

pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

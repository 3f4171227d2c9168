//! Diagnostic logging.
//!
//! Pass/fail lines go to stdout through the recorder; tracing output goes to
//! stderr so it never interleaves with them in a captured report.

/// Filter level for a `-v` count: 0 → warn, 1 → info, 2 → debug, 3+ → trace
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` takes precedence over `verbosity`.
///
/// This should be called once at startup.
pub fn init_logging(verbosity: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = level_for_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("forum_smoke={level},reqwest=warn")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

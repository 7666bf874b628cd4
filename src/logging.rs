// ABOUTME: Diagnostic logging setup built on tracing-subscriber
// ABOUTME: RUST_LOG takes precedence; otherwise -v flags raise the level for this crate

use tracing_subscriber::EnvFilter;

pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbosity {
            0 => EnvFilter::new("remote_update=warn"),
            1 => EnvFilter::new("remote_update=info"),
            2 => EnvFilter::new("remote_update=debug"),
            _ => EnvFilter::new("remote_update=trace"),
        }
    }
}

/// Logs go to stderr so stdout stays clean for the command line and prompt.
pub fn init_logging(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr so stdout only
/// carries the user-facing messages.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. Filter comes from `RUST_LOG` (default `info`).
/// Output goes to stderr so command output on stdout stays machine-readable.
/// Calling this twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .try_init();
}

// logging.rs — Tracing subscriber setup for the binary
//
// Preconditions: called once, before any linting.
// Postconditions: a stderr `fmt` subscriber is installed when requested.
// Failure modes: a second installation attempt is ignored.
// Side effects: sets the global default subscriber.

use tracing_subscriber::EnvFilter;

/// Build the filter from `PROPLINT_LOG`, falling back to `RUST_LOG`.
///
/// `verbose` forces `debug`. Returns `None` when nothing asked for logs.
fn build_filter(verbose: bool) -> Option<EnvFilter> {
    if verbose {
        return Some(EnvFilter::new("debug"));
    }
    if let Ok(val) = std::env::var("PROPLINT_LOG") {
        return Some(EnvFilter::builder().parse_lossy(val));
    }
    if std::env::var("RUST_LOG").is_ok() {
        return Some(EnvFilter::from_default_env());
    }
    None
}

/// Install the global subscriber. Output goes to stderr so stdout stays
/// reserved for the report.
pub fn init_tracing(verbose: bool) {
    let Some(filter) = build_filter(verbose) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

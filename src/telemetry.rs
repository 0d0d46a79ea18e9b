//! Tracing subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "movie_catalog=info,tower_http=info";

/// Install a fmt subscriber filtered by `RUST_LOG`. A second call is a no-op.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

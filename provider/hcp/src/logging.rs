//! Structured logging setup for hosts embedding the provider.

use tracing_subscriber::EnvFilter;

/// Variable checked before `RUST_LOG`
pub const ENV_LOG: &str = "HCP_LOG";
const DEFAULT_FILTER: &str = "info";

fn filter_directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    set(ENV_LOG)
        .or_else(|| set("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install a global fmt subscriber. Later calls, or a subscriber installed
/// by the host, leave the existing one in place.
pub fn init() {
    let directives = filter_directives(|key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok() {
        tracing::debug!("Logging initialized with filter {}", directives);
    }
}

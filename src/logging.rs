//! Diagnostic logging setup.
//!
//! Events go through `tracing`; [`init`] installs a stderr `fmt` subscriber
//! filtered by `CMDKIT_LOG` (EnvFilter syntax, default `warn`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CMDKIT_LOG";

/// Filter used when `CMDKIT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    init_with_filter(filter_from_env(|name| std::env::var(name).ok()));
}

pub fn init_with_filter(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve the filter from `CMDKIT_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn filter_from_env<FEnv>(env_lookup: FEnv) -> EnvFilter
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(LOG_ENV)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Record a message at critical severity.
///
/// `tracing` has no level above `ERROR`, so critical records are errors
/// tagged with `severity = "critical"`.
pub fn critical(message: &str) {
    tracing::error!(severity = "critical", "{message}");
}

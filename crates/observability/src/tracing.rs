//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let filter = match EnvFilter::try_new(&config.filter) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("invalid log filter {:?} ({err}), falling back to info", config.filter);
            EnvFilter::new("info")
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    // Another subscriber may already be installed; that is fine.
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_ok() {
        ::tracing::debug!(filter = %config.filter, json = config.json, "tracing initialized");
    }
}

//! Tracing/logging setup shared by hosts embedding the inventory core.

pub mod config;
pub mod tracing;

pub use config::ObservabilityConfig;

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::from_env());
}

/// Initialize with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init(config);
}

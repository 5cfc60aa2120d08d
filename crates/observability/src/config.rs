//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Filter directive variable, checked before `RUST_LOG`.
pub const FILTER_ENV: &str = "SATCHEL_LOG";
/// Set to `0`/`false` to get human-readable lines instead of JSON.
pub const JSON_ENV: &str = "SATCHEL_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives, e.g. `"info,satchel_inventory=debug"`.
    pub filter: String,
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: true,
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup(FILTER_ENV).or_else(|| lookup("RUST_LOG")) {
            if !filter.trim().is_empty() {
                config.filter = filter;
            }
        }
        if let Some(json) = lookup(JSON_ENV) {
            config.json = !matches!(json.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = ObservabilityConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ObservabilityConfig::default());
    }

    #[test]
    fn own_variable_wins_over_rust_log() {
        let config = ObservabilityConfig::from_lookup(lookup_from(&[
            ("RUST_LOG", "warn"),
            (FILTER_ENV, "debug"),
        ]));
        assert_eq!(config.filter, "debug");

        let config = ObservabilityConfig::from_lookup(lookup_from(&[("RUST_LOG", "warn")]));
        assert_eq!(config.filter, "warn");
    }

    #[test]
    fn json_can_be_switched_off() {
        let config = ObservabilityConfig::from_lookup(lookup_from(&[(JSON_ENV, "false")]));
        assert!(!config.json);
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: ObservabilityConfig = serde_json::from_str(r#"{ "json": false }"#).unwrap();
        assert_eq!(config.filter, "info");
        assert!(!config.json);
    }
}

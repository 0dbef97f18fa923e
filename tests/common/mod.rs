//! Shared utilities for integration tests.

use path_router::config::{parse_config, ConfigFormat, RawConfig};
use path_router::Router;

/// Parse a YAML routing document.
pub fn yaml_config(yaml: &str) -> RawConfig {
    parse_config(yaml, ConfigFormat::Yaml).unwrap()
}

/// Parse and compile a YAML routing document.
pub fn yaml_router(yaml: &str) -> Router {
    Router::from_config(&yaml_config(yaml)).unwrap()
}

/// A config with one catch-all route to `target` and one delay for `/**`.
#[allow(dead_code)]
pub fn generation_config(target: &str, delay_ms: u64) -> RawConfig {
    yaml_config(&format!(
        "paths:\n  /**:\n    target: {target}\npathDelays:\n  /**: {delay_ms}\n"
    ))
}

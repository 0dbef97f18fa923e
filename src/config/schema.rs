//! Configuration schema definitions.
//!
//! The raw routing configuration handed over by the host proxy. Key
//! names (`paths`, `target`, `secure`, `pathRewrite`, `pathDelays`)
//! are a compatibility contract and must not change. Unknown keys are
//! ignored so a full proxy configuration file can be loaded as-is.
//!
//! Maps are `IndexMap` so declaration order survives deserialization;
//! route selection and rewrite precedence depend on it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    /// Route pattern → route definition, in declaration order.
    pub paths: IndexMap<String, PathConfig>,

    /// Route pattern → injected delay in milliseconds.
    pub path_delays: IndexMap<String, u64>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single route definition.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathConfig {
    /// Upstream host, e.g. `localhost:9093` or `api.internal/`.
    pub target: String,

    /// Forward over https instead of http.
    #[serde(default)]
    pub secure: bool,

    /// Rewrite regex → replacement template, in declaration order.
    #[serde(default, alias = "rewriteRules")]
    pub path_rewrite: IndexMap<String, String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

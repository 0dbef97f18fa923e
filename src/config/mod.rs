//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/TOML/JSON)
//!     → loader.rs (parse & deserialize, order preserved)
//!     → validation.rs (every pattern and rewrite regex compiles)
//!     → RawConfig (validated, immutable)
//!     → routing::Router::from_config
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → sent to lifecycle::reload for an atomic router swap
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - Key names are a compatibility contract with the host proxy
//! - Invalid files are rejected; the running config stays in place

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError, ConfigFormat};
pub use schema::{ObservabilityConfig, PathConfig, RawConfig};
pub use validation::validate_config;
pub use watcher::ConfigWatcher;

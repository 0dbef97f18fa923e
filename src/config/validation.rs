//! Configuration validation.
//!
//! # Responsibilities
//! - Check every route pattern, rewrite regex and delay pattern compiles
//! - Report every broken entry, not just the first
//!
//! # Design Decisions
//! - Runs before a config is accepted (startup and reload)
//! - Pure function: RawConfig → Result<(), Vec<CompileError>>
//! - Table compilation still fails fast on its own; this pass exists so
//!   an operator sees the whole list in one go

use crate::config::schema::RawConfig;
use crate::routing::{CompileError, GlobMatcher, RewriteRule};

/// Validate a raw configuration, collecting all compile errors.
pub fn validate_config(config: &RawConfig) -> Result<(), Vec<CompileError>> {
    let mut errors = Vec::new();

    for (pattern, path) in &config.paths {
        if let Err(source) = GlobMatcher::compile(pattern) {
            errors.push(CompileError::RoutePattern {
                pattern: pattern.clone(),
                source,
            });
        }
        for (rule, replacement) in &path.path_rewrite {
            if let Err(e) = RewriteRule::compile(pattern, rule, replacement) {
                errors.push(e);
            }
        }
    }

    for pattern in config.path_delays.keys() {
        if let Err(source) = GlobMatcher::compile(pattern) {
            errors.push(CompileError::DelayPattern {
                pattern: pattern.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

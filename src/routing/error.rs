//! Compilation errors for route and delay tables.

use thiserror::Error;

/// A configured pattern or rewrite rule failed to compile.
///
/// Compilation is all-or-nothing: any one of these aborts the whole
/// table build.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid route pattern '{pattern}': {source}")]
    RoutePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid rewrite rule '{rule}' on route '{route}': {source}")]
    RewriteRule {
        route: String,
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid delay pattern '{pattern}': {source}")]
    DelayPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl CompileError {
    /// The configured pattern or rule text that failed.
    pub fn offending(&self) -> &str {
        match self {
            CompileError::RoutePattern { pattern, .. } => pattern,
            CompileError::RewriteRule { rule, .. } => rule,
            CompileError::DelayPattern { pattern, .. } => pattern,
        }
    }
}

//! Path rewriting.
//!
//! # Responsibilities
//! - Hold compiled (regex, replacement) rewrite rules for a route
//! - Apply the first matching rule to a request path
//!
//! # Design Decisions
//! - Rules are tried in declaration order; the first hit wins
//! - The winning rule replaces every occurrence of its match
//! - Replacements expand `$1`, `${name}` from capture groups
//! - Text outside the match (including `?query`) is kept verbatim
//! - No rule matching is not an error: the path is returned as-is
//!
//! Patterns use `regex` crate syntax, where `\w`, `\d` and `\s` are
//! Unicode-aware: `^/p/(\w+)/` matches `/p/café/`. Use `(?-u:\w)` or an
//! explicit `[A-Za-z0-9_]` class to restrict a rule to ASCII.

use std::borrow::Cow;

use regex::Regex;

use crate::routing::error::CompileError;

/// A single compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    regex: Regex,
    replacement: String,
}

impl RewriteRule {
    /// Compile a rewrite rule declared on `route`.
    pub fn compile(route: &str, pattern: &str, replacement: &str) -> Result<Self, CompileError> {
        let regex = Regex::new(pattern).map_err(|source| CompileError::RewriteRule {
            route: route.to_string(),
            rule: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            regex,
            replacement: replacement.to_string(),
        })
    }

    /// The regex source of this rule.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The replacement template of this rule.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Whether the rule's regex matches anywhere in `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Replace every match in `path` with the expanded template.
    pub fn apply<'p>(&self, path: &'p str) -> Cow<'p, str> {
        self.regex.replace_all(path, self.replacement.as_str())
    }
}

/// Rewrite `path` with the first rule that matches it.
pub fn rewrite_path<'p>(rules: &[RewriteRule], path: &'p str) -> Cow<'p, str> {
    match rules.iter().find(|rule| rule.is_match(path)) {
        Some(rule) => {
            let rewritten = rule.apply(path);
            tracing::trace!(path, rule = rule.pattern(), rewritten = %rewritten, "Rewrote path");
            rewritten
        }
        None => Cow::Borrowed(path),
    }
}

//! Compiled route table.
//!
//! # Responsibilities
//! - Compile configured path patterns and their rewrite rules
//! - Look up every route matching a request path
//! - Select the route used for forwarding
//!
//! # Design Decisions
//! - Entries kept in a `Vec` in declaration order
//! - First declared match wins when patterns overlap
//! - Any bad pattern or rewrite regex fails the whole compile
//! - Immutable after construction (thread-safe without locks)

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::config::PathConfig;
use crate::routing::error::CompileError;
use crate::routing::matcher::GlobMatcher;
use crate::routing::rewrite::{self, RewriteRule};

/// Where and how a matched request is forwarded.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pattern: String,
    target: String,
    secure: bool,
    rewrite_rules: Vec<RewriteRule>,
}

impl RouteDescriptor {
    pub fn new(
        pattern: impl Into<String>,
        target: impl Into<String>,
        secure: bool,
        rewrite_rules: Vec<RewriteRule>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
            secure,
            rewrite_rules,
        }
    }

    /// Glob pattern the route was declared under.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Upstream host, optionally with port and trailing slash.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn rewrite_rules(&self) -> &[RewriteRule] {
        &self.rewrite_rules
    }

    /// Apply this route's rewrite rules to `path`.
    pub fn rewrite_path<'p>(&self, path: &'p str) -> Cow<'p, str> {
        rewrite::rewrite_path(&self.rewrite_rules, path)
    }
}

#[derive(Debug, Clone)]
struct RouteEntry {
    matcher: GlobMatcher,
    descriptor: RouteDescriptor,
}

/// Ordered, compiled set of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Compile the configured paths, keeping declaration order.
    pub fn compile(paths: &IndexMap<String, PathConfig>) -> Result<Self, CompileError> {
        let mut entries = Vec::with_capacity(paths.len());

        for (pattern, config) in paths {
            let matcher = GlobMatcher::compile(pattern).map_err(|source| {
                CompileError::RoutePattern {
                    pattern: pattern.clone(),
                    source,
                }
            })?;

            let rewrite_rules = config
                .path_rewrite
                .iter()
                .map(|(regex, replacement)| RewriteRule::compile(pattern, regex, replacement))
                .collect::<Result<Vec<_>, _>>()?;

            entries.push(RouteEntry {
                matcher,
                descriptor: RouteDescriptor::new(
                    pattern.as_str(),
                    config.target.as_str(),
                    config.secure,
                    rewrite_rules,
                ),
            });
        }

        tracing::debug!(routes = entries.len(), "Compiled route table");
        Ok(Self { entries })
    }

    /// Routes matching `path`, in declaration order, without allocating.
    pub fn matching<'a, 'p>(
        &'a self,
        path: &'p str,
    ) -> impl Iterator<Item = &'a RouteDescriptor> + 'p
    where
        'a: 'p,
    {
        self.entries
            .iter()
            .filter(move |entry| entry.matcher.matches(path))
            .map(|entry| &entry.descriptor)
    }

    /// Every route matching `path`, in declaration order.
    pub fn find_routes(&self, path: &str) -> Vec<&RouteDescriptor> {
        self.entries
            .iter()
            .filter(|entry| entry.matcher.matches(path))
            .map(|entry| &entry.descriptor)
            .collect()
    }

    /// The route used to forward `path`: the first declared match.
    pub fn select_route(&self, path: &str) -> Option<&RouteDescriptor> {
        self.entries
            .iter()
            .find(|entry| entry.matcher.matches(path))
            .map(|entry| &entry.descriptor)
    }

    /// All routes in declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

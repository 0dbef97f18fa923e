//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Compile route and delay tables from one raw configuration
//! - Turn a request path into an upstream URL
//! - Return matched URL or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Explicit NoMatch rather than silent default; the caller owns
//!   the passthrough policy
//! - Delay lookup is independent of route selection

use crate::config::RawConfig;
use crate::routing::delay::DelayTable;
use crate::routing::error::CompileError;
use crate::routing::table::{RouteDescriptor, RouteTable};
use crate::routing::url::build_url;

/// Result of routing a single request path.
#[derive(Debug, Clone)]
pub enum RouteOutcome<'t> {
    /// A route matched; `url` is the fully-qualified upstream URL.
    Matched {
        url: String,
        route: &'t RouteDescriptor,
    },
    /// No configured pattern matched the path.
    NoMatch,
}

impl<'t> RouteOutcome<'t> {
    pub fn matched(&self) -> bool {
        matches!(self, RouteOutcome::Matched { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            RouteOutcome::Matched { url, .. } => Some(url.as_str()),
            RouteOutcome::NoMatch => None,
        }
    }

    pub fn route(&self) -> Option<&'t RouteDescriptor> {
        match self {
            RouteOutcome::Matched { route, .. } => Some(*route),
            RouteOutcome::NoMatch => None,
        }
    }

    pub fn into_url(self) -> Option<String> {
        match self {
            RouteOutcome::Matched { url, .. } => Some(url),
            RouteOutcome::NoMatch => None,
        }
    }
}

/// Select, rewrite and assemble the upstream URL for `path`.
pub fn route<'t>(table: &'t RouteTable, path: &str) -> RouteOutcome<'t> {
    match table.select_route(path) {
        Some(descriptor) => {
            let rewritten = descriptor.rewrite_path(path);
            RouteOutcome::Matched {
                url: build_url(descriptor, &rewritten),
                route: descriptor,
            }
        }
        None => RouteOutcome::NoMatch,
    }
}

/// Compiled routing state for one configuration generation.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: RouteTable,
    delays: DelayTable,
}

impl Router {
    /// Compile both tables. Nothing is returned unless both succeed.
    pub fn from_config(config: &RawConfig) -> Result<Self, CompileError> {
        let routes = RouteTable::compile(&config.paths)?;
        let delays = DelayTable::compile(&config.path_delays)?;
        Ok(Self { routes, delays })
    }

    pub fn new(routes: RouteTable, delays: DelayTable) -> Self {
        Self { routes, delays }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn delays(&self) -> &DelayTable {
        &self.delays
    }

    pub fn route(&self, path: &str) -> RouteOutcome<'_> {
        route(&self.routes, path)
    }

    pub fn find_routes(&self, path: &str) -> Vec<&RouteDescriptor> {
        self.routes.find_routes(path)
    }

    pub fn find_delay(&self, path: &str) -> u64 {
        self.delays.find_delay(path)
    }
}

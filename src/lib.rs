//! Path routing, rewrite and delay engine for an intercepting API proxy.
//!
//! For every inbound request path the engine decides which upstream
//! target receives it, how the path is rewritten on the way, and how
//! long to hold the request first.
//!
//! ```text
//! RawConfig ──compile──▶ Router { RouteTable, DelayTable }
//!           ──ArcSwap──▶ SharedRouter
//!
//! request path ─▶ RouteTable::select_route ─▶ rewrite_path ─▶ build_url
//!              ─▶ Matched { url } | NoMatch
//! request path ─▶ DelayTable::find_delay ─▶ milliseconds (0 if unmatched)
//! ```

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RawConfig;
pub use lifecycle::{SharedRouter, Shutdown};
pub use routing::{CompileError, RouteOutcome, Router};

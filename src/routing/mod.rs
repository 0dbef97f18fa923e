//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (startup and every reload):
//!     RawConfig.paths / RawConfig.pathDelays
//!     → matcher.rs (glob → anchored regex)
//!     → rewrite.rs (compile rewrite regexes)
//!     → Freeze as immutable RouteTable / DelayTable
//!
//! Incoming request path
//!     → table.rs (first declared matching route)
//!     → rewrite.rs (first matching rewrite rule)
//!     → url.rs (scheme://target + rewritten path)
//!     → Return: Matched { url } or NoMatch
//!
//! Incoming request path
//!     → delay.rs (first declared matching delay, else 0)
//! ```
//!
//! # Design Decisions
//! - Tables compiled up front, immutable at runtime
//! - Deterministic: declaration order decides overlaps
//! - Compilation is all-or-nothing
//! - No-match outcomes are values, not errors, and are not logged here

pub mod delay;
pub mod error;
pub mod matcher;
pub mod rewrite;
pub mod router;
pub mod table;
pub mod url;

pub use delay::DelayTable;
pub use error::CompileError;
pub use matcher::GlobMatcher;
pub use rewrite::RewriteRule;
pub use router::{route, RouteOutcome, Router};
pub use table::{RouteDescriptor, RouteTable};
pub use url::build_url;

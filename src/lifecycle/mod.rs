//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Compile Router → Publish (generation 1)
//!
//! Reload (reload.rs):
//!     ConfigWatcher update → Compile new Router off to the side
//!     → ArcSwap store (generation n+1) → new lookups see it
//!     Compile failure → logged, current Router keeps serving
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → reload loop exits
//! ```
//!
//! # Design Decisions
//! - Fail fast at startup: an invalid config is fatal
//! - Fail safe on reload: an invalid config is ignored
//! - No partial invalidation: the whole Router swaps at once

pub mod reload;
pub mod shutdown;

pub use reload::SharedRouter;
pub use shutdown::Shutdown;

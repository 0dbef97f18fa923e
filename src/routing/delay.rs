//! Latency injection table.
//!
//! Parallel to the route table: glob patterns mapped to a delay in
//! milliseconds, compiled and looked up independently of routing so a
//! request can be delayed even when no route matches.

use std::time::Duration;

use indexmap::IndexMap;

use crate::routing::error::CompileError;
use crate::routing::matcher::GlobMatcher;

#[derive(Debug, Clone)]
struct DelayEntry {
    matcher: GlobMatcher,
    delay_ms: u64,
}

/// Ordered, compiled set of path delays.
#[derive(Debug, Clone, Default)]
pub struct DelayTable {
    entries: Vec<DelayEntry>,
}

impl DelayTable {
    /// Compile the configured path delays, keeping declaration order.
    pub fn compile(delays: &IndexMap<String, u64>) -> Result<Self, CompileError> {
        let entries = delays
            .iter()
            .map(|(pattern, &delay_ms)| {
                let matcher = GlobMatcher::compile(pattern).map_err(|source| {
                    CompileError::DelayPattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })?;
                Ok(DelayEntry { matcher, delay_ms })
            })
            .collect::<Result<Vec<_>, CompileError>>()?;

        tracing::debug!(delays = entries.len(), "Compiled delay table");
        Ok(Self { entries })
    }

    /// Delay in milliseconds for `path`; `0` when nothing matches.
    ///
    /// The first declared matching pattern wins.
    pub fn find_delay(&self, path: &str) -> u64 {
        self.entries
            .iter()
            .find(|entry| entry.matcher.matches(path))
            .map_or(0, |entry| entry.delay_ms)
    }

    /// [`find_delay`](Self::find_delay) as a `Duration`.
    pub fn find_delay_duration(&self, path: &str) -> Duration {
        Duration::from_millis(self.find_delay(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Metrics collection.
//!
//! # Metrics
//! - `routing_lookups_total` (counter): lookups by outcome (matched, no_match)
//! - `routing_lookup_duration_seconds` (histogram): select + rewrite + assemble
//! - `routing_reloads_total` (counter): reloads by result (ok, rejected)
//! - `routing_routes_configured` (gauge): routes in the live table
//! - `routing_delays_configured` (gauge): delay entries in the live table
//! - `routing_delays_injected_total` (counter): requests that were delayed
//! - `routing_injected_delay_seconds` (histogram): injected delay sizes
//!
//! # Design Decisions
//! - Facade only; the host process installs the exporter
//! - Updates are no-ops when no recorder is installed

use std::time::{Duration, Instant};

pub fn record_lookup(matched: bool, start: Instant) {
    let outcome = if matched { "matched" } else { "no_match" };
    ::metrics::counter!("routing_lookups_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("routing_lookup_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_reload(success: bool) {
    let result = if success { "ok" } else { "rejected" };
    ::metrics::counter!("routing_reloads_total", "result" => result).increment(1);
}

pub fn record_table_sizes(routes: usize, delays: usize) {
    ::metrics::gauge!("routing_routes_configured").set(routes as f64);
    ::metrics::gauge!("routing_delays_configured").set(delays as f64);
}

pub fn record_delay_injected(delay: Duration) {
    ::metrics::counter!("routing_delays_injected_total").increment(1);
    ::metrics::histogram!("routing_injected_delay_seconds").record(delay.as_secs_f64());
}

//! Upstream URL assembly.
//!
//! The target and the rewritten path are joined with exactly the slashes
//! the configuration supplies, plus one separator when neither side has
//! one. A rewrite that strips a leading prefix (`'^/api/': ''`) still
//! yields `host/rest` rather than `hostrest`. Slashes are never removed.

use crate::routing::table::RouteDescriptor;

/// Scheme selected by a route's `secure` flag.
pub fn scheme(secure: bool) -> &'static str {
    if secure {
        "https"
    } else {
        "http"
    }
}

/// Build `scheme://target` + `rewritten_path`.
pub fn build_url(descriptor: &RouteDescriptor, rewritten_path: &str) -> String {
    let scheme = scheme(descriptor.secure());
    let target = descriptor.target();

    let mut url =
        String::with_capacity(scheme.len() + 4 + target.len() + rewritten_path.len());
    url.push_str(scheme);
    url.push_str("://");
    url.push_str(target);
    if needs_separator(target, rewritten_path) {
        url.push('/');
    }
    url.push_str(rewritten_path);
    url
}

fn needs_separator(target: &str, rewritten_path: &str) -> bool {
    !target.ends_with('/') && !rewritten_path.is_empty() && !rewritten_path.starts_with('/')
}

//! Glob pattern matching.
//!
//! # Responsibilities
//! - Compile a glob route pattern into a reusable predicate
//! - Test full-path equivalence against a request path
//!
//! # Design Decisions
//! - A maximal run of `*` matches any sequence, including `/`
//! - `*` and `**` are the same wildcard (no segment boundaries)
//! - Every other character is literal and case-sensitive
//! - Anchored at both ends: a prefix or substring hit is not a match
//! - The path is matched as given, query string included

use regex::Regex;

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    pattern: String,
    regex: Regex,
}

impl GlobMatcher {
    /// Compile a glob pattern.
    ///
    /// Callers wrap the error with the table it belongs to.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&glob_to_regex(pattern))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if the whole candidate matches the pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// The glob pattern this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Translate a glob into an anchored regular expression.
///
/// `(?s)` lets the wildcard cross any character, newlines included.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    out.push_str("(?s)^");

    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            while chars.peek() == Some(&'*') {
                chars.next();
            }
            out.push_str(&regex::escape(&literal));
            literal.clear();
            out.push_str(".*");
        } else {
            literal.push(c);
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

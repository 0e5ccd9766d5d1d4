//! The [`PatternMatcher`] trait and its servlet-style implementation.

use crate::UrlPattern;

/// Decides whether a request path matches a compiled pattern.
///
/// The login protocol receives a matcher from the outer filter on every
/// logout/bypass check, so the filter decides the matching rules while
/// the protocol owns the compiled patterns.
pub trait PatternMatcher: Send + Sync {
    /// Returns `true` if `path` matches `pattern`.
    fn matches(&self, path: &str, pattern: &UrlPattern) -> bool;
}

/// Case-sensitive servlet `url-pattern` matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServletPatternMatcher;

impl PatternMatcher for ServletPatternMatcher {
    fn matches(&self, path: &str, pattern: &UrlPattern) -> bool {
        let matched = pattern.matches(path);
        tracing::trace!(path, %pattern, matched, "url pattern checked");
        matched
    }
}

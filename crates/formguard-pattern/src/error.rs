//! Error types for pattern compilation.

/// Errors that can occur when compiling a [`UrlPattern`](crate::UrlPattern).
///
/// Patterns are compiled at startup, so any of these means the
/// configuration is wrong and the authenticator can't be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("url pattern is empty")]
    Empty,

    /// The pattern doesn't follow the servlet pattern syntax.
    #[error("invalid url pattern {pattern:?}: {reason}")]
    Invalid {
        /// The pattern as written.
        pattern: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

//! URL patterns for formguard.
//!
//! Pages like the login page or the logout page are configured as paths
//! and compiled once, at startup, into [`UrlPattern`]s. Each request path
//! is then checked against them through a [`PatternMatcher`].
//!
//! The pattern syntax is the servlet `url-pattern` syntax:
//!
//! | Pattern       | Matches                                        |
//! |---------------|------------------------------------------------|
//! | `/login.jsp`  | exactly `/login.jsp`                           |
//! | `/admin/*`    | `/admin` and everything below it              |
//! | `*.jsp`       | any path whose last segment ends with `.jsp`   |
//! | `/`           | every path (the default pattern)               |
//!
//! Matching is a trait so the outer filter can plug in its own rules
//! (regular expressions, case-insensitive matching, ...). The
//! [`ServletPatternMatcher`] is the reference implementation.

mod error;
mod matcher;
mod pattern;

pub use error::PatternError;
pub use matcher::{PatternMatcher, ServletPatternMatcher};
pub use pattern::{PatternKind, UrlPattern};

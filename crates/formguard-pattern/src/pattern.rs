//! Compiled URL patterns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PatternError;

// ---------------------------------------------------------------------------
// PatternKind
// ---------------------------------------------------------------------------

/// The shape of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    /// Matches one path exactly.
    Exact(String),

    /// Matches the prefix itself and every path below it.
    /// An empty prefix (from `/*`) matches everything.
    PathPrefix(String),

    /// Matches paths whose last segment ends with `.<extension>`.
    Extension(String),

    /// The `/` pattern. Matches every path.
    Default,
}

// ---------------------------------------------------------------------------
// UrlPattern
// ---------------------------------------------------------------------------

/// A URL pattern, compiled from its servlet-syntax string.
///
/// Serde reads and writes the pattern as its source string, compiling on
/// the way in, so a pattern can be used directly in configuration structs.
///
/// ```rust
/// use formguard_pattern::UrlPattern;
///
/// let pattern = UrlPattern::compile("/admin/*").unwrap();
/// assert!(pattern.matches("/admin/users"));
/// assert!(!pattern.matches("/administrator"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlPattern {
    source: String,
    kind: PatternKind,
}

impl UrlPattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    /// - [`PatternError::Empty`] for an empty string
    /// - [`PatternError::Invalid`] if the string isn't a valid servlet
    ///   pattern (wildcards in the wrong place, no leading `/`, ...)
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let kind = parse(source)?;
        Ok(Self {
            source: source.to_string(),
            kind,
        })
    }

    /// Returns the pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the compiled shape.
    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// Checks `path` against this pattern using the servlet rules.
    pub fn matches(&self, path: &str) -> bool {
        match &self.kind {
            PatternKind::Exact(exact) => path == exact,
            PatternKind::PathPrefix(prefix) => {
                prefix.is_empty()
                    || path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            PatternKind::Extension(extension) => {
                let last_segment = path.rsplit('/').next().unwrap_or(path);
                last_segment
                    .strip_suffix(extension.as_str())
                    .is_some_and(|stem| stem.ends_with('.'))
            }
            PatternKind::Default => true,
        }
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for UrlPattern {
    type Error = PatternError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        let kind = parse(&source)?;
        Ok(Self { source, kind })
    }
}

impl From<UrlPattern> for String {
    fn from(pattern: UrlPattern) -> Self {
        pattern.source
    }
}

fn parse(source: &str) -> Result<PatternKind, PatternError> {
    let invalid = |reason| PatternError::Invalid {
        pattern: source.to_string(),
        reason,
    };

    if source.is_empty() {
        return Err(PatternError::Empty);
    }
    if source == "/" {
        return Ok(PatternKind::Default);
    }

    if let Some(extension) = source.strip_prefix("*.") {
        if extension.is_empty() {
            return Err(invalid("extension pattern has no extension"));
        }
        if extension.contains(['/', '*']) {
            return Err(invalid("extension may not contain '/' or '*'"));
        }
        return Ok(PatternKind::Extension(extension.to_string()));
    }

    if !source.starts_with('/') {
        return Err(invalid("pattern must start with '/' or '*.'"));
    }

    if let Some(prefix) = source.strip_suffix("/*") {
        if prefix.contains('*') {
            return Err(invalid("'*' is only allowed as the last segment"));
        }
        return Ok(PatternKind::PathPrefix(prefix.to_string()));
    }

    if source.contains('*') {
        return Err(invalid("'*' is only allowed as the last segment"));
    }
    Ok(PatternKind::Exact(source.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> UrlPattern {
        UrlPattern::compile(source).expect("pattern should compile")
    }

    // =====================================================================
    // compile()
    // =====================================================================

    #[test]
    fn test_compile_exact() {
        assert_eq!(
            compile("/login.jsp").kind(),
            &PatternKind::Exact("/login.jsp".into())
        );
    }

    #[test]
    fn test_compile_path_prefix() {
        assert_eq!(
            compile("/admin/*").kind(),
            &PatternKind::PathPrefix("/admin".into())
        );
        assert_eq!(compile("/*").kind(), &PatternKind::PathPrefix(String::new()));
    }

    #[test]
    fn test_compile_extension() {
        assert_eq!(compile("*.jsp").kind(), &PatternKind::Extension("jsp".into()));
    }

    #[test]
    fn test_compile_default() {
        assert_eq!(compile("/").kind(), &PatternKind::Default);
    }

    #[test]
    fn test_compile_empty_returns_empty_error() {
        assert_eq!(UrlPattern::compile(""), Err(PatternError::Empty));
    }

    #[test]
    fn test_compile_rejects_malformed_patterns() {
        for bad in ["login.jsp", "/a/*/b", "/a*", "*.", "*.a/b", "**"] {
            assert!(
                matches!(UrlPattern::compile(bad), Err(PatternError::Invalid { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    // =====================================================================
    // matches()
    // =====================================================================

    #[test]
    fn test_matches_exact_only_same_path() {
        let pattern = compile("/login.jsp");
        assert!(pattern.matches("/login.jsp"));
        assert!(!pattern.matches("/login.jsp/x"));
        assert!(!pattern.matches("/LOGIN.jsp"));
    }

    #[test]
    fn test_matches_path_prefix_respects_segments() {
        let pattern = compile("/admin/*");
        assert!(pattern.matches("/admin"));
        assert!(pattern.matches("/admin/"));
        assert!(pattern.matches("/admin/users/1"));
        assert!(!pattern.matches("/administrator"));
        assert!(!pattern.matches("/public/admin"));
    }

    #[test]
    fn test_matches_extension_checks_last_segment() {
        let pattern = compile("*.jsp");
        assert!(pattern.matches("/login.jsp"));
        assert!(pattern.matches("/a/b/c.jsp"));
        assert!(!pattern.matches("/a.jsp/b"));
        assert!(!pattern.matches("/ajsp"));
    }

    #[test]
    fn test_matches_default_and_root_wildcard_match_everything() {
        assert!(compile("/").matches("/anything/at/all"));
        assert!(compile("/*").matches("/anything/at/all"));
    }

    // =====================================================================
    // serde / display
    // =====================================================================

    #[test]
    fn test_serde_uses_source_string() {
        let pattern: UrlPattern = serde_json::from_str(r#""/admin/*""#).unwrap();
        assert_eq!(pattern.kind(), &PatternKind::PathPrefix("/admin".into()));
        assert_eq!(serde_json::to_string(&pattern).unwrap(), r#""/admin/*""#);
    }

    #[test]
    fn test_serde_rejects_invalid_pattern() {
        let result: Result<UrlPattern, _> = serde_json::from_str(r#""admin""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_shows_source() {
        assert_eq!(compile("*.jsp").to_string(), "*.jsp");
    }
}

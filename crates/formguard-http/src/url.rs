//! URL helpers.

/// Returns `uri` without its query string.
///
/// Everything from the first `?` onwards is dropped. A URI without a `?`
/// is returned unchanged.
///
/// ```rust
/// use formguard_http::strip_query_string;
///
/// assert_eq!(strip_query_string("/login.jsp?lang=en"), "/login.jsp");
/// assert_eq!(strip_query_string("/login.jsp"), "/login.jsp");
/// ```
pub fn strip_query_string(uri: &str) -> &str {
    // `split_once` gives us the part before the first separator, and
    // `None` when there is no separator at all.
    match uri.split_once('?') {
        Some((path, _query)) => path,
        None => uri,
    }
}

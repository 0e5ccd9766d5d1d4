//! The per-request view the login protocol works on.

use std::collections::HashMap;

use crate::Session;

/// One incoming HTTP request, as seen by the security layer.
///
/// The outer filter builds this from whatever HTTP framework it runs in,
/// passes it through the login protocol, and then reads back what changed:
/// the principal, the session, and any sessions that were invalidated.
///
/// `P` is the principal type produced by the realm. The request doesn't
/// care what it is; it just stores it.
///
/// # Example
///
/// ```rust
/// use formguard_http::SecurityRequest;
///
/// let request: SecurityRequest<String> =
///     SecurityRequest::new("POST", "/shop/j_security_check?x=1")
///         .with_context_path("/shop")
///         .with_parameter("j_username", "alice");
///
/// assert_eq!(request.matchable_path(), "/j_security_check");
/// assert_eq!(request.query_string(), Some("x=1"));
/// assert_eq!(request.parameter("j_username"), Some("alice"));
/// ```
#[derive(Debug, Clone)]
pub struct SecurityRequest<P> {
    method: String,
    context_path: String,
    request_uri: String,
    query_string: Option<String>,
    parameters: HashMap<String, String>,
    cookies: HashMap<String, String>,
    /// Header names are stored lowercased.
    headers: HashMap<String, String>,
    principal: Option<P>,
    session: Option<Session>,
    invalidated_sessions: Vec<String>,
}

impl<P> SecurityRequest<P> {
    /// Creates a request for `method` and `uri`.
    ///
    /// `uri` is the path as received, including the context path. If it
    /// carries a query string, the query is split off and kept separately.
    pub fn new(method: impl Into<String>, uri: &str) -> Self {
        let (request_uri, query_string) = match uri.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (uri.to_string(), None),
        };

        Self {
            method: method.into(),
            context_path: String::new(),
            request_uri,
            query_string,
            parameters: HashMap::new(),
            cookies: HashMap::new(),
            headers: HashMap::new(),
            principal: None,
            session: None,
            invalidated_sessions: Vec::new(),
        }
    }

    /// Sets the context path the application is mounted under (e.g. `/shop`).
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// Adds a form (or query) parameter.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Adds a cookie sent by the client.
    pub fn with_cookie(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Adds a request header. Lookups are case-insensitive.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the principal the request is already authenticated as.
    pub fn with_principal(mut self, principal: P) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Attaches the session the outer filter loaded for this request.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    // -- Request line -----------------------------------------------------

    /// Returns the HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the context path (empty for an application mounted at `/`).
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    /// Returns the request path including the context path, without query.
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// Returns the raw query string, if the request had one.
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    /// Returns the request path with its query string re-attached.
    ///
    /// This is the URL a user should be sent back to after logging in.
    pub fn request_url_with_query(&self) -> String {
        match &self.query_string {
            Some(query) => format!("{}?{}", self.request_uri, query),
            None => self.request_uri.clone(),
        }
    }

    /// Returns the path used for pattern matching.
    ///
    /// This is the request path relative to the context path, with no query
    /// string. A request for the context root itself matches as `/`. The
    /// context path is only stripped on a segment boundary, so `/application`
    /// is not treated as being under `/app`.
    pub fn matchable_path(&self) -> &str {
        let path = match self.request_uri.strip_prefix(self.context_path.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => &self.request_uri,
        };
        if path.is_empty() { "/" } else { path }
    }

    // -- Parameters, cookies, headers -------------------------------------

    /// Looks up a form parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Returns all form parameters.
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    /// Looks up a cookie by name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Looks up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    // -- Principal ---------------------------------------------------------

    /// Returns the principal the request is authenticated as, if any.
    pub fn principal(&self) -> Option<&P> {
        self.principal.as_ref()
    }

    /// Marks the request as authenticated as `principal`.
    pub fn set_principal(&mut self, principal: P) {
        self.principal = Some(principal);
    }

    // -- Session -----------------------------------------------------------

    /// Returns the session, without creating one.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns the session, creating a new one if the request has none.
    pub fn session_mut(&mut self) -> &mut Session {
        self.session.get_or_insert_with(Session::new)
    }

    /// Invalidates the current session, if there is one.
    ///
    /// The session is detached from the request and its id is recorded in
    /// [`invalidated_sessions`](Self::invalidated_sessions) so the outer
    /// filter can destroy it in its store. The next call to
    /// [`session_mut`](Self::session_mut) starts a fresh session.
    ///
    /// Returns the id of the invalidated session.
    pub fn invalidate_session(&mut self) -> Option<String> {
        let session = self.session.take()?;
        let id = session.id().to_string();
        self.invalidated_sessions.push(id.clone());
        Some(id)
    }

    /// Returns the ids of the sessions invalidated during this request.
    pub fn invalidated_sessions(&self) -> &[String] {
        &self.invalidated_sessions
    }
}

//! Response-side commands produced while processing a request.
//!
//! formguard never writes to the socket. It records what the outer filter
//! should do to the response (set or clear cookies) and knows how to
//! encode a redirect URL; the filter applies all of it.

use std::time::Duration;

/// The path parameter used when session ids are rewritten into URLs.
pub const SESSION_ID_PATH_PARAM: &str = "jsessionid";

// ---------------------------------------------------------------------------
// Cookie
// ---------------------------------------------------------------------------

/// A cookie to be sent to the client.
///
/// How it is rendered into a `Set-Cookie` header is up to the outer filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Path the cookie is scoped to.
    pub path: String,
    /// Lifetime. `None` means a browser-session cookie.
    pub max_age: Option<Duration>,
    /// Whether scripts are denied access to the cookie.
    pub http_only: bool,
}

impl Cookie {
    /// Creates an `HttpOnly` session cookie scoped to `/`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: "/".to_string(),
            max_age: None,
            http_only: true,
        }
    }

    /// Sets the cookie path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the cookie lifetime.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }
}

/// A change to the client's cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieCommand {
    /// Set (or overwrite) a cookie.
    Set(Cookie),

    /// Expire a cookie on the client.
    Remove {
        /// Cookie name.
        name: String,
        /// Path the cookie was scoped to.
        path: String,
    },
}

// ---------------------------------------------------------------------------
// SecurityResponse
// ---------------------------------------------------------------------------

/// The response-side view handed to the login protocol.
#[derive(Debug, Clone, Default)]
pub struct SecurityResponse {
    cookies: Vec<CookieCommand>,
    url_session_id: Option<String>,
}

impl SecurityResponse {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables session-id URL rewriting for clients without cookies.
    ///
    /// When set, [`encode_redirect_url`](Self::encode_redirect_url) appends
    /// `;jsessionid=<id>` to the path of every redirect target.
    pub fn with_url_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.url_session_id = Some(session_id.into());
        self
    }

    /// Queues a cookie to be set.
    pub fn set_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(CookieCommand::Set(cookie));
    }

    /// Queues a cookie to be removed.
    pub fn remove_cookie(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.cookies.push(CookieCommand::Remove {
            name: name.into(),
            path: path.into(),
        });
    }

    /// Returns the cookie commands in the order they were issued.
    pub fn cookie_commands(&self) -> &[CookieCommand] {
        &self.cookies
    }

    /// Encodes a URL for use in a redirect.
    ///
    /// Without session-id rewriting the URL is returned as is. With it, the
    /// session id is inserted as a path parameter in front of the query
    /// string or fragment, unless the URL already carries one.
    pub fn encode_redirect_url(&self, url: &str) -> String {
        let Some(session_id) = &self.url_session_id else {
            return url.to_string();
        };

        let marker = format!(";{SESSION_ID_PATH_PARAM}=");
        if url.contains(&marker) {
            return url.to_string();
        }

        let split_at = url.find(['?', '#']).unwrap_or(url.len());
        let (path, rest) = url.split_at(split_at);
        format!("{path}{marker}{session_id}{rest}")
    }
}

//! The outcome of login processing.

/// What the outer filter should do after the login protocol ran.
///
/// `Redirect` and `Forward` both mean "stop": the response is decided and
/// no further filter stages should run for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum LoginDecision {
    /// Nothing for the login protocol to do; carry on with the normal
    /// security checks.
    Continue,

    /// Send a client-side redirect to this (already encoded) URL.
    Redirect(String),

    /// Forward the request server-side to this page.
    Forward(String),
}

impl LoginDecision {
    /// Returns `true` if the filter must stop processing the request.
    pub fn is_stop(&self) -> bool {
        !matches!(self, Self::Continue)
    }

    /// Returns the redirect target, if this is a redirect.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect(url) => Some(url),
            _ => None,
        }
    }

    /// Returns the forward target, if this is a forward.
    pub fn forward_path(&self) -> Option<&str> {
        match self {
            Self::Forward(path) => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stop() {
        assert!(!LoginDecision::Continue.is_stop());
        assert!(LoginDecision::Redirect("/home".into()).is_stop());
        assert!(LoginDecision::Forward("/error.jsp".into()).is_stop());
    }

    #[test]
    fn test_accessors() {
        let redirect = LoginDecision::Redirect("/home".into());
        assert_eq!(redirect.redirect_url(), Some("/home"));
        assert_eq!(redirect.forward_path(), None);

        let forward = LoginDecision::Forward("/error.jsp".into());
        assert_eq!(forward.forward_path(), Some("/error.jsp"));
        assert_eq!(forward.redirect_url(), None);
    }
}

//! # Formguard
//!
//! FORM-based login, logout and login-page bypass for HTTP security filters.
//!
//! An outer filter owns the HTTP I/O. For each request it asks a
//! [`FormAuthenticator`] what to do:
//!
//! - [`process_login`](FormAuthenticator::process_login) restores a
//!   remembered login and handles login-form submissions
//! - [`process_logout`](FormAuthenticator::process_logout) forgets the
//!   remembered login when the logout page is hit
//! - [`bypass_security_for_this_request`](FormAuthenticator::bypass_security_for_this_request)
//!   keeps the login, error and logout pages reachable
//! - [`show_login`](FormAuthenticator::show_login) saves a challenged
//!   request and redirects to the login page
//!
//! Credentials are checked by a [`Realm`](formguard_realm::Realm).
//! "Remember me" is handled by an optional
//! [`PersistentLoginManager`](formguard_persistent::PersistentLoginManager).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formguard::prelude::*;
//!
//! # async fn run() -> Result<(), FormguardError> {
//! let realm = MemoryRealm::default().with_user("alice", "wonderland", ["user"]);
//! let settings = FormLoginSettings::new("/login.jsp", "/login.jsp?failed=1");
//! let authenticator = FormAuthenticator::from_settings(&settings, realm)?;
//!
//! let mut request = SecurityRequest::new("POST", "/j_security_check")
//!     .with_parameter(FORM_USERNAME, "alice")
//!     .with_parameter(FORM_PASSWORD, "wonderland");
//! let mut response = SecurityResponse::new();
//!
//! let decision = authenticator.process_login(&mut request, &mut response).await?;
//! assert_eq!(decision, LoginDecision::Redirect("/".into()));
//! # Ok(())
//! # }
//! ```

mod authenticator;
mod config;
mod decision;
mod error;
mod saved;

pub use authenticator::{
    AUTH_METHOD_FORM, FORM_PASSWORD, FORM_REMEMBER_ME, FORM_USERNAME, FormAuthenticator,
};
pub use config::{AuthenticatorConfig, DEFAULT_LOGIN_SUBMIT_PATH, DEFAULT_PAGE, FormLoginSettings};
pub use decision::LoginDecision;
pub use error::{ConfigError, FormguardError};
pub use saved::{SAVED_REQUEST_ATTRIBUTE, SavedRequestStore, SessionRequestStore};

pub use formguard_http as http;
pub use formguard_pattern as pattern;
pub use formguard_persistent as persistent;
pub use formguard_realm as realm;

/// Everything an outer filter usually needs, in one import.
pub mod prelude {
    pub use crate::{
        AuthenticatorConfig, FORM_PASSWORD, FORM_REMEMBER_ME, FORM_USERNAME, FormAuthenticator,
        FormLoginSettings, FormguardError, LoginDecision, SavedRequestStore, SessionRequestStore,
    };
    pub use formguard_http::{CookieCommand, SecurityRequest, SecurityResponse, Session};
    pub use formguard_pattern::{PatternMatcher, ServletPatternMatcher, UrlPattern};
    pub use formguard_persistent::{
        MemoryPersistentLoginManager, PersistentLoginConfig, PersistentLoginManager,
    };
    pub use formguard_realm::{MemoryRealm, Realm, RealmKind, UserPrincipal};
}

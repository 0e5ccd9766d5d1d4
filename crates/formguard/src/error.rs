//! Error types for the formguard meta-crate.

use formguard_http::HttpError;
use formguard_pattern::PatternError;
use formguard_persistent::PersistentLoginError;
use formguard_realm::RealmError;

/// Errors found while resolving the authenticator configuration.
///
/// All of these are startup errors: the authenticator can't be built
/// until the configuration is fixed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required page is empty.
    #[error("{0} must not be empty")]
    MissingPage(&'static str),

    /// A page doesn't start with `/`. Pages are context-relative paths.
    #[error("{name} must start with '/': {page:?}")]
    RelativePage {
        /// Which setting is wrong.
        name: &'static str,
        /// The configured value.
        page: String,
    },

    /// The page couldn't be compiled into a URL pattern.
    #[error("{name} is not a valid url pattern")]
    InvalidPattern {
        /// Which setting is wrong.
        name: &'static str,
        /// Why compilation failed.
        #[source]
        source: PatternError,
    },

    /// The login-submit path is empty, which would make every request a
    /// login submission.
    #[error("login submit path must not be empty")]
    EmptySubmitPath,
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum FormguardError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The realm couldn't answer (backend down, unsupported call, ...).
    #[error(transparent)]
    Realm(#[from] RealmError),

    /// The persistent-login store failed.
    #[error(transparent)]
    PersistentLogin(#[from] PersistentLoginError),

    /// Request-scoped state (the saved request) couldn't be read or written.
    #[error(transparent)]
    Http(#[from] HttpError),
}

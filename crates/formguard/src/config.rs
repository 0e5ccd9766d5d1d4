//! Authenticator settings and their resolved form.

use formguard_http::strip_query_string;
use formguard_pattern::UrlPattern;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The path a login form posts to, unless configured otherwise.
pub const DEFAULT_LOGIN_SUBMIT_PATH: &str = "/j_security_check";

/// The page users land on after a login nobody asked them for.
pub const DEFAULT_PAGE: &str = "/";

// ---------------------------------------------------------------------------
// FormLoginSettings
// ---------------------------------------------------------------------------

/// The raw settings, as they come from a config file.
///
/// All pages are context-relative paths (starting with `/`) and may carry
/// a query string. Only `login_page` and `error_page` are required.
///
/// ```rust
/// use formguard::FormLoginSettings;
///
/// let settings = FormLoginSettings::new("/login.jsp", "/login.jsp?failed=1")
///     .with_logout_page("/logout")
///     .with_default_page("/home");
/// assert_eq!(settings.login_submit_path, "/j_security_check");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormLoginSettings {
    /// Requests whose path ends with this are login submissions.
    #[serde(default = "default_login_submit_path")]
    pub login_submit_path: String,

    /// The page with the login form.
    pub login_page: String,

    /// The page shown when a login fails.
    pub error_page: String,

    /// The logout page. Logout handling is off when this is `None`.
    #[serde(default)]
    pub logout_page: Option<String>,

    /// Where to send users after a login that didn't interrupt anything.
    #[serde(default = "default_page")]
    pub default_page: String,
}

fn default_login_submit_path() -> String {
    DEFAULT_LOGIN_SUBMIT_PATH.to_string()
}

fn default_page() -> String {
    DEFAULT_PAGE.to_string()
}

impl FormLoginSettings {
    /// Creates settings with the required pages and defaults for the rest.
    pub fn new(login_page: impl Into<String>, error_page: impl Into<String>) -> Self {
        Self {
            login_submit_path: default_login_submit_path(),
            login_page: login_page.into(),
            error_page: error_page.into(),
            logout_page: None,
            default_page: default_page(),
        }
    }

    /// Overrides the login-submit path.
    pub fn with_login_submit_path(mut self, path: impl Into<String>) -> Self {
        self.login_submit_path = path.into();
        self
    }

    /// Enables logout handling for `page`.
    pub fn with_logout_page(mut self, page: impl Into<String>) -> Self {
        self.logout_page = Some(page.into());
        self
    }

    /// Sets the default landing page.
    pub fn with_default_page(mut self, page: impl Into<String>) -> Self {
        self.default_page = page.into();
        self
    }
}

// ---------------------------------------------------------------------------
// AuthenticatorConfig
// ---------------------------------------------------------------------------

/// Settings resolved once at startup.
///
/// Resolving validates every page and compiles the login, error and logout
/// pages into URL patterns (from the path without its query string). The
/// page strings themselves are kept as configured, query string included,
/// because they are what redirects and forwards go to.
///
/// Immutable after construction; share it by reference.
#[derive(Debug, Clone)]
pub struct AuthenticatorConfig {
    login_submit_path: String,
    login_page: String,
    login_page_pattern: UrlPattern,
    error_page: String,
    error_page_pattern: UrlPattern,
    logout_page: Option<String>,
    logout_page_pattern: Option<UrlPattern>,
    default_page: String,
}

impl AuthenticatorConfig {
    /// Validates `settings` and compiles the page patterns.
    ///
    /// # Errors
    /// - [`ConfigError::EmptySubmitPath`] if the submit path is empty
    /// - [`ConfigError::MissingPage`] if a configured page is empty
    /// - [`ConfigError::RelativePage`] if a page doesn't start with `/`
    /// - [`ConfigError::InvalidPattern`] if a page can't be compiled
    pub fn resolve(settings: &FormLoginSettings) -> Result<Self, ConfigError> {
        if settings.login_submit_path.is_empty() {
            return Err(ConfigError::EmptySubmitPath);
        }

        let login_page_pattern = page_pattern("login page", &settings.login_page)?;
        let error_page_pattern = page_pattern("error page", &settings.error_page)?;
        let logout_page_pattern = settings
            .logout_page
            .as_deref()
            .map(|page| page_pattern("logout page", page))
            .transpose()?;
        check_page("default page", &settings.default_page)?;

        Ok(Self {
            login_submit_path: settings.login_submit_path.clone(),
            login_page: settings.login_page.clone(),
            login_page_pattern,
            error_page: settings.error_page.clone(),
            error_page_pattern,
            logout_page: settings.logout_page.clone(),
            logout_page_pattern,
            default_page: settings.default_page.clone(),
        })
    }

    /// Returns the login-submit path.
    pub fn login_submit_path(&self) -> &str {
        &self.login_submit_path
    }

    /// Returns the login page, as configured.
    pub fn login_page(&self) -> &str {
        &self.login_page
    }

    /// Returns the compiled login page pattern.
    pub fn login_page_pattern(&self) -> &UrlPattern {
        &self.login_page_pattern
    }

    /// Returns the error page, as configured.
    pub fn error_page(&self) -> &str {
        &self.error_page
    }

    /// Returns the compiled error page pattern.
    pub fn error_page_pattern(&self) -> &UrlPattern {
        &self.error_page_pattern
    }

    /// Returns the logout page, if logout handling is on.
    pub fn logout_page(&self) -> Option<&str> {
        self.logout_page.as_deref()
    }

    /// Returns the compiled logout page pattern, if logout handling is on.
    pub fn logout_page_pattern(&self) -> Option<&UrlPattern> {
        self.logout_page_pattern.as_ref()
    }

    /// Returns the default landing page.
    pub fn default_page(&self) -> &str {
        &self.default_page
    }
}

fn check_page(name: &'static str, page: &str) -> Result<(), ConfigError> {
    if page.is_empty() {
        return Err(ConfigError::MissingPage(name));
    }
    if !page.starts_with('/') {
        return Err(ConfigError::RelativePage {
            name,
            page: page.to_string(),
        });
    }
    Ok(())
}

fn page_pattern(name: &'static str, page: &str) -> Result<UrlPattern, ConfigError> {
    check_page(name, page)?;
    UrlPattern::compile(strip_query_string(page))
        .map_err(|source| ConfigError::InvalidPattern { name, source })
}

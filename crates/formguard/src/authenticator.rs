//! The FORM login protocol.
//!
//! [`FormAuthenticator`] is what the outer security filter calls for each
//! request. It ties the layers together: saved requests → realm →
//! persistent logins → session.

use formguard_http::{SecurityRequest, SecurityResponse};
use formguard_pattern::PatternMatcher;
use formguard_persistent::{DisabledPersistentLogin, PersistentLoginManager};
use formguard_realm::{Realm, RealmKind};
use tracing::{debug, info, warn};

use crate::{
    AuthenticatorConfig, FormLoginSettings, FormguardError, LoginDecision, SavedRequestStore,
    SessionRequestStore,
};

/// The authentication method name this authenticator reports.
pub const AUTH_METHOD_FORM: &str = "FORM";

/// Form field carrying the username.
pub const FORM_USERNAME: &str = "j_username";

/// Form field carrying the password.
pub const FORM_PASSWORD: &str = "j_password";

/// Form field asking to remember the login. Its presence is what counts,
/// not its value.
pub const FORM_REMEMBER_ME: &str = "j_rememberme";

/// Drives FORM-based login, logout and login-page bypass.
///
/// Generic over:
/// - `R`: the realm that verifies credentials
/// - `M`: the persistent-login manager, if one is configured
/// - `S`: where challenged requests are saved
///
/// The authenticator holds no per-request state. One instance serves all
/// requests concurrently; share it behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// let authenticator = FormAuthenticator::from_settings(&settings, realm)?
///     .with_persistent_login(manager);
///
/// match authenticator.process_login(&mut request, &mut response).await? {
///     LoginDecision::Continue => { /* normal security checks */ }
///     LoginDecision::Redirect(url) => { /* 302 to url */ }
///     LoginDecision::Forward(page) => { /* render page */ }
/// }
/// ```
pub struct FormAuthenticator<R, M = DisabledPersistentLogin, S = SessionRequestStore> {
    config: AuthenticatorConfig,
    realm: R,
    persistent_login: Option<M>,
    saved_requests: S,
}

impl<R: Realm> FormAuthenticator<R> {
    /// Creates an authenticator without persistent logins that saves
    /// challenged requests in the session.
    pub fn new(config: AuthenticatorConfig, realm: R) -> Self {
        Self {
            config,
            realm,
            persistent_login: None,
            saved_requests: SessionRequestStore,
        }
    }

    /// Resolves `settings` and creates an authenticator from them.
    ///
    /// # Errors
    /// Returns [`FormguardError::Config`] if the settings don't resolve.
    pub fn from_settings(settings: &FormLoginSettings, realm: R) -> Result<Self, FormguardError> {
        let config = AuthenticatorConfig::resolve(settings)?;
        Ok(Self::new(config, realm))
    }
}

impl<R, M, S> FormAuthenticator<R, M, S> {
    /// Turns persistent logins on, using `manager`.
    pub fn with_persistent_login<M2: PersistentLoginManager>(
        self,
        manager: M2,
    ) -> FormAuthenticator<R, M2, S> {
        FormAuthenticator {
            config: self.config,
            realm: self.realm,
            persistent_login: Some(manager),
            saved_requests: self.saved_requests,
        }
    }

    /// Replaces where challenged requests are saved.
    pub fn with_saved_request_store<S2: SavedRequestStore>(
        self,
        store: S2,
    ) -> FormAuthenticator<R, M, S2> {
        FormAuthenticator {
            config: self.config,
            realm: self.realm,
            persistent_login: self.persistent_login,
            saved_requests: store,
        }
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &AuthenticatorConfig {
        &self.config
    }

    /// Returns the realm.
    pub fn realm(&self) -> &R {
        &self.realm
    }

    /// Returns the persistent-login manager, if persistent logins are on.
    pub fn persistent_login(&self) -> Option<&M> {
        self.persistent_login.as_ref()
    }

    /// Returns the saved-request store.
    pub fn saved_requests(&self) -> &S {
        &self.saved_requests
    }

    /// Returns the authentication method name, always `"FORM"`.
    pub fn auth_method(&self) -> &'static str {
        AUTH_METHOD_FORM
    }
}

impl<R, M, S> FormAuthenticator<R, M, S>
where
    R: Realm,
    M: PersistentLoginManager,
    S: SavedRequestStore,
{
    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    /// Runs the login protocol for one request.
    ///
    /// First restores a remembered login if the request has no principal.
    /// Then, if the request is a login submission, authenticates it:
    ///
    /// - on failure, returns [`LoginDecision::Forward`] to the error page
    /// - on success, sets the principal and returns
    ///   [`LoginDecision::Redirect`] to the saved request's URL, or to the
    ///   default page when nothing was saved
    ///
    /// Any other request gets [`LoginDecision::Continue`].
    ///
    /// # Errors
    /// Returns an error if the realm, the persistent-login manager or the
    /// saved-request store fails. A wrong password is not an error.
    pub async fn process_login(
        &self,
        request: &mut SecurityRequest<R::Principal>,
        response: &mut SecurityResponse,
    ) -> Result<LoginDecision, FormguardError> {
        self.restore_remembered_login(request, response).await?;

        if !self.is_login_submission(request) {
            return Ok(LoginDecision::Continue);
        }
        self.submit_login(request, response).await
    }

    /// Returns `true` if `request` posts the login form.
    pub fn is_login_submission<P>(&self, request: &SecurityRequest<P>) -> bool {
        request
            .matchable_path()
            .ends_with(self.config.login_submit_path())
    }

    async fn restore_remembered_login(
        &self,
        request: &mut SecurityRequest<R::Principal>,
        response: &mut SecurityResponse,
    ) -> Result<(), FormguardError> {
        if request.principal().is_some() {
            return Ok(());
        }
        let Some(manager) = &self.persistent_login else {
            return Ok(());
        };
        if !manager.remembering_login(request).await? {
            return Ok(());
        }

        let username = manager.remembered_username(request, response).await?;
        let password = manager.remembered_password(request, response).await?;
        let principal = match (username.as_deref(), password.as_deref()) {
            (Some(username), Some(password)) => {
                self.realm.authenticate(username, password).await?
            }
            _ => None,
        };

        match principal {
            Some(principal) => {
                info!(?principal, "remembered login restored");
                request.set_principal(principal);
            }
            None => {
                warn!(
                    username = username.as_deref().unwrap_or_default(),
                    "remembered login no longer valid, forgetting it"
                );
                manager.forget_login(request, response).await?;
            }
        }
        Ok(())
    }

    async fn submit_login(
        &self,
        request: &mut SecurityRequest<R::Principal>,
        response: &mut SecurityResponse,
    ) -> Result<LoginDecision, FormguardError> {
        let username = request.parameter(FORM_USERNAME).map(str::to_owned);
        let password = request.parameter(FORM_PASSWORD).map(str::to_owned);

        let principal = match self.realm.kind() {
            RealmKind::Flexible => self.realm.authenticate_request(request).await?,
            RealmKind::Basic => match (username.as_deref(), password.as_deref()) {
                (Some(username), Some(password)) => {
                    self.realm.authenticate(username, password).await?
                }
                _ => {
                    debug!("login submission without username or password");
                    None
                }
            },
        };

        let Some(principal) = principal else {
            warn!(
                username = username.as_deref().unwrap_or_default(),
                "login failed"
            );
            return Ok(LoginDecision::Forward(self.config.error_page().to_string()));
        };

        // Read before the session can be invalidated below.
        let continue_to = self.continue_to_url(request)?;

        if request
            .principal()
            .is_some_and(|current| *current != principal)
        {
            if let Some(session_id) = request.invalidate_session() {
                info!(%session_id, "session of previous principal invalidated");
            }
        }

        if let (Some(manager), Some(username), Some(password)) = (
            &self.persistent_login,
            username.as_deref(),
            password.as_deref(),
        ) {
            if request.parameter(FORM_REMEMBER_ME).is_some() {
                manager
                    .remember_login(request, response, username, password)
                    .await?;
            } else {
                manager.forget_login(request, response).await?;
            }
        }

        info!(?principal, continue_to = %continue_to, "login succeeded");
        request.set_principal(principal);
        Ok(LoginDecision::Redirect(
            response.encode_redirect_url(&continue_to),
        ))
    }

    fn continue_to_url(
        &self,
        request: &SecurityRequest<R::Principal>,
    ) -> Result<String, FormguardError> {
        let saved = self.saved_requests.continue_to_url(request)?;
        Ok(saved.unwrap_or_else(|| {
            format!("{}{}", request.context_path(), self.config.default_page())
        }))
    }

    // -----------------------------------------------------------------------
    // Challenge
    // -----------------------------------------------------------------------

    /// Saves `request` and redirects to the login page.
    ///
    /// Called by the outer filter when an anonymous request hits a protected
    /// resource.
    ///
    /// # Errors
    /// Returns [`FormguardError::Http`] if the request can't be saved.
    pub fn show_login(
        &self,
        request: &mut SecurityRequest<R::Principal>,
        response: &SecurityResponse,
    ) -> Result<LoginDecision, FormguardError> {
        self.saved_requests.save(request)?;

        let login_url = format!("{}{}", request.context_path(), self.config.login_page());
        debug!(
            url = %request.request_url_with_query(),
            login_url = %login_url,
            "challenging for login"
        );
        Ok(LoginDecision::Redirect(
            response.encode_redirect_url(&login_url),
        ))
    }

    // -----------------------------------------------------------------------
    // Logout
    // -----------------------------------------------------------------------

    /// Handles a request to the logout page.
    ///
    /// Returns `false` when no logout page is configured or the request is
    /// for some other page. Otherwise forgets the remembered login, if there
    /// is one, and returns `true`. Tearing down the session and showing the
    /// logout page is left to the outer filter.
    ///
    /// # Errors
    /// Returns [`FormguardError::PersistentLogin`] if the persistent-login
    /// manager fails.
    pub async fn process_logout<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        response: &mut SecurityResponse,
        matcher: &dyn PatternMatcher,
    ) -> Result<bool, FormguardError> {
        if !self.matches_logout_page(request.matchable_path(), matcher) {
            return Ok(false);
        }

        if let Some(manager) = &self.persistent_login {
            if manager.remembering_login(request).await? {
                manager.forget_login(request, response).await?;
            }
        }
        info!(path = request.matchable_path(), "logout requested");
        Ok(true)
    }

    fn matches_logout_page(&self, path: &str, matcher: &dyn PatternMatcher) -> bool {
        self.config
            .logout_page_pattern()
            .is_some_and(|pattern| matcher.matches(path, pattern))
    }

    // -----------------------------------------------------------------------
    // Bypass
    // -----------------------------------------------------------------------

    /// Returns `true` if `request` is for the login, error or logout page.
    ///
    /// Those pages stay reachable whatever the access policy says, otherwise
    /// an anonymous user could never see the login form.
    pub fn bypass_security_for_this_request<P>(
        &self,
        request: &SecurityRequest<P>,
        matcher: &dyn PatternMatcher,
    ) -> bool {
        let path = request.matchable_path();
        matcher.matches(path, self.config.login_page_pattern())
            || matcher.matches(path, self.config.error_page_pattern())
            || self.matches_logout_page(path, matcher)
    }
}

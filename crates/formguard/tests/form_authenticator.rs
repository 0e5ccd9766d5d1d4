//! Integration tests for the FORM login protocol.
//!
//! The realm and persistent-login manager are recording mocks, so each test
//! can check exactly which collaborator calls a request caused.

use std::sync::Mutex;

use formguard::prelude::*;
use formguard::realm::RealmError;
use formguard::persistent::PersistentLoginError;
use formguard::SAVED_REQUEST_ATTRIBUTE;

type Request = SecurityRequest<String>;

// =========================================================================
// Recording realm
// =========================================================================

/// Accepts `alice`/`wonderland` and `bob`/`builder`. In flexible mode it
/// accepts any request carrying an `x-client-cert` header instead.
#[derive(Default)]
struct RecordingRealm {
    kind: RealmKind,
    unavailable: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingRealm {
    fn flexible() -> Self {
        Self {
            kind: RealmKind::Flexible,
            ..Self::default()
        }
    }

    fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Realm for RecordingRealm {
    type Principal = String;

    fn kind(&self) -> RealmKind {
        self.kind
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, RealmError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("authenticate:{username}"));
        if self.unavailable {
            return Err(RealmError::Unavailable("directory offline".into()));
        }
        let accepted = matches!((username, password), ("alice", "wonderland") | ("bob", "builder"));
        Ok(accepted.then(|| username.to_string()))
    }

    async fn authenticate_request(
        &self,
        request: &SecurityRequest<String>,
    ) -> Result<Option<String>, RealmError> {
        self.calls
            .lock()
            .unwrap()
            .push("authenticate_request".to_string());
        Ok(request.header("x-client-cert").map(str::to_owned))
    }
}

// =========================================================================
// Recording persistent-login manager
// =========================================================================

/// Reports a remembered login when `remembered` is set and records every
/// call it receives.
#[derive(Default)]
struct RecordingManager {
    remembered: Option<(Option<String>, Option<String>)>,
    calls: Mutex<Vec<String>>,
}

impl RecordingManager {
    fn remembering(username: Option<&str>, password: Option<&str>) -> Self {
        Self {
            remembered: Some((username.map(str::to_owned), password.map(str::to_owned))),
            ..Self::default()
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }
}

impl PersistentLoginManager for RecordingManager {
    async fn remembering_login<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
    ) -> Result<bool, PersistentLoginError> {
        self.record("remembering_login");
        Ok(self.remembered.is_some())
    }

    async fn remembered_username<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<Option<String>, PersistentLoginError> {
        self.record("remembered_username");
        Ok(self.remembered.as_ref().and_then(|(u, _)| u.clone()))
    }

    async fn remembered_password<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<Option<String>, PersistentLoginError> {
        self.record("remembered_password");
        Ok(self.remembered.as_ref().and_then(|(_, p)| p.clone()))
    }

    async fn remember_login<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
        username: &str,
        password: &str,
    ) -> Result<(), PersistentLoginError> {
        self.record(format!("remember_login:{username}:{password}"));
        Ok(())
    }

    async fn forget_login<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<(), PersistentLoginError> {
        self.record("forget_login");
        Ok(())
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn settings() -> FormLoginSettings {
    FormLoginSettings::new("/login.jsp", "/error.jsp?failed=1")
        .with_logout_page("/logout.jsp")
        .with_default_page("/home")
}

fn authenticator(realm: RecordingRealm) -> FormAuthenticator<RecordingRealm> {
    FormAuthenticator::from_settings(&settings(), realm).unwrap()
}

fn remembering_authenticator(
    realm: RecordingRealm,
    manager: RecordingManager,
) -> FormAuthenticator<RecordingRealm, RecordingManager> {
    authenticator(realm).with_persistent_login(manager)
}

fn fresh_remembering_authenticator() -> FormAuthenticator<RecordingRealm, RecordingManager> {
    remembering_authenticator(RecordingRealm::default(), RecordingManager::default())
}

fn submission(username: &str, password: &str) -> Request {
    Request::new("POST", "/app/j_security_check")
        .with_context_path("/app")
        .with_parameter("j_username", username)
        .with_parameter("j_password", password)
}

fn manager_calls(
    authenticator: &FormAuthenticator<RecordingRealm, RecordingManager>,
) -> Vec<String> {
    authenticator
        .persistent_login()
        .map(RecordingManager::calls)
        .unwrap_or_default()
}

// =========================================================================
// process_login(): ordinary requests
// =========================================================================

#[tokio::test]
async fn test_process_login_ordinary_request_continues_without_side_effects() {
    let authenticator = fresh_remembering_authenticator();
    let mut request = Request::new("GET", "/app/orders").with_context_path("/app");
    let mut response = SecurityResponse::new();

    let decision = authenticator
        .process_login(&mut request, &mut response)
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Continue);
    assert!(request.principal().is_none());
    assert!(request.session().is_none());
    assert!(response.cookie_commands().is_empty());
    assert!(authenticator.realm().calls().is_empty());
    assert_eq!(manager_calls(&authenticator), ["remembering_login"]);
}

#[tokio::test]
async fn test_process_login_submit_path_must_be_suffix() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = Request::new("POST", "/app/j_security_check/extra")
        .with_context_path("/app")
        .with_parameter("j_username", "alice")
        .with_parameter("j_password", "wonderland");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Continue);
    assert!(authenticator.realm().calls().is_empty());
}

#[tokio::test]
async fn test_process_login_nested_submit_path_is_submission() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = Request::new("POST", "/app/secure/j_security_check")
        .with_context_path("/app")
        .with_parameter("j_username", "alice")
        .with_parameter("j_password", "wonderland");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert!(decision.is_stop());
    assert_eq!(request.principal().map(String::as_str), Some("alice"));
}

#[tokio::test]
async fn test_process_login_custom_submit_path_is_submission() {
    let settings = settings().with_login_submit_path("/do_login");
    let authenticator =
        FormAuthenticator::from_settings(&settings, RecordingRealm::default()).unwrap();
    let mut request = Request::new("POST", "/app/do_login")
        .with_context_path("/app")
        .with_parameter("j_username", "alice")
        .with_parameter("j_password", "wonderland");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Redirect("/app/home".into()));
    assert_eq!(request.principal().map(String::as_str), Some("alice"));
}

#[tokio::test]
async fn test_process_login_custom_submit_path_ignores_default_path() {
    let settings = settings().with_login_submit_path("/do_login");
    let authenticator =
        FormAuthenticator::from_settings(&settings, RecordingRealm::default()).unwrap();
    let mut request = submission("alice", "wonderland");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Continue);
    assert!(request.principal().is_none());
    assert!(authenticator.realm().calls().is_empty());
}

// =========================================================================
// process_login(): successful submissions
// =========================================================================

#[tokio::test]
async fn test_process_login_valid_credentials_redirects_to_default_page() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = submission("alice", "wonderland");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Redirect("/app/home".into()));
    assert_eq!(request.principal().map(String::as_str), Some("alice"));
    assert_eq!(authenticator.realm().calls(), ["authenticate:alice"]);
}

#[tokio::test]
async fn test_process_login_valid_credentials_redirects_to_saved_request() {
    let authenticator = authenticator(RecordingRealm::default());
    let response = SecurityResponse::new();

    let mut challenged = Request::new("GET", "/app/orders?page=2").with_context_path("/app");
    let challenge = authenticator.show_login(&mut challenged, &response).unwrap();
    assert_eq!(challenge, LoginDecision::Redirect("/app/login.jsp".into()));
    let session = challenged.session().cloned().unwrap();

    let mut request = submission("alice", "wonderland").with_session(session);
    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Redirect("/app/orders?page=2".into()));
}

#[tokio::test]
async fn test_process_login_redirect_is_url_encoded_with_session_id() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = submission("alice", "wonderland");
    let mut response = SecurityResponse::new().with_url_session_id("abc123");

    let decision = authenticator
        .process_login(&mut request, &mut response)
        .await
        .unwrap();

    assert_eq!(
        decision,
        LoginDecision::Redirect("/app/home;jsessionid=abc123".into())
    );
}

#[tokio::test]
async fn test_process_login_flexible_realm_gets_whole_request() {
    let authenticator = authenticator(RecordingRealm::flexible());
    let mut request =
        Request::new("POST", "/j_security_check").with_header("X-Client-Cert", "carol");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Redirect("/home".into()));
    assert_eq!(request.principal().map(String::as_str), Some("carol"));
    assert_eq!(authenticator.realm().calls(), ["authenticate_request"]);
}

// =========================================================================
// process_login(): session fixation
// =========================================================================

#[tokio::test]
async fn test_process_login_different_principal_invalidates_session() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = submission("bob", "builder")
        .with_principal("alice".to_string())
        .with_session(Session::with_id("alice-session"));

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert!(decision.is_stop());
    assert_eq!(request.invalidated_sessions(), ["alice-session"]);
    assert!(request.session().is_none());
    assert_eq!(request.principal().map(String::as_str), Some("bob"));
}

#[tokio::test]
async fn test_process_login_same_principal_keeps_session() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = submission("alice", "wonderland")
        .with_principal("alice".to_string())
        .with_session(Session::with_id("alice-session"));

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();
    assert_eq!(decision, LoginDecision::Redirect("/app/home".into()));

    assert!(request.invalidated_sessions().is_empty());
    assert_eq!(request.session().map(Session::id), Some("alice-session"));
}

#[tokio::test]
async fn test_process_login_continue_url_read_before_invalidation() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut challenged = Request::new("GET", "/app/admin")
        .with_context_path("/app")
        .with_principal("alice".to_string())
        .with_session(Session::with_id("alice-session"));
    let challenge = authenticator
        .show_login(&mut challenged, &SecurityResponse::new())
        .unwrap();
    assert_eq!(challenge, LoginDecision::Redirect("/app/login.jsp".into()));
    let session = challenged.session().cloned().unwrap();

    let mut request = submission("bob", "builder")
        .with_principal("alice".to_string())
        .with_session(session);
    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Redirect("/app/admin".into()));
    assert_eq!(request.invalidated_sessions(), ["alice-session"]);
}

// =========================================================================
// process_login(): remember me
// =========================================================================

#[tokio::test]
async fn test_process_login_remember_me_present_remembers_login() {
    let authenticator = fresh_remembering_authenticator();
    let mut request = submission("alice", "wonderland").with_parameter("j_rememberme", "on");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();
    assert_eq!(decision, LoginDecision::Redirect("/app/home".into()));

    let manager = authenticator.persistent_login().unwrap();
    assert_eq!(manager.count("remember_login:alice:wonderland"), 1);
    assert_eq!(manager.count("forget_login"), 0);
}

#[tokio::test]
async fn test_process_login_remember_me_false_still_remembers_login() {
    let authenticator = fresh_remembering_authenticator();
    let mut request = submission("alice", "wonderland").with_parameter("j_rememberme", "false");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();
    assert_eq!(decision, LoginDecision::Redirect("/app/home".into()));

    let manager = authenticator.persistent_login().unwrap();
    assert_eq!(manager.count("remember_login:alice:wonderland"), 1);
}

#[tokio::test]
async fn test_process_login_remember_me_absent_forgets_login() {
    let authenticator = fresh_remembering_authenticator();
    let mut request = submission("alice", "wonderland");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();
    assert_eq!(decision, LoginDecision::Redirect("/app/home".into()));

    let manager = authenticator.persistent_login().unwrap();
    assert_eq!(manager.count("forget_login"), 1);
    assert!(!manager.calls().iter().any(|c| c.starts_with("remember_login")));
}

#[tokio::test]
async fn test_process_login_flexible_without_credentials_leaves_persistent_state() {
    let authenticator =
        remembering_authenticator(RecordingRealm::flexible(), RecordingManager::default());
    let mut request = Request::new("POST", "/j_security_check")
        .with_header("x-client-cert", "carol")
        .with_parameter("j_rememberme", "on");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert!(decision.is_stop());
    assert_eq!(manager_calls(&authenticator), ["remembering_login"]);
}

// =========================================================================
// process_login(): failed submissions
// =========================================================================

#[tokio::test]
async fn test_process_login_wrong_password_forwards_to_error_page() {
    let authenticator = fresh_remembering_authenticator();
    let mut request = submission("alice", "guess").with_parameter("j_rememberme", "on");
    let mut response = SecurityResponse::new();

    let decision = authenticator
        .process_login(&mut request, &mut response)
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Forward("/error.jsp?failed=1".into()));
    assert!(decision.is_stop());
    assert!(request.principal().is_none());
    assert_eq!(manager_calls(&authenticator), ["remembering_login"]);
}

#[tokio::test]
async fn test_process_login_missing_password_fails_without_calling_realm() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request =
        Request::new("POST", "/j_security_check").with_parameter("j_username", "alice");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision.forward_path(), Some("/error.jsp?failed=1"));
    assert!(authenticator.realm().calls().is_empty());
}

#[tokio::test]
async fn test_process_login_failure_keeps_existing_principal_and_session() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = submission("bob", "wrong")
        .with_principal("alice".to_string())
        .with_session(Session::with_id("alice-session"));

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();
    assert_eq!(decision, LoginDecision::Forward("/error.jsp?failed=1".into()));

    assert_eq!(request.principal().map(String::as_str), Some("alice"));
    assert!(request.invalidated_sessions().is_empty());
}

#[tokio::test]
async fn test_process_login_realm_unavailable_is_error() {
    let authenticator = authenticator(RecordingRealm::unavailable());
    let mut request = submission("alice", "wonderland");

    let result = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await;

    assert!(matches!(result, Err(FormguardError::Realm(RealmError::Unavailable(_)))));
    assert!(request.principal().is_none());
}

#[tokio::test]
async fn test_process_login_corrupt_saved_request_is_error() {
    let authenticator = authenticator(RecordingRealm::default());
    let session = Session::with_id("s1").with_attribute(SAVED_REQUEST_ATTRIBUTE, "not json");
    let mut request = submission("alice", "wonderland").with_session(session);

    let result = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await;

    assert!(matches!(result, Err(FormguardError::Http(_))));
}

// =========================================================================
// process_login(): remembered logins
// =========================================================================

#[tokio::test]
async fn test_process_login_restores_remembered_login() {
    let authenticator = remembering_authenticator(
        RecordingRealm::default(),
        RecordingManager::remembering(Some("alice"), Some("wonderland")),
    );
    let mut request = Request::new("GET", "/orders");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Continue);
    assert_eq!(request.principal().map(String::as_str), Some("alice"));
    assert!(request.session().is_none());
    assert_eq!(authenticator.persistent_login().unwrap().count("forget_login"), 0);
}

#[tokio::test]
async fn test_process_login_rejected_remembered_login_is_forgotten_once() {
    let authenticator = remembering_authenticator(
        RecordingRealm::default(),
        RecordingManager::remembering(Some("alice"), Some("old-password")),
    );
    let mut request = Request::new("GET", "/orders");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert_eq!(decision, LoginDecision::Continue);
    assert!(request.principal().is_none());
    assert_eq!(authenticator.persistent_login().unwrap().count("forget_login"), 1);
}

#[tokio::test]
async fn test_process_login_incomplete_remembered_login_is_forgotten() {
    let authenticator = remembering_authenticator(
        RecordingRealm::default(),
        RecordingManager::remembering(Some("alice"), None),
    );
    let mut request = Request::new("GET", "/orders");

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();
    assert_eq!(decision, LoginDecision::Continue);

    assert!(request.principal().is_none());
    assert!(authenticator.realm().calls().is_empty());
    assert_eq!(authenticator.persistent_login().unwrap().count("forget_login"), 1);
}

#[tokio::test]
async fn test_process_login_existing_principal_skips_restore() {
    let authenticator = remembering_authenticator(
        RecordingRealm::default(),
        RecordingManager::remembering(Some("alice"), Some("wonderland")),
    );
    let mut request = Request::new("GET", "/orders").with_principal("bob".to_string());

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();
    assert_eq!(decision, LoginDecision::Continue);

    assert_eq!(request.principal().map(String::as_str), Some("bob"));
    assert!(manager_calls(&authenticator).is_empty());
}

#[tokio::test]
async fn test_process_login_restores_before_handling_submission() {
    let authenticator = remembering_authenticator(
        RecordingRealm::default(),
        RecordingManager::remembering(Some("alice"), Some("wonderland")),
    );
    let mut request = submission("bob", "builder").with_session(Session::with_id("s1"));

    let decision = authenticator
        .process_login(&mut request, &mut SecurityResponse::new())
        .await
        .unwrap();

    assert!(decision.is_stop());
    assert_eq!(
        authenticator.realm().calls(),
        ["authenticate:alice", "authenticate:bob"]
    );
    assert_eq!(request.principal().map(String::as_str), Some("bob"));
    assert_eq!(request.invalidated_sessions(), ["s1"]);
}

// =========================================================================
// process_logout()
// =========================================================================

#[tokio::test]
async fn test_process_logout_forgets_remembered_login() {
    let authenticator = remembering_authenticator(
        RecordingRealm::default(),
        RecordingManager::remembering(Some("alice"), Some("wonderland")),
    );
    let request = Request::new("GET", "/app/logout.jsp").with_context_path("/app");

    let is_logout = authenticator
        .process_logout(&request, &mut SecurityResponse::new(), &ServletPatternMatcher)
        .await
        .unwrap();

    assert!(is_logout);
    assert_eq!(manager_calls(&authenticator), ["remembering_login", "forget_login"]);
}

#[tokio::test]
async fn test_process_logout_without_remembered_login_skips_forget() {
    let authenticator = fresh_remembering_authenticator();
    let request = Request::new("GET", "/logout.jsp");

    let is_logout = authenticator
        .process_logout(&request, &mut SecurityResponse::new(), &ServletPatternMatcher)
        .await
        .unwrap();

    assert!(is_logout);
    assert_eq!(manager_calls(&authenticator), ["remembering_login"]);
}

#[tokio::test]
async fn test_process_logout_other_page_is_not_logout() {
    let authenticator = remembering_authenticator(
        RecordingRealm::default(),
        RecordingManager::remembering(Some("alice"), Some("wonderland")),
    );
    let request = Request::new("GET", "/home");

    let is_logout = authenticator
        .process_logout(&request, &mut SecurityResponse::new(), &ServletPatternMatcher)
        .await
        .unwrap();

    assert!(!is_logout);
    assert!(manager_calls(&authenticator).is_empty());
}

#[tokio::test]
async fn test_process_logout_not_configured_is_never_logout() {
    let settings = FormLoginSettings::new("/login.jsp", "/error.jsp");
    let authenticator =
        FormAuthenticator::from_settings(&settings, RecordingRealm::default()).unwrap();
    let request = Request::new("GET", "/logout.jsp");

    let is_logout = authenticator
        .process_logout(&request, &mut SecurityResponse::new(), &ServletPatternMatcher)
        .await
        .unwrap();

    assert!(!is_logout);
    assert!(!authenticator.bypass_security_for_this_request(&request, &ServletPatternMatcher));
}

// =========================================================================
// bypass_security_for_this_request()
// =========================================================================

#[test]
fn test_bypass_security_for_login_error_and_logout_pages() {
    let authenticator = authenticator(RecordingRealm::default());

    for uri in ["/app/login.jsp", "/app/error.jsp?failed=1", "/app/logout.jsp"] {
        let request = Request::new("GET", uri).with_context_path("/app");
        assert!(
            authenticator.bypass_security_for_this_request(&request, &ServletPatternMatcher),
            "{uri} should bypass security"
        );
    }
}

#[test]
fn test_bypass_security_for_other_pages_is_false() {
    let authenticator = authenticator(RecordingRealm::default());

    let uris = [
        "/app/home",
        "/app/login.jsp.bak",
        "/app/admin/login.jsp",
        "/app/j_security_check",
    ];
    for uri in uris {
        let request = Request::new("GET", uri).with_context_path("/app");
        assert!(
            !authenticator.bypass_security_for_this_request(&request, &ServletPatternMatcher),
            "{uri} should not bypass security"
        );
    }
}

#[test]
fn test_bypass_security_has_no_side_effects() {
    let authenticator = authenticator(RecordingRealm::default());
    let request = Request::new("GET", "/login.jsp");

    assert!(authenticator.bypass_security_for_this_request(&request, &ServletPatternMatcher));
    assert!(request.session().is_none());
    assert!(authenticator.realm().calls().is_empty());
}

// =========================================================================
// show_login() / auth_method()
// =========================================================================

#[test]
fn test_show_login_saves_request_and_redirects_to_login_page() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = Request::new("GET", "/app/orders?page=2").with_context_path("/app");

    let decision = authenticator
        .show_login(&mut request, &SecurityResponse::new())
        .unwrap();

    assert_eq!(decision, LoginDecision::Redirect("/app/login.jsp".into()));
    assert_eq!(
        authenticator
            .saved_requests()
            .continue_to_url(&request)
            .unwrap()
            .as_deref(),
        Some("/app/orders?page=2")
    );
}

#[test]
fn test_show_login_encodes_session_id() {
    let authenticator = authenticator(RecordingRealm::default());
    let mut request = Request::new("GET", "/orders");
    let response = SecurityResponse::new().with_url_session_id("xyz");

    let decision = authenticator.show_login(&mut request, &response).unwrap();

    assert_eq!(decision.redirect_url(), Some("/login.jsp;jsessionid=xyz"));
}

#[test]
fn test_auth_method_is_form() {
    assert_eq!(authenticator(RecordingRealm::default()).auth_method(), "FORM");
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_from_settings_invalid_page_is_config_error() {
    let settings = FormLoginSettings::new("login.jsp", "/error.jsp");

    let result = FormAuthenticator::from_settings(&settings, RecordingRealm::default());

    assert!(matches!(result, Err(FormguardError::Config(_))));
}

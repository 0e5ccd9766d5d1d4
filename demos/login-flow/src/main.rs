use formguard::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Authenticator = FormAuthenticator<MemoryRealm, MemoryPersistentLoginManager>;
type Request = SecurityRequest<UserPrincipal>;

// ---------------------------------------------------------------------------
// A toy security filter
// ---------------------------------------------------------------------------

/// What the filter ended up doing with a request.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Redirect(String),
    Forward(String),
    LoggedOut,
    Served(Option<String>),
}

/// Runs one request through the protocol the way a servlet-style filter
/// would: login, then logout, then bypass, then the access check.
async fn filter(
    auth: &Authenticator,
    request: &mut Request,
    response: &mut SecurityResponse,
) -> Result<Outcome, FormguardError> {
    match auth.process_login(request, response).await? {
        LoginDecision::Continue => {}
        LoginDecision::Redirect(url) => return Ok(Outcome::Redirect(url)),
        LoginDecision::Forward(page) => return Ok(Outcome::Forward(page)),
    }

    if auth.process_logout(request, response, &ServletPatternMatcher).await? {
        request.invalidate_session();
        return Ok(Outcome::LoggedOut);
    }

    if request.principal().is_none()
        && !auth.bypass_security_for_this_request(request, &ServletPatternMatcher)
    {
        if let LoginDecision::Redirect(url) = auth.show_login(request, response)? {
            return Ok(Outcome::Redirect(url));
        }
    }

    Ok(Outcome::Served(
        request.principal().map(|p| p.name().to_string()),
    ))
}

fn build() -> Result<Authenticator, FormguardError> {
    let realm = MemoryRealm::default()
        .with_user("alice", "wonderland", ["user"])
        .with_user("admin", "s3cret", ["user", "admin"]);
    let settings = FormLoginSettings::new("/login.jsp", "/login.jsp?failed=1")
        .with_logout_page("/logout.jsp")
        .with_default_page("/home");

    Ok(FormAuthenticator::from_settings(&settings, realm)?
        .with_persistent_login(MemoryPersistentLoginManager::new(PersistentLoginConfig::default())))
}

/// Carries the cookies a response set over to the next request, like a
/// browser would.
fn carry_cookies(mut request: Request, response: &SecurityResponse) -> Request {
    for command in response.cookie_commands() {
        if let CookieCommand::Set(cookie) = command {
            request = request.with_cookie(cookie.name.clone(), cookie.value.clone());
        }
    }
    request
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let auth = build()?;

    // 1. Anonymous request for a protected page gets challenged.
    let mut request = Request::new("GET", "/shop/orders?page=2").with_context_path("/shop");
    let outcome = filter(&auth, &mut request, &mut SecurityResponse::new()).await?;
    info!(?outcome, "anonymous request");
    let session = request.session().cloned().ok_or("challenge did not create a session")?;

    // 2. Wrong password lands on the error page.
    let mut request = Request::new("POST", "/shop/j_security_check")
        .with_context_path("/shop")
        .with_parameter(FORM_USERNAME, "alice")
        .with_parameter(FORM_PASSWORD, "guess")
        .with_session(session.clone());
    let outcome = filter(&auth, &mut request, &mut SecurityResponse::new()).await?;
    info!(?outcome, "wrong password");

    // 3. Right password, with remember-me, goes back to the saved page.
    let mut request = Request::new("POST", "/shop/j_security_check")
        .with_context_path("/shop")
        .with_parameter(FORM_USERNAME, "alice")
        .with_parameter(FORM_PASSWORD, "wonderland")
        .with_parameter(FORM_REMEMBER_ME, "on")
        .with_session(session);
    let mut response = SecurityResponse::new();
    let outcome = filter(&auth, &mut request, &mut response).await?;
    info!(?outcome, "login");

    // 4. A fresh browser session is logged in from the remember-me cookie.
    let mut request = carry_cookies(
        Request::new("GET", "/shop/orders").with_context_path("/shop"),
        &response,
    );
    let outcome = filter(&auth, &mut request, &mut SecurityResponse::new()).await?;
    info!(?outcome, "new session");

    // 5. Logout forgets the remembered login.
    let mut logout = carry_cookies(
        Request::new("GET", "/shop/logout.jsp").with_context_path("/shop"),
        &response,
    );
    let outcome = filter(&auth, &mut logout, &mut SecurityResponse::new()).await?;
    info!(?outcome, "logout");

    let mut request = carry_cookies(
        Request::new("GET", "/shop/orders").with_context_path("/shop"),
        &response,
    );
    let outcome = filter(&auth, &mut request, &mut SecurityResponse::new()).await?;
    info!(?outcome, "after logout");

    Ok(())
}

//! The [`Realm`] trait.

use std::fmt;
use std::future::Future;

use formguard_http::SecurityRequest;

use crate::RealmError;

/// What a principal type must support.
///
/// Principals are compared with `==` to tell whether a user logging in is
/// the same user the session already belongs to, so `PartialEq` should
/// compare *identity* (e.g. the user name), not incidental data.
///
/// Any type with these bounds is a principal; there is nothing to
/// implement.
pub trait Principal: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> Principal for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// How a realm wants to be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RealmKind {
    /// Authenticates a username/password pair via
    /// [`Realm::authenticate`].
    #[default]
    Basic,

    /// Needs more than the pair (extra form fields, headers, one-time
    /// codes) and is called with the whole request via
    /// [`Realm::authenticate_request`].
    Flexible,
}

/// Verifies credentials and produces principals.
///
/// # Trait bounds
///
/// - `Send + Sync` → one realm is shared by every request task.
/// - `'static` → it lives as long as the authenticator that owns it.
///
/// # Example
///
/// ```rust
/// use formguard_realm::{Realm, RealmError};
///
/// /// Lets in one hard-coded user. Only for tests!
/// struct OneUserRealm;
///
/// impl Realm for OneUserRealm {
///     type Principal = String;
///
///     async fn authenticate(
///         &self,
///         username: &str,
///         password: &str,
///     ) -> Result<Option<String>, RealmError> {
///         Ok((username == "admin" && password == "secret").then(|| username.to_string()))
///     }
/// }
/// ```
pub trait Realm: Send + Sync + 'static {
    /// The principal type this realm produces.
    type Principal: Principal;

    /// Reports how this realm wants to be called during a login
    /// submission. Defaults to [`RealmKind::Basic`].
    fn kind(&self) -> RealmKind {
        RealmKind::Basic
    }

    /// Authenticates a username/password pair.
    ///
    /// # Returns
    /// - `Ok(Some(principal))`: the credentials are valid
    /// - `Ok(None)`: the credentials were rejected
    /// - `Err(_)`: the realm couldn't decide (backend down, ...)
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<Self::Principal>, RealmError>> + Send;

    /// Authenticates using everything in the request.
    ///
    /// Only called when [`kind`](Self::kind) returns
    /// [`RealmKind::Flexible`]. The default implementation reports
    /// [`RealmError::Unsupported`].
    fn authenticate_request(
        &self,
        request: &SecurityRequest<Self::Principal>,
    ) -> impl Future<Output = Result<Option<Self::Principal>, RealmError>> + Send {
        let _ = request;
        async { Err(RealmError::Unsupported("request-based authentication")) }
    }
}

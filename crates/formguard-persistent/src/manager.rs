//! The [`PersistentLoginManager`] trait.

use std::future::Future;

use formguard_http::{SecurityRequest, SecurityResponse};

use crate::PersistentLoginError;

/// Remembers logins across sessions.
///
/// The login protocol never looks inside a remembered login. It asks
/// whether a request carries one, reads back the username and password,
/// and tells the manager to remember or forget. Everything else (token
/// format, cookies, storage, expiry) belongs to the implementation.
///
/// All methods are generic over the request's principal type `P` because
/// the manager doesn't care who the principal is.
pub trait PersistentLoginManager: Send + Sync + 'static {
    /// Returns `true` if the request carries a valid remembered login.
    fn remembering_login<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
    ) -> impl Future<Output = Result<bool, PersistentLoginError>> + Send;

    /// Returns the remembered username, if the request carries one.
    fn remembered_username<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        response: &mut SecurityResponse,
    ) -> impl Future<Output = Result<Option<String>, PersistentLoginError>> + Send;

    /// Returns the remembered password, if the request carries one.
    fn remembered_password<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        response: &mut SecurityResponse,
    ) -> impl Future<Output = Result<Option<String>, PersistentLoginError>> + Send;

    /// Remembers `username`/`password` for this client.
    fn remember_login<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        response: &mut SecurityResponse,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), PersistentLoginError>> + Send;

    /// Forgets whatever login is remembered for this client.
    fn forget_login<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        response: &mut SecurityResponse,
    ) -> impl Future<Output = Result<(), PersistentLoginError>> + Send;
}

/// Stands in for a manager when persistent logins are disabled.
///
/// It never remembers anything, so a protocol configured with it behaves
/// exactly like one without persistent logins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPersistentLogin;

impl PersistentLoginManager for DisabledPersistentLogin {
    async fn remembering_login<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
    ) -> Result<bool, PersistentLoginError> {
        Ok(false)
    }

    async fn remembered_username<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<Option<String>, PersistentLoginError> {
        Ok(None)
    }

    async fn remembered_password<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<Option<String>, PersistentLoginError> {
        Ok(None)
    }

    async fn remember_login<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
        _username: &str,
        _password: &str,
    ) -> Result<(), PersistentLoginError> {
        Ok(())
    }

    async fn forget_login<P: Sync>(
        &self,
        _request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<(), PersistentLoginError> {
        Ok(())
    }
}

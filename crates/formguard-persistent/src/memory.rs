//! Cookie tokens backed by an in-process table.
//!
//! Each remembered login gets a random token. The token goes to the client
//! in a cookie; the username and password stay on the server, keyed by the
//! token. Forgetting a login deletes the entry and tells the client to drop
//! the cookie.
//!
//! The table lives in memory, so remembered logins don't survive a restart.
//! A shared store (database, cache) would implement
//! [`PersistentLoginManager`] the same way, with the map swapped out.

use std::collections::HashMap;

use formguard_http::{Cookie, SecurityRequest, SecurityResponse, generate_id};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{PersistentLoginConfig, PersistentLoginError, PersistentLoginManager};

/// One remembered login, as stored on the server.
#[derive(Clone)]
struct RememberedLogin {
    username: String,
    password: String,
    issued_at: Instant,
}

/// A [`PersistentLoginManager`] keeping tokens in memory.
///
/// ## Lifecycle
///
/// ```text
/// remember_login() ──→ [token in cookie + table]
///        │                     │
///        │                     ├── remembering_login() = true
///        │                     │
///        ▼                     ▼ (after max_age)
/// forget_login()          expire_stale() ──→ removed
/// ```
pub struct MemoryPersistentLoginManager {
    config: PersistentLoginConfig,

    /// Remembered logins keyed by token.
    ///
    /// A `tokio` mutex because the lock is taken inside async trait
    /// methods that run on whatever worker thread picks the request up.
    logins: Mutex<HashMap<String, RememberedLogin>>,
}

impl MemoryPersistentLoginManager {
    /// Creates an empty manager.
    pub fn new(config: PersistentLoginConfig) -> Self {
        Self {
            config,
            logins: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PersistentLoginConfig {
        &self.config
    }

    /// Removes every remembered login older than the max age.
    ///
    /// Expired logins are already ignored on lookup; this only frees the
    /// memory. Call it periodically. Returns how many were removed.
    pub async fn expire_stale(&self) -> usize {
        let max_age = self.config.max_age();
        let mut logins = self.logins.lock().await;
        let before = logins.len();
        logins.retain(|_, login| login.issued_at.elapsed() < max_age);
        let removed = before - logins.len();
        if removed > 0 {
            tracing::debug!(removed, "expired remembered logins");
        }
        removed
    }

    /// Returns the number of stored logins, expired or not.
    pub async fn len(&self) -> usize {
        self.logins.lock().await.len()
    }

    /// Returns `true` if no logins are stored.
    pub async fn is_empty(&self) -> bool {
        self.logins.lock().await.is_empty()
    }

    /// Finds the live login the request's cookie points to.
    async fn lookup<P>(&self, request: &SecurityRequest<P>) -> Option<RememberedLogin> {
        let token = request.cookie(&self.config.cookie_name)?;
        let logins = self.logins.lock().await;
        let login = logins.get(token)?;
        if login.issued_at.elapsed() >= self.config.max_age() {
            return None;
        }
        Some(login.clone())
    }
}

impl PersistentLoginManager for MemoryPersistentLoginManager {
    async fn remembering_login<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
    ) -> Result<bool, PersistentLoginError> {
        Ok(self.lookup(request).await.is_some())
    }

    async fn remembered_username<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<Option<String>, PersistentLoginError> {
        Ok(self.lookup(request).await.map(|login| login.username))
    }

    async fn remembered_password<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        _response: &mut SecurityResponse,
    ) -> Result<Option<String>, PersistentLoginError> {
        Ok(self.lookup(request).await.map(|login| login.password))
    }

    async fn remember_login<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        response: &mut SecurityResponse,
        username: &str,
        password: &str,
    ) -> Result<(), PersistentLoginError> {
        let token = generate_id();
        {
            let mut logins = self.logins.lock().await;
            // A client re-remembering its login gets a fresh token; the
            // old one must stop working.
            if let Some(old) = request.cookie(&self.config.cookie_name) {
                logins.remove(old);
            }
            logins.insert(
                token.clone(),
                RememberedLogin {
                    username: username.to_string(),
                    password: password.to_string(),
                    issued_at: Instant::now(),
                },
            );
        }

        response.set_cookie(
            Cookie::new(&self.config.cookie_name, token)
                .with_path(&self.config.cookie_path)
                .with_max_age(self.config.max_age()),
        );
        tracing::debug!(username, "login remembered");
        Ok(())
    }

    async fn forget_login<P: Sync>(
        &self,
        request: &SecurityRequest<P>,
        response: &mut SecurityResponse,
    ) -> Result<(), PersistentLoginError> {
        if let Some(token) = request.cookie(&self.config.cookie_name) {
            let removed = self.logins.lock().await.remove(token);
            if let Some(login) = removed {
                tracing::debug!(username = %login.username, "remembered login forgotten");
            }
        }
        response.remove_cookie(&self.config.cookie_name, &self.config.cookie_path);
        Ok(())
    }
}

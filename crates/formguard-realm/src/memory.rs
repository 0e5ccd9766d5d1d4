//! A realm backed by a fixed user table.
//!
//! Passwords are stored and compared as given. Hashing is the job of a
//! real credential store; this realm exists for demos, tests and small
//! deployments where the table comes from a config file.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{Realm, RealmError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// One user in the table.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserEntry {
    /// Login name.
    pub username: String,

    /// Password, in clear text.
    pub password: String,

    /// Roles granted to the user.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Configuration for a [`MemoryRealm`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryRealmConfig {
    /// The user table.
    pub users: Vec<UserEntry>,
}

// ---------------------------------------------------------------------------
// UserPrincipal
// ---------------------------------------------------------------------------

/// A named user with roles.
///
/// Two principals are equal when their names are equal; roles are ignored,
/// so a role change doesn't make the same user look like a different one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPrincipal {
    name: String,
    roles: Vec<String>,
}

impl UserPrincipal {
    /// Creates a principal without roles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
        }
    }

    /// Sets the principal's roles.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the user name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the roles.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns `true` if the principal has `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl PartialEq for UserPrincipal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for UserPrincipal {}

impl Hash for UserPrincipal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for UserPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// MemoryRealm
// ---------------------------------------------------------------------------

/// A [`Realm`] that checks credentials against an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryRealm {
    users: HashMap<String, UserEntry>,
}

impl MemoryRealm {
    /// Builds the realm from its configuration.
    ///
    /// If a username appears twice, the last entry wins.
    pub fn new(config: MemoryRealmConfig) -> Self {
        let users = config
            .users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();
        Self { users }
    }

    /// Adds (or replaces) a user.
    pub fn with_user(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let username = username.into();
        self.users.insert(
            username.clone(),
            UserEntry {
                username,
                password: password.into(),
                roles: roles.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Returns the number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Realm for MemoryRealm {
    type Principal = UserPrincipal;

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserPrincipal>, RealmError> {
        let Some(user) = self.users.get(username) else {
            tracing::debug!(username, "unknown user");
            return Ok(None);
        };

        if !constant_time_eq(user.password.as_bytes(), password.as_bytes()) {
            tracing::debug!(username, "password mismatch");
            return Ok(None);
        }

        Ok(Some(
            UserPrincipal::new(&user.username).with_roles(user.roles.iter().cloned()),
        ))
    }
}

/// Compares two byte strings without stopping at the first difference.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

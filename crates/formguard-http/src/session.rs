//! The per-request view of an HTTP session.
//!
//! formguard doesn't store sessions. The outer filter loads the session
//! for a request (if the client has one), hands it over through
//! [`SecurityRequest::with_session`](crate::SecurityRequest::with_session),
//! and writes it back when the request is done.

use std::collections::HashMap;

use rand::Rng;

/// A session attached to a request.
///
/// Attributes are plain strings; anything richer (like the saved request)
/// is serialized by whoever owns the attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    attributes: HashMap<String, String>,
    is_new: bool,
}

impl Session {
    /// Creates a brand-new session with a random id.
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            attributes: HashMap::new(),
            is_new: true,
        }
    }

    /// Wraps an existing session the outer filter loaded from its store.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
            is_new: false,
        }
    }

    /// Adds an attribute while building the session.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the session id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if the session was created during this request.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets (or replaces) an attribute.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Removes an attribute, returning its old value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Returns all attributes.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a random 32-character hex id (128 bits).
///
/// Used for session ids and for any other opaque token handed to a client.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

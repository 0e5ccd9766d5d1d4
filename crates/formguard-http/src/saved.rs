//! The record kept about a request that was challenged for login.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{HttpError, SecurityRequest};

/// What we remember about a request before redirecting to the login page.
///
/// After a successful login the user is sent back to [`url`](Self::url).
/// The method and parameters are kept so the outer filter can replay a
/// challenged POST if it wants to.
///
/// `BTreeMap` (instead of `HashMap`) keeps the JSON output stable, which
/// makes the stored attribute easy to compare and debug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRequest {
    /// Request path including context path and query string.
    pub url: String,

    /// HTTP method of the original request.
    pub method: String,

    /// Form parameters of the original request.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl SavedRequest {
    /// Captures the parts of `request` needed to continue to it later.
    pub fn capture<P>(request: &SecurityRequest<P>) -> Self {
        Self {
            url: request.request_url_with_query(),
            method: request.method().to_string(),
            parameters: request
                .parameters()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Serializes the record to JSON.
    pub fn to_json(&self) -> Result<String, HttpError> {
        serde_json::to_string(self).map_err(HttpError::SavedRequestEncode)
    }

    /// Parses a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, HttpError> {
        serde_json::from_str(json).map_err(HttpError::SavedRequestDecode)
    }
}

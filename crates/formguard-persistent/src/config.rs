//! Configuration for cookie-based persistent logins.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the remember-me cookie.
///
/// All fields have defaults, so a config file only needs to list the ones
/// it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersistentLoginConfig {
    /// Name of the cookie carrying the token.
    pub cookie_name: String,

    /// Path the cookie is scoped to.
    pub cookie_path: String,

    /// How long (in seconds) a remembered login stays valid.
    ///
    /// Default: 14 days. Set to 0 to make remembered logins expire
    /// immediately (useful in tests).
    pub max_age_secs: u64,
}

impl PersistentLoginConfig {
    /// Returns the max age as a `Duration`.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Default for PersistentLoginConfig {
    fn default() -> Self {
        Self {
            cookie_name: "formguard_remember".to_string(),
            cookie_path: "/".to_string(),
            max_age_secs: 14 * 24 * 60 * 60,
        }
    }
}

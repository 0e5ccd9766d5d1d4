//! Error types for the persistent-login layer.

/// Errors that can occur while reading or writing persistent logins.
///
/// A remembered login that simply doesn't exist (or has expired) is not
/// an error; it just means the request isn't remembered.
#[derive(Debug, thiserror::Error)]
pub enum PersistentLoginError {
    /// The token store couldn't be reached or refused the operation.
    #[error("persistent login store failed: {0}")]
    Store(String),

    /// A token was found but couldn't be read (corrupt, tampered with,
    /// wrong key, ...).
    #[error("invalid persistent login token: {0}")]
    InvalidToken(String),
}

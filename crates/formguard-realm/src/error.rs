//! Error types for the realm layer.

/// Errors a realm can report.
///
/// Note that *rejected credentials are not an error*: a realm says "no"
/// by returning `Ok(None)`. These variants are for realms that couldn't
/// give an answer at all, which aborts the request.
#[derive(Debug, thiserror::Error)]
pub enum RealmError {
    /// The realm's backing store (database, directory, ...) couldn't be
    /// reached.
    #[error("realm unavailable: {0}")]
    Unavailable(String),

    /// The realm was asked for a kind of authentication it doesn't do.
    #[error("realm does not support {0}")]
    Unsupported(&'static str),

    /// Anything else that went wrong inside the realm.
    #[error("internal realm error: {0}")]
    Internal(String),
}

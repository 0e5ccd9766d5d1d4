//! Error types for the HTTP view layer.

/// Errors that can occur while reading or writing request-scoped state.
///
/// The only state this layer serializes is the [`SavedRequest`](crate::SavedRequest)
/// kept in the session, so both variants wrap the original `serde_json`
/// error.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The saved request could not be turned into JSON.
    #[error("saved request encode failed: {0}")]
    SavedRequestEncode(#[source] serde_json::Error),

    /// The session attribute holding the saved request is not valid JSON,
    /// or doesn't have the expected shape.
    #[error("saved request decode failed: {0}")]
    SavedRequestDecode(#[source] serde_json::Error),
}

//! Request, response and session views for formguard.
//!
//! This crate defines the per-request data the login protocol works on:
//!
//! - **Request** ([`SecurityRequest`]): the matchable path, form
//!   parameters, cookies, the current principal and a lazily created
//!   [`Session`].
//! - **Response** ([`SecurityResponse`]): cookie commands and redirect
//!   URL encoding.
//! - **Saved requests** ([`SavedRequest`]): what gets remembered about a
//!   request that was challenged for login, so the user can continue to it
//!   afterwards.
//!
//! # Architecture
//!
//! The HTTP layer sits below every other formguard crate. It doesn't know
//! about realms, patterns or remembered logins; it only describes the
//! request and the commands the outer filter should apply to the response.
//!
//! ```text
//! Outer filter (HTTP I/O) → formguard-http (views) → realm / persistent / protocol
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod error;
mod request;
mod response;
mod saved;
mod session;
mod url;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::HttpError;
pub use request::SecurityRequest;
pub use response::{Cookie, CookieCommand, SecurityResponse, SESSION_ID_PATH_PARAM};
pub use saved::SavedRequest;
pub use session::{Session, generate_id};
pub use url::strip_query_string;

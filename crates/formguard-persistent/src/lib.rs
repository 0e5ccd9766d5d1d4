//! Persistent ("remember me") logins for formguard.
//!
//! A persistent login outlives the HTTP session: when the session is gone,
//! the client still carries something (usually a cookie) that lets the
//! server log it back in without showing the login form.
//!
//! # Key types
//!
//! - [`PersistentLoginManager`]: the trait the login protocol calls; the
//!   token format and storage are entirely up to the implementation
//! - [`MemoryPersistentLoginManager`]: random tokens in a cookie, backed
//!   by an in-process table
//! - [`DisabledPersistentLogin`]: the placeholder used when persistent
//!   logins are turned off
//!
//! # How it fits in the stack
//!
//! ```text
//! Login protocol (above)  ← asks "is this request remembered?" and
//!                           remembers/forgets logins
//!     ↕
//! Persistent layer (this crate)  ← owns tokens and their storage
//!     ↕
//! HTTP views (below)  ← request cookies in, cookie commands out
//! ```

#![allow(async_fn_in_trait)]

mod config;
mod error;
mod manager;
mod memory;

pub use config::PersistentLoginConfig;
pub use error::PersistentLoginError;
pub use manager::{DisabledPersistentLogin, PersistentLoginManager};
pub use memory::MemoryPersistentLoginManager;

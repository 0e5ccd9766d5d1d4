//! Credential verification for formguard.
//!
//! A **realm** maps identity material (a username and password, or a whole
//! request) to an authenticated principal. formguard doesn't verify
//! credentials itself; it asks the realm.
//!
//! # Key types
//!
//! - [`Realm`]: the trait realm implementations provide
//! - [`RealmKind`]: whether the realm wants the
//!   username/password pair or the whole request
//! - [`Principal`]: what a principal type must support
//! - [`MemoryRealm`] / [`UserPrincipal`]: a fixed user table, handy for
//!   demos, tests and small deployments

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod realm;

pub use error::RealmError;
pub use memory::{MemoryRealm, MemoryRealmConfig, UserEntry, UserPrincipal};
pub use realm::{Principal, Realm, RealmKind};

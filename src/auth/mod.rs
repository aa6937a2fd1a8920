//! Identity collaborator and user accounts.
//!
//! Authentication itself is delegated to an external identity provider; this
//! module carries the collaborator contract, an in-memory implementation,
//! and the profile/role records the storefront keeps alongside accounts.
//! Sessions are explicit values handed to whoever needs them — there is no
//! ambient "current user" state inside the domain services.

pub mod errors;
pub mod memory;
pub mod models;
pub mod provider;
pub(crate) mod records;
pub mod service;

pub use errors::AuthServiceError;
pub use provider::{IdentityError, IdentityProvider};
pub use service::*;

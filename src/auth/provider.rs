//! Identity provider collaborator.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::auth::models::Session;

/// Errors surfaced by an identity provider implementation.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("email already registered")]
    EmailTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("identity provider unreachable: {0}")]
    Unavailable(String),
}

/// External identity service contract.
///
/// The provider owns credentials and the active session; the storefront
/// never sees a password beyond these calls.
#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account and sign it in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, IdentityError>;

    /// Authenticate an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    /// End the active session, if any.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// The active session, if any.
    async fn current_session(&self) -> Result<Option<Session>, IdentityError>;
}

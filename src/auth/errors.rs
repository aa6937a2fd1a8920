//! Auth service errors.

use thiserror::Error;

use crate::{auth::provider::IdentityError, store::StoreError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("profile not found")]
    NotFound,

    #[error("identity provider error")]
    Identity(#[from] IdentityError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for AuthServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

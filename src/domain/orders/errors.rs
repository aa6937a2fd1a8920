//! Orders service errors.

use thiserror::Error;

use crate::{pricing::PricingError, store::StoreError};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A shipping field was blank; nothing has been written.
    #[error("missing shipping field: {field}")]
    IncompleteAddress { field: &'static str },

    #[error("order not found")]
    NotFound,

    /// Persisting the order or its items failed; any partial writes have
    /// been rolled back on a best-effort basis.
    #[error("order placement failed")]
    PlacementFailed(#[source] StoreError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A stored order document could not be interpreted.
    #[error("order record is malformed")]
    InvalidRecord,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for OrdersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

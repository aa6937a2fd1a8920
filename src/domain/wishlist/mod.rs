//! Wishlists

pub mod service;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

pub use service::*;

/// A saved product on a user's wishlist.
#[derive(Debug, Clone)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: Timestamp,
}

/// Outcome of a wishlist toggle.
#[derive(Debug, Clone)]
pub enum WishlistChange {
    Added(WishlistItem),
    Removed,
}

/// Stored document shape of a wishlist entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WishlistItemRecord {
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: Timestamp,
}

impl WishlistItemRecord {
    pub(crate) fn into_item(self, id: Uuid) -> WishlistItem {
        WishlistItem {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum WishlistServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for WishlistServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

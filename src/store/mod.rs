//! Document store collaborator.
//!
//! The storefront persists everything through an external document database
//! reached via [`DocumentStore`]: named collections of JSON documents with
//! per-record create/read/filter/merge/delete operations. Multi-record
//! transactions are deliberately absent from the contract; callers that need
//! cross-record consistency compensate at their own layer.

pub mod memory;

use async_trait::async_trait;
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Collection names used by the storefront.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const CART_ITEMS: &str = "cart_items";
    pub const WISHLIST_ITEMS: &str = "wishlist_items";
    pub const ORDERS: &str = "orders";
    pub const ORDER_ITEMS: &str = "order_items";
    pub const COUPONS: &str = "coupons";
    pub const PROFILES: &str = "profiles";
    pub const USER_ROLES: &str = "user_roles";
}

/// Errors surfaced by a document store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("document not found")]
    NotFound,

    /// A document could not be encoded or decoded.
    #[error("document serialization failed")]
    Serialization(#[from] serde_json::Error),

    /// The store rejected the request.
    #[error("store rejected the request: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Unavailable(String),
}

/// An equality constraint on a single document field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    /// Match documents whose `field` equals `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A stored document together with its id.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub value: Value,
}

/// External document database contract.
///
/// Ids are chosen by the caller (UUIDv7 throughout this crate) so records can
/// reference each other before every write has landed. Individual operations
/// are assumed atomic; nothing spanning two documents is.
#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document under the given id. Fails if the id is taken.
    async fn create(&self, collection: &str, id: Uuid, value: Value) -> Result<(), StoreError>;

    /// Read a document by id.
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError>;

    /// Read every document matching all of the given equality filters.
    async fn find(&self, collection: &str, filters: &[Filter]) -> Result<Vec<Document>, StoreError>;

    /// Merge the top-level fields of `patch` into an existing document.
    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> Result<(), StoreError>;

    /// Delete a document by id. Deleting an absent document is a no-op.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), StoreError>;
}

/// Decode a stored document into a typed record.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(value)?)
}

/// Encode a typed record into its stored document shape.
pub(crate) fn encode<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(record)?)
}

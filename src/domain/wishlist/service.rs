//! Wishlist service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::{
        products::repository::ProductsRepository,
        wishlist::{WishlistChange, WishlistItem, WishlistItemRecord, WishlistServiceError},
    },
    store::{self, DocumentStore, Filter, collections},
};

#[derive(Clone)]
pub struct DocWishlistService {
    store: Arc<dyn DocumentStore>,
    products: ProductsRepository,
}

impl DocWishlistService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            products: ProductsRepository::new(Arc::clone(&store)),
            store,
        }
    }

    async fn find_entry(
        &self,
        user: Uuid,
        product: Uuid,
    ) -> Result<Option<WishlistItem>, WishlistServiceError> {
        let documents = self
            .store
            .find(
                collections::WISHLIST_ITEMS,
                &[
                    Filter::eq("user_id", user.to_string()),
                    Filter::eq("product_id", product.to_string()),
                ],
            )
            .await?;

        let Some(document) = documents.into_iter().next() else {
            return Ok(None);
        };

        let record: WishlistItemRecord = store::decode(document.value)?;

        Ok(Some(record.into_item(document.id)))
    }
}

#[async_trait]
impl WishlistService for DocWishlistService {
    async fn toggle(
        &self,
        user: Uuid,
        product: Uuid,
    ) -> Result<WishlistChange, WishlistServiceError> {
        if let Some(existing) = self.find_entry(user, product).await? {
            self.store
                .delete(collections::WISHLIST_ITEMS, existing.id)
                .await?;

            return Ok(WishlistChange::Removed);
        }

        self.products
            .get(product)
            .await?
            .ok_or(WishlistServiceError::ProductNotFound)?;

        let record = WishlistItemRecord {
            user_id: user,
            product_id: product,
            created_at: Timestamp::now(),
        };
        let id = Uuid::now_v7();

        self.store
            .create(collections::WISHLIST_ITEMS, id, store::encode(&record)?)
            .await?;

        Ok(WishlistChange::Added(record.into_item(id)))
    }

    async fn list(&self, user: Uuid) -> Result<Vec<WishlistItem>, WishlistServiceError> {
        let documents = self
            .store
            .find(
                collections::WISHLIST_ITEMS,
                &[Filter::eq("user_id", user.to_string())],
            )
            .await?;

        documents
            .into_iter()
            .map(|document| {
                let record: WishlistItemRecord = store::decode(document.value)?;

                Ok(record.into_item(document.id))
            })
            .collect()
    }
}

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Add the product when absent, remove it when present.
    async fn toggle(
        &self,
        user: Uuid,
        product: Uuid,
    ) -> Result<WishlistChange, WishlistServiceError>;

    /// Every wishlist entry for the user.
    async fn list(&self, user: Uuid) -> Result<Vec<WishlistItem>, WishlistServiceError>;
}

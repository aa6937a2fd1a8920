//! Cart Items Repository

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::carts::{models::CartItem, records::CartItemRecord},
    store::{self, DocumentStore, Filter, StoreError, collections},
};

#[derive(Clone)]
pub(crate) struct CartItemsRepository {
    store: Arc<dyn DocumentStore>,
}

impl CartItemsRepository {
    pub(crate) fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All cart lines belonging to the user.
    pub(crate) async fn list(&self, user: Uuid) -> Result<Vec<CartItem>, StoreError> {
        let documents = self
            .store
            .find(
                collections::CART_ITEMS,
                &[Filter::eq("user_id", user.to_string())],
            )
            .await?;

        documents
            .into_iter()
            .map(|document| {
                let record: CartItemRecord = store::decode(document.value)?;

                Ok(record.into_item(document.id))
            })
            .collect()
    }

    /// The user's existing line for a product, if any.
    pub(crate) async fn find_line(
        &self,
        user: Uuid,
        product: Uuid,
    ) -> Result<Option<CartItem>, StoreError> {
        let documents = self
            .store
            .find(
                collections::CART_ITEMS,
                &[
                    Filter::eq("user_id", user.to_string()),
                    Filter::eq("product_id", product.to_string()),
                ],
            )
            .await?;

        let Some(document) = documents.into_iter().next() else {
            return Ok(None);
        };

        let record: CartItemRecord = store::decode(document.value)?;

        Ok(Some(record.into_item(document.id)))
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<Option<CartItem>, StoreError> {
        let Some(value) = self.store.get(collections::CART_ITEMS, id).await? else {
            return Ok(None);
        };

        let record: CartItemRecord = store::decode(value)?;

        Ok(Some(record.into_item(id)))
    }

    pub(crate) async fn create(&self, record: CartItemRecord) -> Result<CartItem, StoreError> {
        let id = Uuid::now_v7();

        self.store
            .create(collections::CART_ITEMS, id, store::encode(&record)?)
            .await?;

        Ok(record.into_item(id))
    }

    pub(crate) async fn set_quantity(&self, id: Uuid, quantity: u32) -> Result<(), StoreError> {
        self.store
            .update(collections::CART_ITEMS, id, json!({ "quantity": quantity }))
            .await
    }

    pub(crate) async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete(collections::CART_ITEMS, id).await
    }

    /// Delete every cart line belonging to the user.
    pub(crate) async fn clear(&self, user: Uuid) -> Result<(), StoreError> {
        let lines = self.list(user).await?;

        for line in lines {
            self.store.delete(collections::CART_ITEMS, line.id).await?;
        }

        Ok(())
    }
}

//! Orders repository.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::orders::{
        errors::OrdersServiceError,
        lifecycle::OrderStatus,
        models::{Order, OrderItem},
        records::{OrderItemRecord, OrderRecord},
    },
    store::{self, DocumentStore, Filter, StoreError, collections},
};

#[derive(Clone)]
pub(crate) struct OrdersRepository {
    store: Arc<dyn DocumentStore>,
}

impl OrdersRepository {
    pub(crate) fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn create(&self, order: &Order) -> Result<(), StoreError> {
        let record = OrderRecord::from_order(order);

        self.store
            .create(collections::ORDERS, order.id, store::encode(&record)?)
            .await
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<Option<Order>, OrdersServiceError> {
        let Some(value) = self.store.get(collections::ORDERS, id).await? else {
            return Ok(None);
        };

        let record: OrderRecord = store::decode(value)?;

        Ok(Some(record.into_order(id)?))
    }

    pub(crate) async fn list_for_user(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let documents = self
            .store
            .find(
                collections::ORDERS,
                &[Filter::eq("user_id", user.to_string())],
            )
            .await?;

        documents
            .into_iter()
            .map(|document| {
                let record: OrderRecord = store::decode(document.value)?;

                record.into_order(document.id)
            })
            .collect()
    }

    pub(crate) async fn list_all(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let documents = self.store.find(collections::ORDERS, &[]).await?;

        documents
            .into_iter()
            .map(|document| {
                let record: OrderRecord = store::decode(document.value)?;

                record.into_order(document.id)
            })
            .collect()
    }

    pub(crate) async fn set_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        self.store
            .update(collections::ORDERS, id, json!({ "status": status.as_str() }))
            .await
    }

    pub(crate) async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete(collections::ORDERS, id).await
    }
}

#[derive(Clone)]
pub(crate) struct OrderItemsRepository {
    store: Arc<dyn DocumentStore>,
}

impl OrderItemsRepository {
    pub(crate) fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn create(&self, item: &OrderItem) -> Result<(), StoreError> {
        let record = OrderItemRecord::from_item(item);

        self.store
            .create(collections::ORDER_ITEMS, item.id, store::encode(&record)?)
            .await
    }

    pub(crate) async fn list_for_order(
        &self,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, StoreError> {
        let documents = self
            .store
            .find(
                collections::ORDER_ITEMS,
                &[Filter::eq("order_id", order.to_string())],
            )
            .await?;

        documents
            .into_iter()
            .map(|document| {
                let record: OrderItemRecord = store::decode(document.value)?;

                Ok(record.into_item(document.id))
            })
            .collect()
    }

    pub(crate) async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete(collections::ORDER_ITEMS, id).await
    }
}

//! Products repository.

use std::sync::Arc;

use jiff::Timestamp;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::{
    domain::products::{
        models::{Category, NewProduct, Product, ProductUpdate},
        records::ProductRecord,
    },
    store::{self, DocumentStore, Filter, StoreError, collections},
};

#[derive(Clone)]
pub(crate) struct ProductsRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProductsRepository {
    pub(crate) fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn list(&self, category: Option<Category>) -> Result<Vec<Product>, StoreError> {
        let mut filters = Vec::new();

        if let Some(category) = category {
            filters.push(Filter::eq("category", category.as_str()));
        }

        let documents = self.store.find(collections::PRODUCTS, &filters).await?;

        documents
            .into_iter()
            .map(|document| {
                let record: ProductRecord = store::decode(document.value)?;

                Ok(record.into_product(document.id))
            })
            .collect()
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let Some(value) = self.store.get(collections::PRODUCTS, id).await? else {
            return Ok(None);
        };

        let record: ProductRecord = store::decode(value)?;

        Ok(Some(record.into_product(id)))
    }

    pub(crate) async fn create(
        &self,
        product: NewProduct,
        now: Timestamp,
    ) -> Result<Product, StoreError> {
        let id = Uuid::now_v7();

        let record = ProductRecord {
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image_url: product.image_url,
            stock: product.stock,
            rating: product.rating,
            is_featured: product.is_featured,
            created_at: now,
            updated_at: now,
        };

        self.store
            .create(collections::PRODUCTS, id, store::encode(&record)?)
            .await?;

        Ok(record.into_product(id))
    }

    pub(crate) async fn update(
        &self,
        id: Uuid,
        update: &ProductUpdate,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut patch = Map::new();

        if let Some(name) = &update.name {
            patch.insert("name".to_string(), json!(name));
        }
        if let Some(description) = &update.description {
            patch.insert("description".to_string(), json!(description));
        }
        if let Some(price) = update.price {
            patch.insert("price".to_string(), json!(price));
        }
        if let Some(category) = update.category {
            patch.insert("category".to_string(), json!(category));
        }
        if let Some(image_url) = &update.image_url {
            patch.insert("image_url".to_string(), json!(image_url));
        }
        if let Some(stock) = update.stock {
            patch.insert("stock".to_string(), json!(stock));
        }
        if let Some(rating) = update.rating {
            patch.insert("rating".to_string(), json!(rating));
        }
        if let Some(is_featured) = update.is_featured {
            patch.insert("is_featured".to_string(), json!(is_featured));
        }

        patch.insert("updated_at".to_string(), json!(now));

        self.store
            .update(collections::PRODUCTS, id, Value::Object(patch))
            .await
    }

    pub(crate) async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete(collections::PRODUCTS, id).await
    }
}

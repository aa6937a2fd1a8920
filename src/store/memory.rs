//! In-memory document store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{Document, DocumentStore, Filter, StoreError};

/// Process-local [`DocumentStore`] used by tests and the demo CLI.
///
/// Documents are keyed by UUIDv7, so iteration within a collection follows
/// creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<Uuid, Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(value: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|filter| value.get(&filter.field) == Some(&filter.value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, id: Uuid, value: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        if documents.contains_key(&id) {
            return Err(StoreError::Rejected(format!("duplicate document id {id}")));
        }

        documents.insert(id, value);

        Ok(())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(&id))
            .cloned())
    }

    async fn find(&self, collection: &str, filters: &[Filter]) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;

        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|(_, value)| matches(value, filters))
            .map(|(id, value)| Document {
                id: *id,
                value: value.clone(),
            })
            .collect())
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;

        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(&id))
            .ok_or(StoreError::NotFound)?;

        let Value::Object(fields) = patch else {
            return Err(StoreError::Rejected("patch must be an object".to_string()));
        };

        let Value::Object(existing) = document else {
            return Err(StoreError::Rejected(format!(
                "document {id} is not an object"
            )));
        };

        for (key, value) in fields {
            existing.insert(key, value);
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;

        if let Some(documents) = collections.get_mut(collection) {
            documents.remove(&id);
        }

        Ok(())
    }
}

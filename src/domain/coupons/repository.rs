//! Coupons repository.

use std::sync::Arc;

use jiff::Timestamp;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::{
    domain::coupons::{
        errors::CouponsServiceError,
        models::{Coupon, CouponUpdate, NewCoupon},
        records::{CouponRecord, discount_fields},
    },
    store::{self, DocumentStore, Filter, collections},
};

#[derive(Clone)]
pub(crate) struct CouponsRepository {
    store: Arc<dyn DocumentStore>,
}

impl CouponsRepository {
    pub(crate) fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Look up an active coupon by its (already normalized) code.
    pub(crate) async fn find_active_by_code(
        &self,
        code: &str,
    ) -> Result<Option<Coupon>, CouponsServiceError> {
        let documents = self
            .store
            .find(
                collections::COUPONS,
                &[Filter::eq("code", code), Filter::eq("is_active", true)],
            )
            .await?;

        let Some(document) = documents.into_iter().next() else {
            return Ok(None);
        };

        let record: CouponRecord = store::decode(document.value)?;

        Ok(Some(record.into_coupon(document.id)?))
    }

    pub(crate) async fn list(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        let documents = self.store.find(collections::COUPONS, &[]).await?;

        documents
            .into_iter()
            .map(|document| {
                let record: CouponRecord =
                    store::decode(document.value)?;

                Ok(record.into_coupon(document.id)?)
            })
            .collect()
    }

    pub(crate) async fn create(
        &self,
        coupon: NewCoupon,
        now: Timestamp,
    ) -> Result<Coupon, CouponsServiceError> {
        let id = Uuid::now_v7();
        let (discount_type, discount_value) = discount_fields(coupon.discount);

        let record = CouponRecord {
            code: coupon.code,
            discount_type,
            discount_value,
            min_order_value: coupon.min_order_value,
            expires_at: coupon.expires_at,
            is_active: coupon.is_active,
            created_at: now,
            updated_at: now,
        };

        self.store
            .create(
                collections::COUPONS,
                id,
                store::encode(&record)?,
            )
            .await?;

        Ok(record.into_coupon(id)?)
    }

    pub(crate) async fn update(
        &self,
        id: Uuid,
        update: &CouponUpdate,
        now: Timestamp,
    ) -> Result<(), CouponsServiceError> {
        let mut patch = Map::new();

        if let Some(code) = &update.code {
            patch.insert("code".to_string(), json!(code));
        }
        if let Some(discount) = update.discount {
            let (discount_type, discount_value) = discount_fields(discount);

            patch.insert("discount_type".to_string(), json!(discount_type));
            patch.insert("discount_value".to_string(), json!(discount_value));
        }
        if let Some(min_order_value) = update.min_order_value {
            patch.insert("min_order_value".to_string(), json!(min_order_value));
        }
        if let Some(expires_at) = update.expires_at {
            patch.insert("expires_at".to_string(), json!(expires_at));
        }
        if let Some(is_active) = update.is_active {
            patch.insert("is_active".to_string(), json!(is_active));
        }

        patch.insert("updated_at".to_string(), json!(now));

        Ok(self
            .store
            .update(collections::COUPONS, id, Value::Object(patch))
            .await?)
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<Option<Coupon>, CouponsServiceError> {
        let Some(value) = self.store.get(collections::COUPONS, id).await? else {
            return Ok(None);
        };

        let record: CouponRecord = store::decode(value)?;

        Ok(Some(record.into_coupon(id)?))
    }

    pub(crate) async fn delete(&self, id: Uuid) -> Result<(), CouponsServiceError> {
        Ok(self.store.delete(collections::COUPONS, id).await?)
    }
}

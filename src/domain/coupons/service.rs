//! Coupons service.
//!
//! Carries both the customer-facing evaluator and the back-office CRUD
//! operations. Evaluation is read-only: the caller keeps the returned
//! [`AppliedCoupon`] and attaches it to the order it eventually places.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use uuid::Uuid;

use crate::{
    domain::coupons::{
        errors::CouponsServiceError,
        models::{AppliedCoupon, Coupon, CouponDiscount, CouponUpdate, NewCoupon},
        repository::CouponsRepository,
    },
    store::DocumentStore,
};

#[derive(Clone)]
pub struct DocCouponsService {
    repository: CouponsRepository,
}

impl DocCouponsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: CouponsRepository::new(store),
        }
    }
}

/// Uppercase, trimmed form used for storage and lookup.
fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Whole minor units for a percentage of the subtotal, rounded midpoint
/// away from zero.
fn percent_of(subtotal: u64, percent: Decimal) -> Result<u64, CouponsServiceError> {
    let applied = percent
        .checked_mul(Decimal::from(subtotal))
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(CouponsServiceError::PercentConversion)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(CouponsServiceError::PercentConversion)
}

#[async_trait]
impl CouponsService for DocCouponsService {
    #[tracing::instrument(skip(self))]
    async fn evaluate(
        &self,
        code: &str,
        cart_subtotal: u64,
    ) -> Result<AppliedCoupon, CouponsServiceError> {
        let code = normalize(code);

        if code.is_empty() {
            return Err(CouponsServiceError::BlankCode);
        }

        let coupon = self
            .repository
            .find_active_by_code(&code)
            .await?
            .ok_or(CouponsServiceError::NotFound)?;

        if cart_subtotal < coupon.min_order_value {
            return Err(CouponsServiceError::MinimumOrderNotMet {
                required: coupon.min_order_value,
            });
        }

        let raw = match coupon.discount {
            CouponDiscount::Percentage(percent) => percent_of(cart_subtotal, percent)?,
            CouponDiscount::Flat(amount) => amount,
        };

        // A discount can never exceed what is being discounted.
        let discount = raw.min(cart_subtotal);

        tracing::debug!(code = %coupon.code, discount, "coupon evaluated");

        Ok(AppliedCoupon {
            code: coupon.code,
            discount,
        })
    }

    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        let mut coupons = self.repository.list().await?;

        // Newest first, the way the back office lists them.
        coupons.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(coupons)
    }

    async fn create_coupon(&self, coupon: NewCoupon) -> Result<Coupon, CouponsServiceError> {
        let coupon = NewCoupon {
            code: normalize(&coupon.code),
            ..coupon
        };

        if coupon.code.is_empty() {
            return Err(CouponsServiceError::BlankCode);
        }

        self.repository.create(coupon, Timestamp::now()).await
    }

    async fn update_coupon(
        &self,
        coupon: Uuid,
        update: CouponUpdate,
    ) -> Result<Coupon, CouponsServiceError> {
        let update = CouponUpdate {
            code: update.code.as_deref().map(normalize),
            ..update
        };

        self.repository
            .update(coupon, &update, Timestamp::now())
            .await?;

        self.repository
            .get(coupon)
            .await?
            .ok_or(CouponsServiceError::NotFound)
    }

    async fn delete_coupon(&self, coupon: Uuid) -> Result<(), CouponsServiceError> {
        self.repository
            .get(coupon)
            .await?
            .ok_or(CouponsServiceError::NotFound)?;

        self.repository.delete(coupon).await
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Validate a code against the stored coupons and compute the discount
    /// for the given cart subtotal (minor units).
    async fn evaluate(
        &self,
        code: &str,
        cart_subtotal: u64,
    ) -> Result<AppliedCoupon, CouponsServiceError>;

    /// Every coupon, newest first.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Create a coupon; the code is stored uppercase.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<Coupon, CouponsServiceError>;

    /// Apply a partial update to a coupon.
    async fn update_coupon(
        &self,
        coupon: Uuid,
        update: CouponUpdate,
    ) -> Result<Coupon, CouponsServiceError>;

    /// Remove a coupon.
    async fn delete_coupon(&self, coupon: Uuid) -> Result<(), CouponsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::store::memory::MemoryStore;

    use super::*;

    fn service() -> DocCouponsService {
        DocCouponsService::new(Arc::new(MemoryStore::new()))
    }

    fn study20() -> NewCoupon {
        NewCoupon {
            code: "STUDY20".to_string(),
            discount: CouponDiscount::Percentage(Decimal::from(20)),
            min_order_value: 1000_00,
            expires_at: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn percentage_discount_is_computed_from_subtotal() -> TestResult {
        let service = service();

        service.create_coupon(study20()).await?;

        let applied = service.evaluate("STUDY20", 1200_00).await?;

        assert_eq!(applied.code, "STUDY20");
        assert_eq!(applied.discount, 240_00);

        Ok(())
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive_and_trimmed() -> TestResult {
        let service = service();

        service.create_coupon(study20()).await?;

        let lower = service.evaluate("study20", 1200_00).await?;
        let padded = service.evaluate("  Study20  ", 1200_00).await?;

        assert_eq!(lower, padded);
        assert_eq!(lower.discount, 240_00);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() -> TestResult {
        let service = service();

        service.create_coupon(study20()).await?;

        let result = service.evaluate("NOPE", 1200_00).await;

        assert!(matches!(result, Err(CouponsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn blank_code_is_rejected_before_lookup() {
        let service = service();

        let result = service.evaluate("   ", 1200_00).await;

        assert!(matches!(result, Err(CouponsServiceError::BlankCode)));
    }

    #[tokio::test]
    async fn subtotal_below_minimum_is_rejected() -> TestResult {
        let service = service();

        service.create_coupon(study20()).await?;

        let result = service.evaluate("STUDY20", 500_00).await;

        assert!(matches!(
            result,
            Err(CouponsServiceError::MinimumOrderNotMet {
                required: 1000_00,
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn flat_discount_clamps_to_subtotal() -> TestResult {
        let service = service();

        service
            .create_coupon(NewCoupon {
                code: "FLAT300".to_string(),
                discount: CouponDiscount::Flat(300_00),
                min_order_value: 0,
                expires_at: None,
                is_active: true,
            })
            .await?;

        let applied = service.evaluate("FLAT300", 200_00).await?;

        assert_eq!(applied.discount, 200_00);

        Ok(())
    }

    #[tokio::test]
    async fn inactive_coupon_is_not_found() -> TestResult {
        let service = service();

        service
            .create_coupon(NewCoupon {
                is_active: false,
                ..study20()
            })
            .await?;

        let result = service.evaluate("STUDY20", 1200_00).await;

        assert!(matches!(result, Err(CouponsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn expiry_is_stored_but_not_enforced() -> TestResult {
        let service = service();

        // Long in the past; evaluation deliberately does not consult it.
        service
            .create_coupon(NewCoupon {
                expires_at: Some(Timestamp::UNIX_EPOCH),
                ..study20()
            })
            .await?;

        let applied = service.evaluate("STUDY20", 1200_00).await?;

        assert_eq!(applied.discount, 240_00);

        Ok(())
    }

    #[tokio::test]
    async fn fractional_percentage_rounds_midpoint_away_from_zero() -> TestResult {
        let service = service();

        service
            .create_coupon(NewCoupon {
                code: "HALF".to_string(),
                discount: CouponDiscount::Percentage(Decimal::new(25, 1)),
                min_order_value: 0,
                expires_at: None,
                is_active: true,
            })
            .await?;

        // 2.5% of 101 minor units = 2.525 → 3.
        let applied = service.evaluate("HALF", 101).await?;

        assert_eq!(applied.discount, 3);

        Ok(())
    }

    #[tokio::test]
    async fn created_code_is_normalized_uppercase() -> TestResult {
        let service = service();

        let created = service
            .create_coupon(NewCoupon {
                code: "  welcome10 ".to_string(),
                ..study20()
            })
            .await?;

        assert_eq!(created.code, "WELCOME10");

        Ok(())
    }

    #[tokio::test]
    async fn update_can_deactivate_a_coupon() -> TestResult {
        let service = service();

        let created = service.create_coupon(study20()).await?;

        let updated = service
            .update_coupon(
                created.id,
                CouponUpdate {
                    is_active: Some(false),
                    ..CouponUpdate::default()
                },
            )
            .await?;

        assert!(!updated.is_active);

        let result = service.evaluate("STUDY20", 1200_00).await;

        assert!(matches!(result, Err(CouponsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn deleted_coupon_stops_evaluating() -> TestResult {
        let service = service();

        let created = service.create_coupon(study20()).await?;

        service.delete_coupon(created.id).await?;

        let result = service.evaluate("STUDY20", 1200_00).await;

        assert!(matches!(result, Err(CouponsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn list_returns_newest_first() -> TestResult {
        let service = service();

        service.create_coupon(study20()).await?;
        service
            .create_coupon(NewCoupon {
                code: "FLAT300".to_string(),
                discount: CouponDiscount::Flat(300_00),
                ..study20()
            })
            .await?;

        let coupons = service.list_coupons().await?;

        assert_eq!(coupons.len(), 2);
        assert_eq!(coupons.first().map(|c| c.code.clone()), Some("FLAT300".to_string()));

        Ok(())
    }
}

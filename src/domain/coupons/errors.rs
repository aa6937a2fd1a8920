//! Coupons service errors.

use thiserror::Error;

use crate::store::StoreError;

/// A stored coupon document that cannot be interpreted.
#[derive(Debug, Error)]
pub enum InvalidCouponRecord {
    #[error("negative discount value")]
    NegativeDiscount,

    #[error("flat discount is not a whole minor-unit amount")]
    FractionalFlatDiscount,
}

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    /// The submitted code was empty after trimming.
    #[error("coupon code is blank")]
    BlankCode,

    /// No active coupon matches the normalized code.
    #[error("coupon not found")]
    NotFound,

    /// The cart subtotal is below the coupon's minimum order value.
    #[error("minimum order value of {required} required")]
    MinimumOrderNotMet { required: u64 },

    /// Percentage arithmetic could not be represented.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// A stored coupon document could not be interpreted.
    #[error("coupon record is malformed")]
    InvalidRecord(#[source] InvalidCouponRecord),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CouponsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl From<InvalidCouponRecord> for CouponsServiceError {
    fn from(error: InvalidCouponRecord) -> Self {
        Self::InvalidRecord(error)
    }
}

//! Coupon Records

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::coupons::{
    errors::InvalidCouponRecord,
    models::{Coupon, CouponDiscount},
};

/// Stored discriminant for the two discount kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DiscountType {
    Percentage,
    Flat,
}

/// Stored document shape of a coupon.
///
/// `discount_value` is a percentage for `percentage` coupons and a minor-unit
/// amount for `flat` ones; the conversion into [`Coupon`] resolves the pair
/// into a tagged value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CouponRecord {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default)]
    pub min_order_value: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CouponRecord {
    pub(crate) fn into_coupon(self, id: Uuid) -> Result<Coupon, InvalidCouponRecord> {
        if self.discount_value < Decimal::ZERO {
            return Err(InvalidCouponRecord::NegativeDiscount);
        }

        let discount = match self.discount_type {
            DiscountType::Percentage => CouponDiscount::Percentage(self.discount_value),
            DiscountType::Flat => {
                if !self.discount_value.fract().is_zero() {
                    return Err(InvalidCouponRecord::FractionalFlatDiscount);
                }

                CouponDiscount::Flat(
                    self.discount_value
                        .to_u64()
                        .ok_or(InvalidCouponRecord::FractionalFlatDiscount)?,
                )
            }
        };

        Ok(Coupon {
            id,
            code: self.code,
            discount,
            min_order_value: self.min_order_value,
            expires_at: self.expires_at,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Split a tagged discount back into its stored pair.
pub(crate) fn discount_fields(discount: CouponDiscount) -> (DiscountType, Decimal) {
    match discount {
        CouponDiscount::Percentage(value) => (DiscountType::Percentage, value),
        CouponDiscount::Flat(value) => (DiscountType::Flat, Decimal::from(value)),
    }
}

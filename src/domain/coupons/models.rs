//! Coupon Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

/// How a coupon reduces the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponDiscount {
    /// Percentage of the cart subtotal.
    Percentage(Decimal),
    /// Fixed amount in minor units.
    Flat(u64),
}

/// Coupon Model
#[derive(Debug, Clone)]
pub struct Coupon {
    pub id: Uuid,
    /// Always stored uppercase; lookups normalize before matching.
    pub code: String,
    pub discount: CouponDiscount,
    /// Smallest cart subtotal the coupon applies to, in minor units.
    pub min_order_value: u64,
    /// Stored for the back office; evaluation does not consult it.
    pub expires_at: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Coupon Model
#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount: CouponDiscount,
    pub min_order_value: u64,
    pub expires_at: Option<Timestamp>,
    pub is_active: bool,
}

/// Coupon Update Model — only the set fields are written.
#[derive(Debug, Clone, Default)]
pub struct CouponUpdate {
    pub code: Option<String>,
    pub discount: Option<CouponDiscount>,
    pub min_order_value: Option<u64>,
    pub expires_at: Option<Timestamp>,
    pub is_active: Option<bool>,
}

/// A successfully evaluated coupon, ready to attach to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    pub code: String,
    /// Discount in minor units, already clamped to the cart subtotal.
    pub discount: u64,
}

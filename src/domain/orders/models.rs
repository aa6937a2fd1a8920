//! Order Models

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::{coupons::models::AppliedCoupon, orders::lifecycle::OrderStatus};

/// Image used for order items whose cart line never captured one.
pub(crate) const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    Upi,
    Card,
}

impl PaymentMethod {
    /// The stored document representation of this method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Upi => "upi",
            Self::Card => "card",
        }
    }

    /// Parse a stored payment method string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cod" => Some(Self::Cod),
            "upi" => Some(Self::Upi),
            "card" => Some(Self::Card),
            _ => None,
        }
    }
}

/// Destination and contact details for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
}

impl ShippingInfo {
    /// The first blank field, if any. Checkout refuses to start writing
    /// until every field is filled in.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Everything checkout needs beyond the cart itself.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub shipping: ShippingInfo,
    pub payment_method: PaymentMethod,
    /// A coupon already evaluated against the current cart, if any.
    pub coupon: Option<AppliedCoupon>,
}

/// Order Model
///
/// Immutable after placement except for `status`.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Totals in minor units.
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
    pub coupon_code: Option<String>,
    pub shipping: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub expected_delivery: Timestamp,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    /// Number of order items written alongside this order; reconciliation
    /// compares it against what the store actually holds.
    pub item_count: u32,
}

/// Order Item Model
///
/// A snapshot of one cart line at the moment the order was placed.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    /// Unit price in minor units at the time of the order.
    pub price: u64,
}

/// An order whose persisted items disagree with its `item_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompleteOrder {
    pub order_id: Uuid,
    pub expected: u32,
    pub found: u32,
}

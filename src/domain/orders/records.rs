//! Order Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::orders::{
    errors::OrdersServiceError,
    lifecycle::OrderStatus,
    models::{Order, OrderItem, PaymentMethod, ShippingInfo},
};

/// Stored document shape of an order.
///
/// Shipping fields are flattened with a `shipping_` prefix, and the payment
/// method and status are stored as their wire strings. `status` is kept as a
/// raw string on read so an unrecognized value surfaces as a decode error at
/// this boundary rather than a panic deeper in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OrderRecord {
    pub user_id: Uuid,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_pincode: String,
    pub shipping_phone: String,
    pub payment_method: String,
    pub expected_delivery: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub item_count: u32,
}

impl OrderRecord {
    pub(crate) fn from_order(order: &Order) -> Self {
        Self {
            user_id: order.user_id,
            subtotal: order.subtotal,
            discount: order.discount,
            total: order.total,
            coupon_code: order.coupon_code.clone(),
            shipping_name: order.shipping.name.clone(),
            shipping_address: order.shipping.address.clone(),
            shipping_city: order.shipping.city.clone(),
            shipping_state: order.shipping.state.clone(),
            shipping_pincode: order.shipping.pincode.clone(),
            shipping_phone: order.shipping.phone.clone(),
            payment_method: order.payment_method.as_str().to_string(),
            expected_delivery: order.expected_delivery,
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
            item_count: order.item_count,
        }
    }

    pub(crate) fn into_order(self, id: Uuid) -> Result<Order, OrdersServiceError> {
        let status =
            OrderStatus::parse(&self.status).ok_or(OrdersServiceError::InvalidRecord)?;
        let payment_method =
            PaymentMethod::parse(&self.payment_method).ok_or(OrdersServiceError::InvalidRecord)?;

        Ok(Order {
            id,
            user_id: self.user_id,
            subtotal: self.subtotal,
            discount: self.discount,
            total: self.total,
            coupon_code: self.coupon_code,
            shipping: ShippingInfo {
                name: self.shipping_name,
                address: self.shipping_address,
                city: self.shipping_city,
                state: self.shipping_state,
                pincode: self.shipping_pincode,
                phone: self.shipping_phone,
            },
            payment_method,
            expected_delivery: self.expected_delivery,
            status,
            created_at: self.created_at,
            item_count: self.item_count,
        })
    }
}

/// Stored document shape of an order item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OrderItemRecord {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    pub price: u64,
}

impl OrderItemRecord {
    pub(crate) fn from_item(item: &OrderItem) -> Self {
        Self {
            order_id: item.order_id,
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            product_image: item.product_image.clone(),
            quantity: item.quantity,
            price: item.price,
        }
    }

    pub(crate) fn into_item(self, id: Uuid) -> OrderItem {
        OrderItem {
            id,
            order_id: self.order_id,
            product_id: self.product_id,
            product_name: self.product_name,
            product_image: self.product_image,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

//! Cart Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::carts::models::CartItem;

/// Stored document shape of a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CartItemRecord {
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    pub created_at: Timestamp,
}

impl CartItemRecord {
    pub(crate) fn into_item(self, id: Uuid) -> CartItem {
        CartItem {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            product_name: self.product_name,
            product_image: self.product_image,
            created_at: self.created_at,
        }
    }
}

//! Cart Models

use jiff::Timestamp;
use uuid::Uuid;

/// A single cart line: one product at some quantity.
///
/// Product details are denormalized onto the line when it is created so the
/// checkout summary and order items can be built without re-reading the
/// catalog. A line written by an older client may lack the snapshots; such
/// lines price at zero.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    /// Unit price in minor units at the time the line was created.
    pub unit_price: Option<u64>,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
    pub created_at: Timestamp,
}

/// Aggregate view of a user's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Total units across all lines.
    pub count: u64,
    /// Subtotal in minor units.
    pub subtotal: u64,
}

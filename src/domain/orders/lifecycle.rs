//! Order fulfillment lifecycle.
//!
//! Five stages, strictly ordered, no branching. The back office may write
//! any stage directly — there is no transition validation — so progress
//! display has to tolerate whatever string is in the document.

use serde::{Deserialize, Serialize};

/// Fulfillment stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    OrderPlaced,
    Packed,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Every stage an order passes through, in fulfillment order.
    pub const STAGES: [OrderStatus; 5] = [
        OrderStatus::OrderPlaced,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// Zero-based position of this stage in [`Self::STAGES`].
    #[must_use]
    pub fn progress_index(self) -> usize {
        match self {
            Self::OrderPlaced => 0,
            Self::Packed => 1,
            Self::Shipped => 2,
            Self::OutForDelivery => 3,
            Self::Delivered => 4,
        }
    }

    /// The stored document representation of this stage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OrderPlaced => "order_placed",
            Self::Packed => "packed",
            Self::Shipped => "shipped",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        }
    }

    /// Human-readable stage label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OrderPlaced => "Order Placed",
            Self::Packed => "Packed",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }

    /// Parse a stored status string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::STAGES
            .into_iter()
            .find(|status| status.as_str() == value)
    }
}

/// Position of a stored status string in the stage list.
///
/// Unrecognized statuses return `None`; callers render them as not started.
#[must_use]
pub fn progress_index(status: &str) -> Option<usize> {
    OrderStatus::parse(status).map(OrderStatus::progress_index)
}

/// Fraction of the lifecycle completed, for proportional progress bars.
///
/// `order_placed` maps to 0.0 and `delivered` to 1.0; unrecognized statuses
/// also map to 0.0.
#[must_use]
pub fn progress_fraction(status: &str) -> f64 {
    match progress_index(status) {
        #[allow(clippy::cast_precision_loss, reason = "index is at most 4")]
        Some(index) => index as f64 / (OrderStatus::STAGES.len() - 1) as f64,
        None => 0.0,
    }
}

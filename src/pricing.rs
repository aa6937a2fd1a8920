//! Checkout pricing.
//!
//! Pure arithmetic over cart lines: subtotal, discount application and the
//! projected delivery date. Delivery itself is always free; the only charge
//! on an order is the discounted item total.

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

use crate::domain::carts::models::CartItem;

/// Fixed delivery window applied to every order, in days.
pub const DELIVERY_WINDOW_DAYS: i64 = 5;

/// Errors that can occur while computing totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Line or cart arithmetic exceeded the representable range.
    #[error("cart total exceeds the representable range")]
    Overflow,
}

/// Computed checkout totals, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

/// Derive subtotal, discount and final total for a set of cart lines.
///
/// The discount is whatever the coupon evaluator already clamped; the
/// subtraction saturates at zero so a total can never go negative even if a
/// caller passes an unclamped amount.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the subtotal cannot be
/// represented in minor units.
pub fn order_totals(items: &[CartItem], discount: u64) -> Result<Totals, PricingError> {
    let subtotal = cart_subtotal(items)?;

    Ok(Totals {
        subtotal,
        discount,
        total: subtotal.saturating_sub(discount),
    })
}

/// Sum of `unit_price × quantity` over all lines.
///
/// Lines without a recorded price snapshot contribute zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the sum cannot be represented in
/// minor units.
pub fn cart_subtotal(items: &[CartItem]) -> Result<u64, PricingError> {
    items.iter().try_fold(0_u64, |acc, item| {
        let line = item
            .unit_price
            .unwrap_or(0)
            .checked_mul(u64::from(item.quantity))
            .ok_or(PricingError::Overflow)?;

        acc.checked_add(line).ok_or(PricingError::Overflow)
    })
}

/// Total number of units across all lines.
pub fn cart_count(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Project the delivery date for an order placed at the given instant.
pub fn expected_delivery(placed_at: Timestamp) -> Timestamp {
    placed_at
        .saturating_add(SignedDuration::from_hours(DELIVERY_WINDOW_DAYS * 24))
        .expect("saturating_add with a SignedDuration never errors")
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn line(unit_price: Option<u64>, quantity: u32) -> CartItem {
        CartItem {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            quantity,
            unit_price,
            product_name: None,
            product_image: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> testresult::TestResult {
        let items = [line(Some(100_00), 2), line(Some(50_00), 1)];

        assert_eq!(cart_subtotal(&items)?, 250_00);

        Ok(())
    }

    #[test]
    fn missing_price_snapshot_contributes_zero() -> testresult::TestResult {
        let items = [line(None, 3), line(Some(200_00), 1)];

        assert_eq!(cart_subtotal(&items)?, 200_00);

        Ok(())
    }

    #[test]
    fn empty_cart_has_zero_subtotal() -> testresult::TestResult {
        assert_eq!(cart_subtotal(&[])?, 0);

        Ok(())
    }

    #[test]
    fn subtotal_overflow_is_an_error() {
        let items = [line(Some(u64::MAX), 2)];

        assert!(matches!(cart_subtotal(&items), Err(PricingError::Overflow)));
    }

    #[test]
    fn totals_subtract_discount() -> testresult::TestResult {
        let items = [line(Some(1200_00), 1)];

        let totals = order_totals(&items, 240_00)?;

        assert_eq!(
            totals,
            Totals {
                subtotal: 1200_00,
                discount: 240_00,
                total: 960_00,
            }
        );

        Ok(())
    }

    #[test]
    fn total_saturates_at_zero() -> testresult::TestResult {
        let items = [line(Some(200_00), 1)];

        let totals = order_totals(&items, 300_00)?;

        assert_eq!(totals.total, 0);

        Ok(())
    }

    #[test]
    fn totals_are_idempotent() -> testresult::TestResult {
        let items = [line(Some(750_00), 2), line(None, 1)];

        assert_eq!(order_totals(&items, 100_00)?, order_totals(&items, 100_00)?);

        Ok(())
    }

    #[test]
    fn cart_count_sums_quantities() {
        let items = [line(Some(10_00), 2), line(Some(20_00), 5)];

        assert_eq!(cart_count(&items), 7);
    }

    #[test]
    fn delivery_is_projected_five_days_out() {
        let placed_at = Timestamp::UNIX_EPOCH;

        let expected = expected_delivery(placed_at);

        assert_eq!(
            expected.as_second() - placed_at.as_second(),
            DELIVERY_WINDOW_DAYS * 24 * 60 * 60
        );
    }
}

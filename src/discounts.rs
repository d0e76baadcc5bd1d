//! Discounts
//!
//! Percentage arithmetic on money and the rules that stack the loyalty, coupon and
//! first-purchase discounts into one capped percentage.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::tiers::CustomerTier;

/// Extra discount for a customer's first purchase.
const FIRST_PURCHASE_BONUS_POINTS: i64 = 5;

/// Minimum subtotal (minor units) for the first-purchase bonus.
const FIRST_PURCHASE_MINIMUM_MINOR: i64 = 5_000;

/// Ceiling on the combined discount, in hundredths.
const DISCOUNT_CAP_POINTS: i64 = 30;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate a percentage of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Calculate a percentage of a price, in the price's currency.
///
/// # Errors
///
/// See [`percent_of_minor`].
pub fn percent_of<'a>(
    price: &Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let minor = percent_of_minor(percent, price.to_minor_units())?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// The individual discounts that make up an order's discount percentage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DiscountStack {
    tier: Percentage,
    coupon: Percentage,
    first_purchase: Percentage,
}

impl DiscountStack {
    /// Build the stack for an order.
    ///
    /// The first-purchase bonus only applies once the subtotal reaches 50.00.
    pub fn new(
        tier: CustomerTier,
        coupon: Percentage,
        first_purchase: bool,
        subtotal: &Money<'_, Currency>,
    ) -> Self {
        let bonus_points = if first_purchase
            && subtotal.to_minor_units() >= FIRST_PURCHASE_MINIMUM_MINOR
        {
            FIRST_PURCHASE_BONUS_POINTS
        } else {
            0
        };

        Self {
            tier: tier.discount(),
            coupon,
            first_purchase: Percentage::from(Decimal::new(bonus_points, 2)),
        }
    }

    /// Discount from the loyalty tier.
    pub fn tier(&self) -> Percentage {
        self.tier
    }

    /// Discount from the coupon.
    pub fn coupon(&self) -> Percentage {
        self.coupon
    }

    /// Discount from the first-purchase bonus, zero when not earned.
    pub fn first_purchase(&self) -> Percentage {
        self.first_purchase
    }

    /// Sum of every discount before the cap.
    pub fn uncapped(&self) -> Decimal {
        [self.tier, self.coupon, self.first_purchase]
            .into_iter()
            .map(|percent| percent * Decimal::ONE)
            .sum()
    }

    /// Combined discount, never above 30%.
    pub fn combined(&self) -> Percentage {
        Percentage::from(self.uncapped().min(Decimal::new(DISCOUNT_CAP_POINTS, 2)))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    fn percent(points: i64) -> Percentage {
        Percentage::from(Decimal::new(points, 2))
    }

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        assert_eq!(percent_of_minor(&Percentage::from(0.25), 200)?, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        assert_eq!(percent_of_minor(&percent(10), 5)?, 1);
        assert_eq!(percent_of_minor(&percent(12), 1_254)?, 150);
        assert_eq!(percent_of_minor(&Percentage::from(0.5), 5)?, 3);
        assert_eq!(percent_of_minor(&Percentage::from(0.5), -5)?, -3);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let result = percent_of_minor(&Percentage::from(2.0), i64::MAX);

        assert_eq!(result, Err(DiscountError::PercentConversion));
    }

    #[test]
    fn percent_of_money_keeps_currency() -> TestResult {
        let price = Money::from_minor(20_000, BRL);

        assert_eq!(percent_of(&price, &percent(30))?, Money::from_minor(6_000, BRL));

        Ok(())
    }

    #[test]
    fn silver_first_purchase_stacks() {
        let stack =
            DiscountStack::new(CustomerTier::Silver, percent(0), true, &Money::from_minor(6_000, BRL));

        assert_eq!(stack.first_purchase(), percent(5));
        assert_eq!(stack.combined(), percent(10));
    }

    #[test]
    fn first_purchase_bonus_needs_fifty() {
        let below =
            DiscountStack::new(CustomerTier::Silver, percent(0), true, &Money::from_minor(4_999, BRL));
        let at =
            DiscountStack::new(CustomerTier::Silver, percent(0), true, &Money::from_minor(5_000, BRL));

        assert_eq!(below.combined(), percent(5));
        assert_eq!(at.combined(), percent(10));
    }

    #[test]
    fn first_purchase_bonus_needs_flag() {
        let stack =
            DiscountStack::new(CustomerTier::Basic, percent(0), false, &Money::from_minor(10_000, BRL));

        assert_eq!(stack.combined(), percent(0));
    }

    #[test]
    fn combined_discount_is_capped() {
        let stack =
            DiscountStack::new(CustomerTier::Gold, percent(20), true, &Money::from_minor(20_000, BRL));

        assert_eq!(stack.tier(), percent(10));
        assert_eq!(stack.coupon(), percent(20));
        assert_eq!(stack.first_purchase(), percent(5));
        assert_eq!(stack.uncapped(), Decimal::new(35, 2));
        assert_eq!(stack.combined(), percent(30));
    }
}

//! Checkout
//!
//! Prices an order in one pass: subtotal, coupon, stacked discount, tax on the discounted
//! non-exempt base, shipping and total. Every amount is worked in minor units and rounded
//! half away from zero.

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::info;

use crate::{
    basket::Basket,
    coupons::{CouponResult, CouponService},
    discounts::{DiscountError, DiscountStack, percent_of, percent_of_minor},
    pricing::TotalPriceError,
    shipping::{Region, ShippingError, ShippingService},
    tax::TaxPolicy,
    tiers::CustomerTier,
};

/// Errors that can occur while pricing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The subtotal could not be calculated.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// A discount or tax percentage could not be applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Shipping could not be calculated.
    #[error(transparent)]
    Shipping(#[from] ShippingError),

    /// The order total overflowed.
    #[error("order total overflowed")]
    Overflow,
}

/// An order to be priced.
#[derive(Debug, Clone)]
pub struct Order<'a> {
    /// Cart lines
    pub basket: Basket<'a>,

    /// Customer loyalty tier
    pub tier: CustomerTier,

    /// Whether this is the customer's first purchase
    pub first_purchase: bool,

    /// Destination region
    pub region: Region,

    /// Parcel weight in kilograms
    pub weight_kg: Decimal,

    /// Coupon code, if any
    pub coupon_code: Option<String>,

    /// Date the order is priced on
    pub today: Date,

    /// Last day the coupon is valid, if it expires
    pub coupon_expires_on: Option<Date>,
}

/// Priced order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutResult<'a> {
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    discount_percent: Percentage,
    tax: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    total: Money<'a, Currency>,
    coupon: CouponResult,
}

impl<'a> CheckoutResult<'a> {
    /// Sum of every line before discounts.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount taken off the subtotal.
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Combined discount percentage actually applied, never above 30%.
    pub fn discount_percent(&self) -> Percentage {
        self.discount_percent
    }

    /// Tax charged on the discounted, non-exempt lines.
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Shipping cost.
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Amount to pay.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// What the coupon granted.
    pub fn coupon(&self) -> CouponResult {
        self.coupon
    }
}

/// Prices orders.
#[derive(Debug, Copy, Clone, Default)]
pub struct CheckoutService {
    coupons: CouponService,
    shipping: ShippingService,
    tax: TaxPolicy,
}

impl CheckoutService {
    /// Create a checkout service with the standard tax policy.
    pub fn new(coupons: CouponService, shipping: ShippingService) -> Self {
        Self {
            coupons,
            shipping,
            tax: TaxPolicy::default(),
        }
    }

    /// Replace the tax policy.
    #[must_use]
    pub fn with_tax_policy(mut self, tax: TaxPolicy) -> Self {
        self.tax = tax;
        self
    }

    /// The tax policy in use.
    pub fn tax_policy(&self) -> &TaxPolicy {
        &self.tax
    }

    /// Price an order.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Shipping`]: the parcel weight is negative.
    /// - [`CheckoutError::TotalPrice`], [`CheckoutError::Discount`], [`CheckoutError::Overflow`]:
    ///   an amount does not fit in minor units.
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, order),
        fields(
            tier = %order.tier,
            region = %order.region,
            lines = order.basket.len(),
            coupon = order.coupon_code.as_deref().unwrap_or_default()
        ),
        err
    )]
    pub fn checkout<'a>(&self, order: &Order<'a>) -> Result<CheckoutResult<'a>, CheckoutError> {
        let subtotal = order.basket.subtotal()?;

        let coupon = self.coupons.evaluate(
            order.coupon_code.as_deref(),
            order.today,
            order.coupon_expires_on,
            &subtotal,
        );

        let discount_percent = DiscountStack::new(
            order.tier,
            coupon.discount(),
            order.first_purchase,
            &subtotal,
        )
        .combined();

        let discount = percent_of(&subtotal, &discount_percent)?;

        let taxable_minor = order.basket.taxable_subtotal(&self.tax)?.to_minor_units();
        let taxable_minor = taxable_minor
            .checked_sub(percent_of_minor(&discount_percent, taxable_minor)?)
            .ok_or(CheckoutError::Overflow)?;

        let tax = Money::from_minor(
            percent_of_minor(&self.tax.rate(), taxable_minor)?,
            subtotal.currency(),
        );

        let shipping = self.shipping.calculate(
            &order.region,
            order.weight_kg,
            &subtotal,
            coupon.free_shipping(),
        )?;

        let total_minor = subtotal
            .to_minor_units()
            .checked_sub(discount.to_minor_units())
            .and_then(|minor| minor.checked_add(tax.to_minor_units()))
            .and_then(|minor| minor.checked_add(shipping.to_minor_units()))
            .ok_or(CheckoutError::Overflow)?;

        let total = Money::from_minor(total_minor, subtotal.currency());

        info!(
            subtotal = %subtotal,
            discount = %discount,
            tax = %tax,
            shipping = %shipping,
            total = %total,
            "checkout priced"
        );

        Ok(CheckoutResult {
            subtotal,
            discount,
            discount_percent,
            tax,
            shipping,
            total,
            coupon,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use crate::{
        basket::BasketError,
        items::{Category, Item},
    };

    use super::*;

    fn order<'a>(items: Vec<Item<'a>>, tier: CustomerTier) -> Result<Order<'a>, BasketError> {
        Ok(Order {
            basket: Basket::with_items(items, BRL)?,
            tier,
            first_purchase: false,
            region: Region::Sul,
            weight_kg: Decimal::new(3, 0),
            coupon_code: None,
            today: date(2026, 10, 18),
            coupon_expires_on: None,
        })
    }

    #[test]
    fn tax_is_charged_on_discounted_taxable_lines() -> TestResult {
        let items = vec![
            Item::new(Category::Book, Money::from_minor(10_000, BRL), 1)?,
            Item::new(Category::Roupa, Money::from_minor(10_000, BRL), 1)?,
        ];

        let result = CheckoutService::default().checkout(&order(items, CustomerTier::Gold)?)?;

        // 10% off 100.00 taxable -> 90.00 at 12%
        assert_eq!(result.discount(), Money::from_minor(2_000, BRL));
        assert_eq!(result.tax(), Money::from_minor(1_080, BRL));
        assert_eq!(result.total(), Money::from_minor(20_000 - 2_000 + 1_080 + 3_500, BRL));

        Ok(())
    }

    #[test]
    fn empty_basket_still_pays_shipping() -> TestResult {
        let result = CheckoutService::default().checkout(&order(Vec::new(), CustomerTier::Basic)?)?;

        assert_eq!(result.subtotal(), Money::from_minor(0, BRL));
        assert_eq!(result.tax(), Money::from_minor(0, BRL));
        assert_eq!(result.total(), Money::from_minor(3_500, BRL));

        Ok(())
    }

    #[test]
    fn negative_weight_fails() -> TestResult {
        let items = vec![Item::new(Category::Roupa, Money::from_minor(1_000, BRL), 1)?];

        let mut order = order(items, CustomerTier::Basic)?;
        order.weight_kg = Decimal::new(-1, 0);

        assert_eq!(
            CheckoutService::default().checkout(&order),
            Err(CheckoutError::Shipping(ShippingError::NegativeWeight(
                Decimal::new(-1, 0)
            )))
        );

        Ok(())
    }

    #[test]
    fn custom_tax_policy_is_used() -> TestResult {
        let items = vec![Item::new(Category::Roupa, Money::from_minor(10_000, BRL), 1)?];

        let service = CheckoutService::new(CouponService, ShippingService::default())
            .with_tax_policy(TaxPolicy::with_rate(Percentage::from(Decimal::new(6, 2))));

        assert_eq!(service.tax_policy().rate(), Percentage::from(Decimal::new(6, 2)));
        assert_eq!(
            CheckoutService::default().tax_policy().rate(),
            Percentage::from(Decimal::new(12, 2))
        );

        let result = service.checkout(&order(items, CustomerTier::Basic)?)?;

        assert_eq!(result.tax(), Money::from_minor(600, BRL));

        Ok(())
    }
}

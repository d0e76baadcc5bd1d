//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    checkout::{CheckoutError, CheckoutResult, CheckoutService, Order},
    coupons::{CouponRejection, CouponResult, CouponService},
    discounts::{DiscountError, DiscountStack},
    fixtures::{FixtureError, OrderFixture},
    items::{Category, Item, ItemError},
    pricing::TotalPriceError,
    receipt::{Receipt, ReceiptError},
    shipping::{Region, ShippingError, ShippingService, WeightBand},
    tax::TaxPolicy,
    tiers::{CustomerTier, UnknownTier},
};

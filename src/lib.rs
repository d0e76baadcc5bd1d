//! Checkout Engine
//!
//! Prices an order at checkout: subtotal, loyalty and coupon discounts, category-exempt tax,
//! region and weight based shipping, and the final total.

pub mod basket;
pub mod checkout;
pub mod config;
pub mod coupons;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod logging;
pub mod pricing;
pub mod receipt;
pub mod shipping;
pub mod tax;
pub mod tiers;

pub mod prelude;

//! Fixtures
//!
//! Orders described in YAML, for the command line and for tests.

use std::{fs, path::Path};

use jiff::civil::Date;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{BRL, Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    basket::{Basket, BasketError},
    checkout::Order,
    items::{Category, Item, ItemError},
    shipping::Region,
    tiers::CustomerTier,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// An item could not be built
    #[error("Invalid item {index}: {source}")]
    Item {
        /// Position of the item in the fixture
        index: usize,
        /// Why the item was rejected
        source: ItemError,
    },

    /// Basket creation error
    #[error("Failed to create basket: {0}")]
    Basket(#[from] BasketError),
}

/// One cart line in YAML
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Category label (e.g., `BOOK`)
    pub category: Category,

    /// Unit price (e.g., "59.90 BRL")
    pub price: String,

    /// Quantity
    pub quantity: u32,
}

/// An order in YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Cart lines
    pub items: Vec<ItemFixture>,

    /// Customer tier label
    pub tier: CustomerTier,

    /// First purchase flag
    #[serde(default)]
    pub first_purchase: bool,

    /// Region label
    pub region: Region,

    /// Parcel weight in kilograms
    pub weight_kg: Decimal,

    /// Coupon code
    #[serde(default)]
    pub coupon: Option<String>,

    /// Pricing date
    #[serde(default)]
    pub today: Option<Date>,

    /// Last valid day of the coupon
    #[serde(default)]
    pub coupon_expires_on: Option<Date>,
}

impl OrderFixture {
    /// Read an order fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse an order fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or names an unknown tier or category.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Build the order. `default_today` is used when the fixture has no date.
    ///
    /// The basket currency is taken from the first item, BRL for an empty order.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is malformed, an item is invalid or currencies are mixed.
    pub fn into_order(self, default_today: Date) -> Result<Order<'static>, FixtureError> {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, fixture)| {
                let (minor_units, currency) = parse_price(&fixture.price)?;

                Item::new(
                    fixture.category,
                    Money::from_minor(minor_units, currency),
                    fixture.quantity,
                )
                .map_err(|source| FixtureError::Item { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let currency = items.first().map_or(BRL, |item| item.price().currency());

        Ok(Order {
            basket: Basket::with_items(items, currency)?,
            tier: self.tier,
            first_purchase: self.first_purchase,
            region: self.region,
            weight_kg: self.weight_kg,
            coupon_code: self.coupon,
            today: self.today.unwrap_or(default_today),
            coupon_expires_on: self.coupon_expires_on,
        })
    }
}

/// Parse price string (e.g., "59.90 BRL") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.scale() > 2 {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency: &'static Currency = match *currency_code {
        "BRL" => BRL,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

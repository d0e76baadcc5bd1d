//! Items

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while constructing or totalling an item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// The unit price was zero or negative (minor units).
    #[error("item price must be greater than zero, got {0} minor units")]
    NonPositivePrice(i64),

    /// The quantity was zero.
    #[error("item quantity must be greater than zero")]
    NonPositiveQuantity,

    /// Price multiplied by quantity does not fit in minor units.
    #[error("line total overflowed for {quantity} x {price_minor} minor units")]
    LineTotalOverflow {
        /// Unit price in minor units
        price_minor: i64,
        /// Quantity on the line
        quantity: u32,
    },

    /// The category label is not one of the known categories.
    #[error("unknown item category: {0}")]
    UnknownCategory(String),
}

/// Product category of a cart line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    /// Books (`BOOK`), exempt from tax
    Book,

    /// Electronics (`ELETRONICO`)
    Eletronico,

    /// Clothing (`ROUPA`)
    Roupa,
}

impl Category {
    /// The label used for this category in orders and fixtures.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Book => "BOOK",
            Category::Eletronico => "ELETRONICO",
            Category::Roupa => "ROUPA",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOK" => Ok(Category::Book),
            "ELETRONICO" => Ok(Category::Eletronico),
            "ROUPA" => Ok(Category::Roupa),
            other => Err(ItemError::UnknownCategory(other.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = ItemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single cart line: a category, a unit price and a quantity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Item<'a> {
    category: Category,
    price: Money<'a, iso::Currency>,
    quantity: u32,
}

impl<'a> Item<'a> {
    /// Creates a new item.
    ///
    /// # Errors
    ///
    /// - [`ItemError::NonPositivePrice`]: the price is zero or negative.
    /// - [`ItemError::NonPositiveQuantity`]: the quantity is zero.
    pub fn new(
        category: Category,
        price: Money<'a, iso::Currency>,
        quantity: u32,
    ) -> Result<Self, ItemError> {
        let price_minor = price.to_minor_units();

        if price_minor <= 0 {
            return Err(ItemError::NonPositivePrice(price_minor));
        }

        if quantity == 0 {
            return Err(ItemError::NonPositiveQuantity);
        }

        Ok(Self {
            category,
            price,
            quantity,
        })
    }

    /// Returns the category of the item
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the unit price of the item
    pub fn price(&self) -> &Money<'a, iso::Currency> {
        &self.price
    }

    /// Returns the quantity of the item
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::LineTotalOverflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, iso::Currency>, ItemError> {
        let price_minor = self.price.to_minor_units();

        let total = price_minor
            .checked_mul(i64::from(self.quantity))
            .ok_or(ItemError::LineTotalOverflow {
                price_minor,
                quantity: self.quantity,
            })?;

        Ok(Money::from_minor(total, self.price.currency()))
    }
}

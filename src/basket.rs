//! Basket

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::Item,
    pricing::{TotalPriceError, taxable_subtotal, total_price},
    tax::TaxPolicy,
};

/// Errors related to basket construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BasketError {
    /// An item's currency differs from the basket currency (index, item currency, basket currency).
    #[error("Item {0} has currency {1}, but basket has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// The lines of an order, all priced in one currency.
#[derive(Debug, Clone)]
pub struct Basket<'a> {
    items: Vec<Item<'a>>,
    currency: &'static Currency,
}

impl<'a> Basket<'a> {
    /// Create a new, empty basket.
    pub fn new(currency: &'static Currency) -> Self {
        Basket {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new basket with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if an item is priced in a different currency.
    pub fn with_items(
        items: impl Into<Vec<Item<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, BasketError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.price().currency();

            if item_currency == currency {
                Ok(())
            } else {
                Err(BasketError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Basket { items, currency })
    }

    /// Sum of every line total.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if a line total or the sum overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.items, self.currency)
    }

    /// Sum of the line totals that are not exempt under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if a line total or the sum overflows.
    pub fn taxable_subtotal(
        &self,
        policy: &TaxPolicy,
    ) -> Result<Money<'a, Currency>, TotalPriceError> {
        taxable_subtotal(&self.items, policy, self.currency)
    }

    /// The items in the basket, in insertion order.
    pub fn items(&self) -> &[Item<'a>] {
        &self.items
    }

    /// Get the number of lines in the basket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the basket.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::items::Category;

    use super::*;

    fn test_items<'a>() -> Result<[Item<'a>; 3], crate::items::ItemError> {
        Ok([
            Item::new(Category::Book, Money::from_minor(10_000, iso::BRL), 1)?,
            Item::new(Category::Eletronico, Money::from_minor(5000, iso::BRL), 2)?,
            Item::new(Category::Roupa, Money::from_minor(2550, iso::BRL), 1)?,
        ])
    }

    #[test]
    fn new_with_currency() {
        let basket = Basket::new(iso::BRL);

        assert_eq!(basket.currency(), iso::BRL);
        assert!(basket.is_empty());
    }

    #[test]
    fn with_items_currency_mismatch_errors() -> TestResult {
        let items = [
            Item::new(Category::Book, Money::from_minor(100, iso::BRL), 1)?,
            Item::new(Category::Book, Money::from_minor(100, iso::USD), 1)?,
        ];

        let result = Basket::with_items(items, iso::BRL);

        assert!(matches!(
            result,
            Err(BasketError::CurrencyMismatch(1, "USD", "BRL"))
        ));

        Ok(())
    }

    #[test]
    fn subtotal_multiplies_quantities() -> TestResult {
        let basket = Basket::with_items(test_items()?, iso::BRL)?;

        assert_eq!(basket.len(), 3);
        assert_eq!(basket.subtotal()?, Money::from_minor(22_550, iso::BRL));

        Ok(())
    }

    #[test]
    fn taxable_subtotal_skips_books() -> TestResult {
        let basket = Basket::with_items(test_items()?, iso::BRL)?;

        assert_eq!(
            basket.taxable_subtotal(&TaxPolicy::default())?,
            Money::from_minor(12_550, iso::BRL)
        );

        Ok(())
    }

    #[test]
    fn subtotal_with_no_items() -> TestResult {
        let basket = Basket::new(iso::BRL);

        assert_eq!(basket.subtotal()?, Money::from_minor(0, iso::BRL));

        Ok(())
    }
}

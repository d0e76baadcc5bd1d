//! Prices

use rusty_money::{Money, iso};
use thiserror::Error;

use crate::{
    items::{Item, ItemError},
    tax::TaxPolicy,
};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalPriceError {
    /// A line total could not be computed.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The running total overflowed.
    #[error("total price overflowed")]
    Overflow,
}

/// Calculates the total price of a list of items, quantities included.
///
/// The sum is kept in minor units, so no rounding happens per line.
///
/// # Errors
///
/// - [`TotalPriceError::Item`]: a line total overflowed.
/// - [`TotalPriceError::Overflow`]: the sum overflowed.
pub fn total_price<'a>(
    items: &[Item<'a>],
    currency: &'a iso::Currency,
) -> Result<Money<'a, iso::Currency>, TotalPriceError> {
    sum_lines(items.iter(), currency)
}

/// Calculates the total price of the items that are not tax exempt under `policy`.
///
/// # Errors
///
/// See [`total_price`].
pub fn taxable_subtotal<'a>(
    items: &[Item<'a>],
    policy: &TaxPolicy,
    currency: &'a iso::Currency,
) -> Result<Money<'a, iso::Currency>, TotalPriceError> {
    sum_lines(
        items
            .iter()
            .filter(|item| !policy.is_exempt(item.category())),
        currency,
    )
}

fn sum_lines<'a, 'b>(
    mut items: impl Iterator<Item = &'b Item<'a>>,
    currency: &'a iso::Currency,
) -> Result<Money<'a, iso::Currency>, TotalPriceError>
where
    'a: 'b,
{
    let total = items.try_fold(0_i64, |acc, item| {
        let line = item.line_total()?.to_minor_units();

        acc.checked_add(line).ok_or(TotalPriceError::Overflow)
    })?;

    Ok(Money::from_minor(total, currency))
}

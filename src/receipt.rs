//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    checkout::{CheckoutResult, Order},
    items::ItemError,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line total could not be calculated.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Writing to the output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A priced order, ready to print.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'r, 'a> {
    order: &'r Order<'a>,
    result: &'r CheckoutResult<'a>,
}

impl<'r, 'a> Receipt<'r, 'a> {
    /// Create a receipt for an order and its checkout result.
    pub fn new(order: &'r Order<'a>, result: &'r CheckoutResult<'a>) -> Self {
        Self { order, result }
    }

    /// Write the line table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line total overflows or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Category", "Qty", "Unit Price", "Line Total"]);

        for (idx, item) in self.order.basket.items().iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                item.category().to_string(),
                item.quantity().to_string(),
                item.price().to_string(),
                item.line_total()?.to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(2..5), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let result = self.result;

        let rows = [
            ("Subtotal:", result.subtotal().to_string()),
            (
                "Discount:",
                format!(
                    "({:.2}%) -{}",
                    percent_points(result.discount_percent()),
                    result.discount()
                ),
            ),
            ("Tax:", result.tax().to_string()),
            ("Shipping:", result.shipping().to_string()),
            ("Total:", result.total().to_string()),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:<label_width$} {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// `0.25` -> `25.00`
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

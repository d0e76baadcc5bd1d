//! Tax

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::items::Category;

/// Categories that never pay tax.
const EXEMPT_CATEGORIES: &[Category] = &[Category::Book];

/// Tax rate and category exemptions applied at checkout.
#[derive(Debug, Copy, Clone)]
pub struct TaxPolicy {
    rate: Percentage,
    exempt: &'static [Category],
}

impl TaxPolicy {
    /// Create a policy with a custom rate and the standard exemptions.
    pub fn with_rate(rate: Percentage) -> Self {
        Self {
            rate,
            exempt: EXEMPT_CATEGORIES,
        }
    }

    /// The tax rate applied to the taxable base.
    pub fn rate(&self) -> Percentage {
        self.rate
    }

    /// Whether lines of this category are left out of the taxable base.
    pub fn is_exempt(&self, category: Category) -> bool {
        self.exempt.contains(&category)
    }
}

impl Default for TaxPolicy {
    /// 12% on everything except books.
    fn default() -> Self {
        Self::with_rate(Percentage::from(Decimal::new(12, 2)))
    }
}

//! Customer loyalty tiers

use std::{fmt, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// The tier label is not one of the known tiers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown customer tier: {0}")]
pub struct UnknownTier(pub String);

/// Customer loyalty tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum CustomerTier {
    /// No loyalty discount
    Basic,

    /// 5% off
    Silver,

    /// 10% off
    Gold,
}

impl CustomerTier {
    /// All tiers, cheapest first.
    pub const ALL: [CustomerTier; 3] = [
        CustomerTier::Basic,
        CustomerTier::Silver,
        CustomerTier::Gold,
    ];

    /// Discount granted by the tier, in hundredths.
    const fn discount_points(self) -> i64 {
        match self {
            CustomerTier::Basic => 0,
            CustomerTier::Silver => 5,
            CustomerTier::Gold => 10,
        }
    }

    /// Percentage discount granted solely by this tier.
    pub fn discount(self) -> Percentage {
        Percentage::from(Decimal::new(self.discount_points(), 2))
    }

    /// The label used for this tier in orders and fixtures.
    pub const fn label(self) -> &'static str {
        match self {
            CustomerTier::Basic => "BASIC",
            CustomerTier::Silver => "SILVER",
            CustomerTier::Gold => "GOLD",
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CustomerTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerTier::ALL
            .into_iter()
            .find(|tier| tier.label() == s)
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

impl TryFrom<String> for CustomerTier {
    type Error = UnknownTier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

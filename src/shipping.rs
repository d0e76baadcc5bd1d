//! Shipping
//!
//! Shipping cost is looked up from a per-region tariff table, banded by parcel weight. A
//! free-shipping grant zeroes the cost as long as the parcel is within the free-shipping
//! weight ceiling.

use std::{convert::Infallible, fmt, str::FromStr};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while calculating shipping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShippingError {
    /// The parcel weight was negative.
    #[error("weight must not be negative, got {0} kg")]
    NegativeWeight(Decimal),
}

/// Destination region of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Region {
    /// `SUL`
    Sul,

    /// `SUDESTE`
    Sudeste,

    /// `NORTE`
    Norte,

    /// `NORDESTE`
    Nordeste,

    /// Any other region label, charged the flat tariff.
    Other(String),
}

impl Region {
    /// The label used for this region in orders and fixtures.
    pub fn label(&self) -> &str {
        match self {
            Region::Sul => "SUL",
            Region::Sudeste => "SUDESTE",
            Region::Norte => "NORTE",
            Region::Nordeste => "NORDESTE",
            Region::Other(label) => label,
        }
    }

    fn tariff(&self) -> &'static RegionTariff {
        match self {
            Region::Sul | Region::Sudeste => &SOUTH_SOUTHEAST_TARIFF,
            Region::Norte => &NORTH_TARIFF,
            Region::Nordeste | Region::Other(_) => &FLAT_TARIFF,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SUL" => Region::Sul,
            "SUDESTE" => Region::Sudeste,
            "NORTE" => Region::Norte,
            "NORDESTE" => Region::Nordeste,
            other => Region::Other(other.to_string()),
        })
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(region) => region,
            Err(never) => match never {},
        }
    }
}

/// Weight band used to pick a tariff.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WeightBand {
    /// Under 2 kg
    Light,

    /// From 2 kg up to and including 5 kg
    Standard,

    /// Over 5 kg
    Heavy,
}

impl WeightBand {
    /// Band for a (non-negative) weight in kilograms.
    pub fn for_weight(weight_kg: Decimal) -> Self {
        if weight_kg < Decimal::TWO {
            WeightBand::Light
        } else if weight_kg <= Decimal::new(5, 0) {
            WeightBand::Standard
        } else {
            WeightBand::Heavy
        }
    }
}

/// Shipping prices for one region, in minor units.
#[derive(Debug)]
struct RegionTariff {
    light: i64,
    standard: i64,
    heavy: i64,
}

impl RegionTariff {
    const fn flat(minor: i64) -> Self {
        Self {
            light: minor,
            standard: minor,
            heavy: minor,
        }
    }

    const fn price(&self, band: WeightBand) -> i64 {
        match band {
            WeightBand::Light => self.light,
            WeightBand::Standard => self.standard,
            WeightBand::Heavy => self.heavy,
        }
    }
}

const SOUTH_SOUTHEAST_TARIFF: RegionTariff = RegionTariff {
    light: 2_000,
    standard: 3_500,
    heavy: 5_000,
};

const NORTH_TARIFF: RegionTariff = RegionTariff {
    light: 3_000,
    standard: 5_500,
    heavy: 8_000,
};

const FLAT_TARIFF: RegionTariff = RegionTariff::flat(4_000);

/// Calculates shipping cost.
#[derive(Debug, Copy, Clone)]
pub struct ShippingService {
    free_shipping_ceiling_kg: Decimal,
}

impl ShippingService {
    /// Create a service whose free-shipping grants stop applying above `ceiling_kg`.
    pub fn with_free_shipping_ceiling(ceiling_kg: Decimal) -> Self {
        Self {
            free_shipping_ceiling_kg: ceiling_kg,
        }
    }

    /// Heaviest parcel (kg) a free-shipping grant still covers.
    pub fn free_shipping_ceiling(&self) -> Decimal {
        self.free_shipping_ceiling_kg
    }

    /// Calculate the shipping cost of a parcel.
    ///
    /// `subtotal` only provides the currency of the returned amount. A free-shipping grant
    /// on a parcel over the ceiling is charged the region's standard-band tariff.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::NegativeWeight`] if `weight_kg` is negative.
    pub fn calculate<'a>(
        &self,
        region: &Region,
        weight_kg: Decimal,
        subtotal: &Money<'a, Currency>,
        free_shipping: bool,
    ) -> Result<Money<'a, Currency>, ShippingError> {
        if weight_kg < Decimal::ZERO {
            return Err(ShippingError::NegativeWeight(weight_kg));
        }

        let tariff = region.tariff();

        let minor = if free_shipping {
            if weight_kg <= self.free_shipping_ceiling_kg {
                0
            } else {
                debug!(
                    region = %region,
                    weight_kg = %weight_kg,
                    "free shipping void above weight ceiling"
                );

                tariff.price(WeightBand::Standard)
            }
        } else {
            tariff.price(WeightBand::for_weight(weight_kg))
        };

        Ok(Money::from_minor(minor, subtotal.currency()))
    }
}

impl Default for ShippingService {
    fn default() -> Self {
        Self::with_free_shipping_ceiling(Decimal::new(5, 0))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    fn kg(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn cost(region: &str, weight_kg: Decimal, free_shipping: bool) -> Result<i64, ShippingError> {
        let region: Region = region.parse().unwrap_or_else(|never| match never {});
        let subtotal = Money::from_minor(10_000, BRL);

        ShippingService::default()
            .calculate(&region, weight_kg, &subtotal, free_shipping)
            .map(|money| money.to_minor_units())
    }

    #[test]
    fn south_and_southeast_bands() -> TestResult {
        for region in ["SUL", "SUDESTE"] {
            assert_eq!(cost(region, kg(1), false)?, 2_000);
            assert_eq!(cost(region, kg(4), false)?, 3_500);
            assert_eq!(cost(region, kg(10), false)?, 5_000);
        }

        Ok(())
    }

    #[test]
    fn north_bands() -> TestResult {
        assert_eq!(cost("NORTE", kg(1), false)?, 3_000);
        assert_eq!(cost("NORTE", kg(4), false)?, 5_500);
        assert_eq!(cost("NORTE", kg(10), false)?, 8_000);

        Ok(())
    }

    #[test]
    fn northeast_and_unknown_regions_are_flat() -> TestResult {
        assert_eq!(cost("NORDESTE", kg(3), false)?, 4_000);
        assert_eq!(cost("NORDESTE", kg(10), false)?, 4_000);
        assert_eq!(cost("CENTRO-OESTE", kg(10), false)?, 4_000);

        Ok(())
    }

    #[test]
    fn band_edges() {
        assert_eq!(WeightBand::for_weight(Decimal::new(199, 2)), WeightBand::Light);
        assert_eq!(WeightBand::for_weight(kg(2)), WeightBand::Standard);
        assert_eq!(WeightBand::for_weight(kg(5)), WeightBand::Standard);
        assert_eq!(WeightBand::for_weight(Decimal::new(501, 2)), WeightBand::Heavy);
    }

    #[test]
    fn free_shipping_within_ceiling() -> TestResult {
        assert_eq!(cost("SUL", kg(3), true)?, 0);
        assert_eq!(cost("NORTE", kg(5), true)?, 0);
        assert_eq!(cost("SUL", Decimal::ZERO, true)?, 0);

        Ok(())
    }

    #[test]
    fn free_shipping_void_above_ceiling() -> TestResult {
        assert_eq!(cost("SUL", kg(10), true)?, 3_500);
        assert_eq!(cost("NORTE", kg(10), true)?, 5_500);
        assert_eq!(cost("NORDESTE", kg(10), true)?, 4_000);

        Ok(())
    }

    #[test]
    fn custom_ceiling_moves_the_void_point() -> TestResult {
        let service = ShippingService::with_free_shipping_ceiling(kg(10));
        let subtotal = Money::from_minor(10_000, BRL);

        assert_eq!(ShippingService::default().free_shipping_ceiling(), kg(5));
        assert_eq!(service.free_shipping_ceiling(), kg(10));
        assert_eq!(
            service.calculate(&Region::Sul, kg(10), &subtotal, true)?.to_minor_units(),
            0
        );
        assert_eq!(
            service.calculate(&Region::Sul, kg(11), &subtotal, true)?.to_minor_units(),
            3_500
        );

        Ok(())
    }

    #[test]
    fn subtotal_does_not_change_cost() -> TestResult {
        let service = ShippingService::default();

        let small = service.calculate(&Region::Sul, kg(3), &Money::from_minor(100, BRL), false)?;
        let large =
            service.calculate(&Region::Sul, kg(3), &Money::from_minor(1_000_000, BRL), false)?;

        assert_eq!(small, large);

        Ok(())
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert_eq!(
            cost("SUL", kg(-5), false),
            Err(ShippingError::NegativeWeight(kg(-5)))
        );
    }

    #[test]
    fn region_labels() {
        assert_eq!(Region::from("NORDESTE".to_string()), Region::Nordeste);
        assert_eq!(
            Region::from("CENTRO-OESTE".to_string()),
            Region::Other("CENTRO-OESTE".to_string())
        );
        assert_eq!(Region::Other("CENTRO-OESTE".to_string()).label(), "CENTRO-OESTE");
    }
}

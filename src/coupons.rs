//! Coupons
//!
//! Coupons are a fixed, case-sensitive table of codes. A coupon that is unknown, expired or
//! below its minimum subtotal is not an error at checkout: it simply grants nothing.

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

/// Why a coupon code did not apply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponRejection {
    /// No coupon code was given.
    #[error("no coupon code")]
    Missing,

    /// The code is not in the coupon table.
    #[error("unknown coupon code: {0}")]
    Unknown(String),

    /// The coupon expired before the evaluation date.
    #[error("coupon {code} expired on {expires_on}")]
    Expired {
        /// Coupon code
        code: &'static str,
        /// Last valid day
        expires_on: Date,
    },

    /// The order subtotal is below the coupon minimum (minor units).
    #[error("coupon {code} needs a subtotal of at least {minimum_minor} minor units")]
    BelowMinimum {
        /// Coupon code
        code: &'static str,
        /// Minimum subtotal in minor units
        minimum_minor: i64,
    },
}

/// One row of the coupon table.
#[derive(Debug)]
struct CouponDefinition {
    code: &'static str,
    discount_points: i64,
    free_shipping: bool,
    minimum_subtotal_minor: Option<i64>,
    honours_expiry: bool,
}

const COUPONS: &[CouponDefinition] = &[
    CouponDefinition {
        code: "DESC10",
        discount_points: 10,
        free_shipping: false,
        minimum_subtotal_minor: None,
        honours_expiry: false,
    },
    CouponDefinition {
        code: "DESC20",
        discount_points: 20,
        free_shipping: false,
        minimum_subtotal_minor: Some(10_000),
        honours_expiry: true,
    },
    CouponDefinition {
        code: "FRETEGRATIS",
        discount_points: 0,
        free_shipping: true,
        minimum_subtotal_minor: None,
        honours_expiry: true,
    },
];

/// What a coupon grants for one order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CouponResult {
    discount: Percentage,
    free_shipping: bool,
}

impl CouponResult {
    /// The result of not applying any coupon.
    pub fn none() -> Self {
        Self {
            discount: Percentage::from(Decimal::ZERO),
            free_shipping: false,
        }
    }

    /// Percentage discount granted by the coupon.
    pub fn discount(&self) -> Percentage {
        self.discount
    }

    /// Whether the coupon grants free shipping.
    pub fn free_shipping(&self) -> bool {
        self.free_shipping
    }
}

impl CouponDefinition {
    fn result(&self) -> CouponResult {
        CouponResult {
            discount: Percentage::from(Decimal::new(self.discount_points, 2)),
            free_shipping: self.free_shipping,
        }
    }
}

/// Evaluates coupon codes against an order.
#[derive(Debug, Copy, Clone, Default)]
pub struct CouponService;

impl CouponService {
    /// Check a coupon code against an order.
    ///
    /// A coupon is still valid on its `expires_on` date. `DESC10` ignores expiry.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponRejection`] describing why the coupon does not apply.
    pub fn validate(
        &self,
        code: Option<&str>,
        today: Date,
        expires_on: Option<Date>,
        subtotal: &Money<'_, Currency>,
    ) -> Result<CouponResult, CouponRejection> {
        let code = code
            .filter(|code| !code.is_empty())
            .ok_or(CouponRejection::Missing)?;

        let definition = COUPONS
            .iter()
            .find(|definition| definition.code == code)
            .ok_or_else(|| CouponRejection::Unknown(code.to_string()))?;

        if let Some(expires_on) =
            expires_on.filter(|expires_on| definition.honours_expiry && today > *expires_on)
        {
            return Err(CouponRejection::Expired {
                code: definition.code,
                expires_on,
            });
        }

        if let Some(minimum_minor) = definition
            .minimum_subtotal_minor
            .filter(|minimum_minor| subtotal.to_minor_units() < *minimum_minor)
        {
            return Err(CouponRejection::BelowMinimum {
                code: definition.code,
                minimum_minor,
            });
        }

        Ok(definition.result())
    }

    /// Evaluate a coupon code, falling back to [`CouponResult::none`] when it does not apply.
    pub fn evaluate(
        &self,
        code: Option<&str>,
        today: Date,
        expires_on: Option<Date>,
        subtotal: &Money<'_, Currency>,
    ) -> CouponResult {
        match self.validate(code, today, expires_on, subtotal) {
            Ok(result) => result,
            Err(CouponRejection::Missing) => CouponResult::none(),
            Err(rejection) => {
                debug!(%rejection, "coupon ignored");

                CouponResult::none()
            }
        }
    }
}

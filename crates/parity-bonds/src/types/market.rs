//! Market inputs shared by a batch of bonds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DEFAULT_PAYMENTS_PER_YEAR;
use crate::error::{BondError, BondResult};

/// Market rates applied to every bond in one analysis run.
///
/// Rates are annualized decimals (0.06 for 6%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Expected inflation, used for linker real yields.
    #[serde(default)]
    pub inflation: Decimal,

    /// Base rate, used for floater coupons.
    #[serde(default)]
    pub base_rate: Decimal,

    /// Coupon payments per year for bonds without their own override.
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
}

fn default_payments_per_year() -> u32 {
    DEFAULT_PAYMENTS_PER_YEAR
}

impl Default for MarketContext {
    fn default() -> Self {
        Self {
            inflation: Decimal::ZERO,
            base_rate: Decimal::ZERO,
            payments_per_year: DEFAULT_PAYMENTS_PER_YEAR,
        }
    }
}

impl MarketContext {
    /// Creates a market context with annual payments.
    #[must_use]
    pub fn new(inflation: Decimal, base_rate: Decimal) -> Self {
        Self {
            inflation,
            base_rate,
            ..Self::default()
        }
    }

    /// Sets the default payment frequency.
    #[must_use]
    pub fn with_payments_per_year(mut self, payments_per_year: u32) -> Self {
        self.payments_per_year = payments_per_year;
        self
    }

    /// Validates the shared inputs.
    pub fn validate(&self) -> BondResult<()> {
        if self.payments_per_year == 0 {
            return Err(BondError::invalid_input(
                "market payments per year must be positive",
            ));
        }
        Ok(())
    }
}

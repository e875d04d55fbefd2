//! Bond specification.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

/// The closed set of bond types the analyzer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondKind {
    /// Fixed coupon bond.
    #[serde(alias = "Fixed")]
    Fixed,
    /// Inflation-linked bond, valued on its nominal cash flows.
    #[serde(alias = "Linker")]
    Linker,
    /// Floating rate note paying base rate plus spread.
    #[serde(alias = "Floater")]
    Floater,
}

impl BondKind {
    /// All bond kinds, in display order.
    pub const ALL: [BondKind; 3] = [BondKind::Fixed, BondKind::Linker, BondKind::Floater];

    /// Returns true if this kind is valued by solving for yield.
    #[must_use]
    pub fn has_yield(&self) -> bool {
        matches!(self, BondKind::Fixed | BondKind::Linker)
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BondKind::Fixed => "Fixed",
            BondKind::Linker => "Linker",
            BondKind::Floater => "Floater",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BondKind {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(BondKind::Fixed),
            "linker" | "inflation" => Ok(BondKind::Linker),
            "floater" | "frn" => Ok(BondKind::Floater),
            other => {
                let expected = BondKind::ALL
                    .iter()
                    .map(|kind| kind.to_string().to_lowercase())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(BondError::invalid_input(format!(
                    "unknown bond type '{other}', expected one of {expected}"
                )))
            }
        }
    }
}

/// Immutable description of one bond to analyze.
///
/// `coupon` is the cash amount paid each period. Fields a kind does not use
/// (price, coupon and years for a floater, spread for fixed and linker
/// bonds) are ignored rather than rejected.
///
/// # Example
///
/// ```rust
/// use parity_bonds::types::{BondKind, BondSpec};
/// use rust_decimal_macros::dec;
///
/// let bond = BondSpec::fixed("A", dec!(900), dec!(35), 3).with_face_value(dec!(1000));
/// assert_eq!(bond.kind, BondKind::Fixed);
/// assert!(bond.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    /// Identifier.
    pub name: String,

    /// Bond type.
    #[serde(rename = "type")]
    pub kind: BondKind,

    /// Current market price.
    #[serde(default)]
    pub price: Decimal,

    /// Coupon cash amount per period.
    #[serde(default)]
    pub coupon: Decimal,

    /// Whole years remaining to maturity.
    #[serde(default)]
    pub years: u32,

    /// Spread over the base rate (floaters only).
    #[serde(default)]
    pub spread: Decimal,

    /// Face value; the configured default applies when absent.
    #[serde(default, alias = "nominal", skip_serializing_if = "Option::is_none")]
    pub face_value: Option<Decimal>,

    /// Coupon payments per year; the market context applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments_per_year: Option<u32>,
}

impl BondSpec {
    fn new(name: impl Into<String>, kind: BondKind) -> Self {
        Self {
            name: name.into(),
            kind,
            price: Decimal::ZERO,
            coupon: Decimal::ZERO,
            years: 0,
            spread: Decimal::ZERO,
            face_value: None,
            payments_per_year: None,
        }
    }

    /// Creates a fixed coupon bond.
    #[must_use]
    pub fn fixed(name: impl Into<String>, price: Decimal, coupon: Decimal, years: u32) -> Self {
        Self {
            price,
            coupon,
            years,
            ..Self::new(name, BondKind::Fixed)
        }
    }

    /// Creates an inflation-linked bond.
    #[must_use]
    pub fn linker(name: impl Into<String>, price: Decimal, coupon: Decimal, years: u32) -> Self {
        Self {
            price,
            coupon,
            years,
            ..Self::new(name, BondKind::Linker)
        }
    }

    /// Creates a floating rate note paying `spread` over the base rate.
    #[must_use]
    pub fn floater(name: impl Into<String>, spread: Decimal) -> Self {
        Self {
            spread,
            ..Self::new(name, BondKind::Floater)
        }
    }

    /// Sets the price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Sets the years to maturity.
    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    /// Sets an explicit face value.
    pub fn with_face_value(mut self, face_value: Decimal) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Overrides the market's payment frequency for this bond.
    pub fn with_payments_per_year(mut self, payments_per_year: u32) -> Self {
        self.payments_per_year = Some(payments_per_year);
        self
    }

    /// Face value, falling back to `default`.
    #[must_use]
    pub fn face_value_or(&self, default: Decimal) -> Decimal {
        self.face_value.unwrap_or(default)
    }

    /// Payment frequency, falling back to `default`.
    #[must_use]
    pub fn payments_per_year_or(&self, default: u32) -> u32 {
        self.payments_per_year.unwrap_or(default)
    }

    /// Validates the fields this bond's kind uses.
    pub fn validate(&self) -> BondResult<()> {
        if self.name.trim().is_empty() {
            return Err(BondError::invalid_input("bond name must not be empty"));
        }
        if self.payments_per_year == Some(0) {
            return Err(BondError::invalid_input(format!(
                "{}: payments per year must be positive",
                self.name
            )));
        }

        match self.kind {
            BondKind::Fixed | BondKind::Linker => {
                if self.price <= Decimal::ZERO {
                    return Err(BondError::invalid_input(format!(
                        "{}: price must be positive, got {}",
                        self.name, self.price
                    )));
                }
                if self.coupon < Decimal::ZERO {
                    return Err(BondError::invalid_input(format!(
                        "{}: coupon must not be negative, got {}",
                        self.name, self.coupon
                    )));
                }
                if self.years == 0 {
                    return Err(BondError::invalid_input(format!(
                        "{}: years to maturity must be positive",
                        self.name
                    )));
                }
                if let Some(face) = self.face_value {
                    if face <= Decimal::ZERO {
                        return Err(BondError::invalid_input(format!(
                            "{}: face value must be positive, got {face}",
                            self.name
                        )));
                    }
                }
                Ok(())
            }
            BondKind::Floater => Ok(()),
        }
    }
}

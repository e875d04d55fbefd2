//! Bond book loading.
//!
//! A book is a market section plus a list of bonds, in TOML or JSON:
//!
//! ```toml
//! [market]
//! inflation = 0.06
//! base_rate = 0.15
//!
//! [[bonds]]
//! name = "OFZ-26238"
//! type = "fixed"
//! price = 900
//! coupon = 35
//! years = 3
//! ```
//!
//! JSON files may also hold a bare array of bonds.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use parity_bonds::types::{BondSpec, MarketContext};
use parity_config::ConfigFormat;

use crate::error::{CliError, CliResult};

/// Bonds and the market they are analyzed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondBook {
    /// Market inputs; configuration defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<BookMarket>,

    /// Bonds in report order.
    #[serde(default)]
    pub bonds: Vec<BondSpec>,
}

/// The `[market]` section of a book.
///
/// A missing frequency is left unset so the configured default can apply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookMarket {
    /// Annual inflation rate as a decimal.
    #[serde(default)]
    pub inflation: Decimal,

    /// Central-bank base rate as a decimal.
    #[serde(default)]
    pub base_rate: Decimal,

    /// Coupon payments per year for bonds without their own frequency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments_per_year: Option<u32>,
}

impl BookMarket {
    /// Builds the market context, falling back to `default_payments_per_year`.
    pub fn to_context(&self, default_payments_per_year: u32) -> MarketContext {
        MarketContext::new(self.inflation, self.base_rate)
            .with_payments_per_year(self.payments_per_year.unwrap_or(default_payments_per_year))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BookFile {
    Book(BondBook),
    Bonds(Vec<BondSpec>),
}

impl From<BookFile> for BondBook {
    fn from(file: BookFile) -> Self {
        match file {
            BookFile::Book(book) => book,
            BookFile::Bonds(bonds) => Self { market: None, bonds },
        }
    }
}

impl BondBook {
    /// Loads a book, picking the format from the file extension.
    pub fn load(path: &Path) -> CliResult<Self> {
        let book_error = |message: String| CliError::Book {
            path: path.to_path_buf(),
            message,
        };

        let format = ConfigFormat::from_path(path).map_err(|e| book_error(e.to_string()))?;
        let content = std::fs::read_to_string(path).map_err(|e| book_error(e.to_string()))?;

        let file: BookFile = match format {
            ConfigFormat::Toml => {
                toml::from_str(&content).map_err(|e| book_error(e.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| book_error(e.to_string()))?
            }
        };

        let book = BondBook::from(file);
        tracing::debug!("loaded {} bonds from {}", book.bonds.len(), path.display());
        Ok(book)
    }

    /// Three Russian federal loan bonds: fixed, inflation-linked and floating.
    pub fn demo() -> Self {
        Self {
            market: Some(BookMarket {
                inflation: dec!(0.06),
                base_rate: dec!(0.15),
                payments_per_year: None,
            }),
            bonds: vec![
                BondSpec::fixed("OFZ-26238", dec!(900), dec!(35), 3),
                BondSpec::linker("OFZ-IN 52002", dec!(950), dec!(25), 4),
                BondSpec::floater("OFZ-PK 29015", dec!(0.005)),
            ],
        }
    }
}

//! Input records for bond analysis.

mod bond;
mod market;

pub use bond::{BondKind, BondSpec};
pub use market::MarketContext;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Face value applied to bonds that do not state one.
pub const DEFAULT_FACE_VALUE: Decimal = dec!(1000);

/// Coupon payments per year when neither the bond nor the market says otherwise.
pub const DEFAULT_PAYMENTS_PER_YEAR: u32 = 1;

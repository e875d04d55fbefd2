//! # Parity Bonds
//!
//! Bond definitions, cash-flow generation and yield-to-maturity solving.
//!
//! This crate provides:
//!
//! - **Types**: [`BondSpec`] and [`MarketContext`] input records, the closed
//!   [`BondKind`] set (fixed, linker, floater)
//! - **Cash Flows**: Uniform per-period coupon schedules with principal at
//!   maturity
//! - **Pricing**: Present value, current yield and a bracket-validated
//!   yield solver with configurable annualization
//!
//! ## Example
//!
//! ```rust
//! use parity_bonds::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! // 35 coupon per year, 3 years to maturity, 1000 face value
//! let schedule = compute_cash_flows(dec!(35), dec!(1000), 3, 1).unwrap();
//! let result = solve_yield(&schedule, dec!(900)).unwrap();
//!
//! assert!(result.yield_value > 0.035);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod cashflows;
pub mod error;
pub mod pricing;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    // Cash flows
    pub use crate::cashflows::{compute_cash_flows, CashFlow, CashFlowSchedule, CashFlowType};

    // Errors
    pub use crate::error::{BondError, BondResult};

    // Pricing
    pub use crate::pricing::{
        current_yield, present_value, solve_yield, Annualization, SolverMethod, YieldBracket,
        YieldResult, YieldSolver,
    };

    // Types
    pub use crate::types::{BondKind, BondSpec, MarketContext, DEFAULT_FACE_VALUE};
}

pub use cashflows::{compute_cash_flows, CashFlow, CashFlowSchedule};
pub use error::{BondError, BondResult};
pub use pricing::{solve_yield, YieldResult, YieldSolver};
pub use types::{BondKind, BondSpec, MarketContext};

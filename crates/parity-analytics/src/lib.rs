//! # Parity Analytics
//!
//! Turns bond definitions and market inputs into report records.
//!
//! Each bond goes down exactly one path, chosen by its [`BondKind`]:
//!
//! | Kind | Fields |
//! |------|--------|
//! | Fixed | `current_yield`, `ytm` |
//! | Linker | `ytm`, `real_yield` |
//! | Floater | `coupon` |
//!
//! Failures stay local to the bond that caused them. The record keeps a
//! [`AnalysisFailure`] describing what went wrong and the affected fields
//! are left empty, so a batch always yields one record per input bond.
//!
//! ## Usage
//!
//! ```rust
//! use parity_analytics::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bonds = vec![
//!     BondSpec::fixed("A", dec!(900), dec!(35), 3),
//!     BondSpec::linker("B", dec!(950), dec!(25), 4),
//!     BondSpec::floater("C", dec!(0.005)),
//! ];
//! let market = MarketContext::new(dec!(0.06), dec!(0.15));
//!
//! let report = analyze_bonds(&bonds, &market);
//!
//! assert_eq!(report.len(), 3);
//! assert_eq!(report[2].coupon, Some(dec!(0.155)));
//! assert!(report[2].ytm.is_none());
//! ```
//!
//! [`BondKind`]: parity_bonds::BondKind

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analyzer;
pub mod error;
pub mod parallel;
pub mod report;

pub use analyzer::{analyze_bonds, BondAnalyzer};
pub use error::{AnalyticsError, AnalyticsResult};
pub use report::{AnalysisFailure, FailureKind, Metric, MetricStatus, ReportRecord, ReportSummary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analyzer::{analyze_bonds, BondAnalyzer};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::report::{
        AnalysisFailure, FailureKind, Metric, MetricStatus, ReportRecord, ReportSummary,
    };

    pub use parity_bonds::types::{BondKind, BondSpec, MarketContext};
    pub use parity_config::AnalysisConfig;
}

//! Error types for the analytics layer.
//!
//! Per-bond problems never surface here; they are recorded on the bond's
//! [`ReportRecord`](crate::ReportRecord). These errors cover setting up an
//! analyzer.

use thiserror::Error;

use parity_bonds::BondError;
use parity_config::ConfigError;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised while constructing an analyzer.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The analysis configuration is invalid.
    #[error("invalid analysis configuration: {0}")]
    Config(#[from] ConfigError),

    /// The market context is invalid.
    #[error("invalid market context: {0}")]
    Market(#[from] BondError),
}

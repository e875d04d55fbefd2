//! Parity Configuration Layer
//!
//! Explicit, documented defaults for bond analysis runs, loadable from TOML
//! or JSON and validated before use.
//!
//! # Defaults
//!
//! | Setting | Default |
//! |---------|---------|
//! | `default_face_value` | 1000 |
//! | `default_payments_per_year` | 1 |
//! | `annualization` | `effective_annual` |
//! | `parallel` / `parallel_threshold` | `true` / 64 bonds |
//! | `solver.method` | `newton_bisection` |
//! | `solver.tolerance` | 1e-10 |
//! | `solver.max_iterations` | 100 |
//! | `solver.low_rate` / `solver.high_rate` | -0.99 / 10.0 |
//!
//! # Example
//!
//! ```rust
//! use parity_config::{AnalysisConfig, Validate};
//!
//! let config = AnalysisConfig::from_toml_str(
//!     r#"
//!     default_face_value = 100
//!     annualization = "nominal"
//!
//!     [solver]
//!     max_iterations = 200
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.solver.max_iterations, 200);
//! assert_eq!(config.default_payments_per_year, 1);
//! ```

#![warn(missing_docs)]

pub mod analysis;
pub mod error;

pub use analysis::{AnalysisConfig, ConfigFormat, SolverSettings};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

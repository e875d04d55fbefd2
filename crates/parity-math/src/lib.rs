//! # Parity Math
//!
//! Numerical building blocks for the Parity bond yield analytics workspace.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root finders (bisection and a safeguarded
//!   Newton-bisection hybrid) with explicit iteration caps
//!
//! Every solver validates its bracket before iterating and reports a
//! [`MathError::ConvergenceFailed`] instead of a best guess when the
//! iteration budget runs out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, newton_bisection, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};

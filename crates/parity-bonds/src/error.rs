//! Error types for bond operations.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while building cash flows or solving for yield.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Malformed bond parameters (non-positive years, frequency, price or
    /// face value, negative coupon, empty name).
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of what's invalid.
        reason: String,
    },

    /// The price cannot be reached by any rate inside the solver bracket.
    #[error(
        "No bracket: price {price} outside [{pv_at_high:.6}, {pv_at_low:.6}] spanned by rates [{low_rate}, {high_rate}]"
    )]
    NoBracket {
        /// The target price.
        price: f64,
        /// Lower per-period rate of the bracket.
        low_rate: f64,
        /// Upper per-period rate of the bracket.
        high_rate: f64,
        /// Present value at the lower rate (the largest attainable price).
        pv_at_low: f64,
        /// Present value at the upper rate (the smallest attainable price).
        pv_at_high: f64,
    },

    /// The solver exhausted its iteration budget.
    #[error("Yield solver did not converge after {iterations} iterations (residual: {residual:.2e})")]
    DidNotConverge {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual.
        residual: f64,
    },
}

impl BondError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true for input validation failures.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns true when the price was not attainable inside the bracket.
    #[must_use]
    pub fn is_no_bracket(&self) -> bool {
        matches!(self, Self::NoBracket { .. })
    }

    /// Returns true when the solver ran out of iterations.
    #[must_use]
    pub fn is_did_not_converge(&self) -> bool {
        matches!(self, Self::DidNotConverge { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let err = BondError::invalid_input("years must be positive");
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("years must be positive"));

        let err = BondError::DidNotConverge {
            iterations: 7,
            residual: 0.5,
        };
        assert!(err.is_did_not_converge());
        assert!(!err.is_no_bracket());
    }
}

//! Root-finding algorithms.
//!
//! Both solvers here are bracketing methods: they require an interval
//! `[a, b]` over which the function changes sign, and they never leave it.
//!
//! - [`bisection`]: Halves the bracket every iteration. Slow but certain.
//! - [`newton_bisection`]: Takes a Newton step whenever it lands inside the
//!   current bracket and bisects otherwise. Quadratic near the root while
//!   keeping the bisection guarantee.
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Newton-bisection | Fast (quadratic) | Guaranteed | Bracket + derivative |
//!
//! Endpoint values may be infinite (a present value discounted at a rate
//! close to -100% overflows for long schedules); only the sign is used when
//! checking the bracket.
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use parity_math::solvers::{newton_bisection, SolverConfig};
//!
//! // Bond: 5% coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= f64::from(t) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv -= 5.0 * 100.0 / (1.0 + y).powi(6);
//!     dpv
//! };
//!
//! let result = newton_bisection(price_fn, d_price_fn, 0.0, 0.20, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05); // YTM > coupon rate for discount bond
//! ```

mod bisection;
mod hybrid;

pub use bisection::bisection;
pub use hybrid::newton_bisection;

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence, applied to both the residual and the
    /// bracket half-width.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the configuration can terminate.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Returns true when `fa` and `fb` do not share a strict sign.
///
/// NaN never brackets anything.
pub(crate) fn straddles_zero(fa: f64, fb: f64) -> bool {
    (fa <= 0.0 && fb >= 0.0) || (fa >= 0.0 && fb <= 0.0)
}

/// Orders the bracket, evaluates both ends and rejects intervals without a
/// sign change.
pub(crate) fn checked_bracket<F>(f: &F, a: f64, b: f64) -> MathResult<((f64, f64), (f64, f64))>
where
    F: Fn(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite()) || a == b {
        return Err(MathError::invalid_input(format!(
            "bracket endpoints must be finite and distinct, got [{a}, {b}]"
        )));
    }
    let lo = a.min(b);
    let hi = a.max(b);
    let f_lo = f(lo);
    let f_hi = f(hi);

    if !straddles_zero(f_lo, f_hi) {
        return Err(MathError::invalid_bracket(lo, hi, f_lo, f_hi));
    }
    Ok(((lo, f_lo), (hi, f_hi)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(SolverConfig::new(0.0, 10).validate().is_err());
        assert!(SolverConfig::new(f64::NAN, 10).validate().is_err());
        assert!(SolverConfig::new(1e-8, 0).validate().is_err());
    }

    #[test]
    fn test_straddles_zero() {
        assert!(straddles_zero(-1.0, 1.0));
        assert!(straddles_zero(f64::INFINITY, -3.0));
        assert!(straddles_zero(0.0, 5.0));
        assert!(!straddles_zero(1.0, 2.0));
        assert!(!straddles_zero(f64::NAN, -1.0));
    }

    /// Price of an annual-pay bond at a per-period rate.
    fn bond_price(rate: f64, coupon: f64, face: f64, periods: i32) -> f64 {
        let mut pv = 0.0;
        for t in 1..=periods {
            pv += coupon / (1.0 + rate).powi(t);
        }
        pv + face / (1.0 + rate).powi(periods)
    }

    fn bond_price_derivative(rate: f64, coupon: f64, face: f64, periods: i32) -> f64 {
        let mut dpv = 0.0;
        for t in 1..=periods {
            dpv -= f64::from(t) * coupon / (1.0 + rate).powi(t + 1);
        }
        dpv - f64::from(periods) * face / (1.0 + rate).powi(periods + 1)
    }

    #[test]
    fn test_ytm_par_bond() {
        let f = |y: f64| bond_price(y, 50.0, 1000.0, 10) - 1000.0;
        let df = |y: f64| bond_price_derivative(y, 50.0, 1000.0, 10);

        let result = newton_bisection(f, df, -0.5, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_ytm_solvers_agree() {
        let f = |y: f64| bond_price(y, 35.0, 1000.0, 3) - 900.0;
        let df = |y: f64| bond_price_derivative(y, 35.0, 1000.0, 3);
        let config = SolverConfig::default();

        let bisected = bisection(f, -0.99, 10.0, &config).unwrap();
        let hybrid = newton_bisection(f, df, -0.99, 10.0, &config).unwrap();

        assert_relative_eq!(bisected.root, hybrid.root, epsilon = 1e-8);
        assert!(hybrid.iterations <= bisected.iterations);
    }

    #[test]
    fn test_wide_bracket_with_overflowing_endpoint() {
        // 100^400 overflows to infinity at the lower end of the bracket
        let f = |y: f64| bond_price(y, 10.0, 100.0, 400) - 120.0;
        let df = |y: f64| bond_price_derivative(y, 10.0, 100.0, 400);

        let result = newton_bisection(f, df, -0.99, 10.0, &SolverConfig::default()).unwrap();

        assert!(f(result.root).abs() < 1e-6);
    }
}

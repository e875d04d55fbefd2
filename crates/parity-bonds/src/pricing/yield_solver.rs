//! Yield-to-maturity solver.
//!
//! Finds the per-period rate `r` with
//!
//! ```text
//! price = sum_{t=1}^{N} CF_t / (1 + r)^t
//! ```
//!
//! Present value is continuous and strictly decreasing for `r > -1`, so a
//! bracket `[r_low, r_high]` with `PV(r_low) >= price >= PV(r_high)` holds
//! exactly one root. The bracket is checked before any iteration; prices
//! outside it fail with [`BondError::NoBracket`] rather than producing a
//! spurious rate.
//!
//! # Example
//!
//! ```rust
//! use parity_bonds::cashflows::compute_cash_flows;
//! use parity_bonds::pricing::{Annualization, YieldSolver};
//! use rust_decimal_macros::dec;
//!
//! let schedule = compute_cash_flows(dec!(5), dec!(100), 5, 2).unwrap();
//! let solver = YieldSolver::new().with_annualization(Annualization::Nominal);
//!
//! // A par bond yields its coupon rate on a nominal basis
//! let result = solver.solve(&schedule, dec!(100)).unwrap();
//! assert!((result.yield_value - 0.05).abs() < 1e-9);
//! ```

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use parity_math::solvers::{bisection, newton_bisection, SolverConfig, SolverResult};
use parity_math::MathError;

use crate::cashflows::CashFlowSchedule;
use crate::error::{BondError, BondResult};

/// Default lower per-period rate of the search bracket.
pub const DEFAULT_LOW_RATE: f64 = -0.99;

/// Default upper per-period rate of the search bracket.
pub const DEFAULT_HIGH_RATE: f64 = 10.0;

/// Convention for turning the per-period rate into an annual yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annualization {
    /// Effective annual rate: `(1 + r)^m - 1`.
    #[default]
    EffectiveAnnual,
    /// Nominal rate compounded `m` times a year: `r * m`.
    Nominal,
}

impl Annualization {
    /// Converts a per-period rate to an annual yield.
    #[must_use]
    pub fn annualize(&self, periodic_rate: f64, payments_per_year: u32) -> f64 {
        match self {
            Annualization::EffectiveAnnual => {
                (1.0 + periodic_rate).powi(payments_per_year as i32) - 1.0
            }
            Annualization::Nominal => periodic_rate * f64::from(payments_per_year),
        }
    }
}

impl fmt::Display for Annualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Annualization::EffectiveAnnual => "Effective Annual",
            Annualization::Nominal => "Nominal",
        };
        write!(f, "{name}")
    }
}

/// Root-finding algorithm used by the yield solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
    /// Plain bisection.
    Bisection,
    /// Newton steps safeguarded by bisection.
    #[default]
    NewtonBisection,
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverMethod::Bisection => "Bisection",
            SolverMethod::NewtonBisection => "Newton-Bisection",
        };
        write!(f, "{name}")
    }
}

/// Per-period rate interval searched for the yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldBracket {
    /// Lowest per-period rate; must be greater than -1.
    pub low: f64,
    /// Highest per-period rate.
    pub high: f64,
}

impl Default for YieldBracket {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_RATE,
            high: DEFAULT_HIGH_RATE,
        }
    }
}

impl YieldBracket {
    /// Creates a bracket.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Checks that the bracket is usable for discounting.
    pub fn validate(&self) -> BondResult<()> {
        if !(self.low.is_finite() && self.high.is_finite()) {
            return Err(BondError::invalid_input(format!(
                "yield bracket must be finite, got [{}, {}]",
                self.low, self.high
            )));
        }
        if self.low <= -1.0 {
            return Err(BondError::invalid_input(format!(
                "yield bracket lower bound must exceed -1, got {}",
                self.low
            )));
        }
        if self.high <= self.low {
            return Err(BondError::invalid_input(format!(
                "yield bracket is empty: [{}, {}]",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    /// Annualized yield (as a decimal, e.g., 0.05 for 5%).
    pub yield_value: f64,
    /// Solved per-period rate.
    pub periodic_rate: f64,
    /// Payments per year used for annualization.
    pub payments_per_year: u32,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Final relative residual `PV / price - 1`.
    pub residual: f64,
}

/// Yield-to-maturity solver.
///
/// Defaults: Newton-bisection, tolerance 1e-10, 100 iterations, bracket
/// `[-0.99, 10.0]`, effective annual yields.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldSolver {
    config: SolverConfig,
    method: SolverMethod,
    bracket: YieldBracket,
    annualization: Annualization,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldSolver {
    /// Creates a new yield solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            method: SolverMethod::default(),
            bracket: YieldBracket::default(),
            annualization: Annualization::default(),
        }
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: SolverMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Sets the per-period rate bracket.
    #[must_use]
    pub fn with_bracket(mut self, bracket: YieldBracket) -> Self {
        self.bracket = bracket;
        self
    }

    /// Sets the annualization convention.
    #[must_use]
    pub fn with_annualization(mut self, annualization: Annualization) -> Self {
        self.annualization = annualization;
        self
    }

    /// Root-finder configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Root-finding method.
    #[must_use]
    pub fn method(&self) -> SolverMethod {
        self.method
    }

    /// Search bracket.
    #[must_use]
    pub fn bracket(&self) -> YieldBracket {
        self.bracket
    }

    /// Annualization convention.
    #[must_use]
    pub fn annualization(&self) -> Annualization {
        self.annualization
    }

    /// Solves for the yield that prices `schedule` at `price`.
    ///
    /// # Errors
    ///
    /// - [`BondError::InvalidInput`] for an empty schedule or a bad solver
    ///   configuration
    /// - [`BondError::NoBracket`] when `price` is non-positive or outside the
    ///   range of present values spanned by the bracket
    /// - [`BondError::DidNotConverge`] when the iteration cap is reached
    pub fn solve(&self, schedule: &CashFlowSchedule, price: Decimal) -> BondResult<YieldResult> {
        self.bracket.validate()?;
        self.config
            .validate()
            .map_err(|e| BondError::invalid_input(e.to_string()))?;

        let flows = to_f64_flows(schedule)?;
        let target = price
            .to_f64()
            .ok_or_else(|| BondError::invalid_input(format!("price {price} is not representable")))?;

        let pv_at_low = discount(&flows, self.bracket.low);
        let pv_at_high = discount(&flows, self.bracket.high);

        if pv_at_low.is_nan() || pv_at_high.is_nan() {
            log::error!(
                "present value undefined at bracket [{}, {}] (pv {pv_at_low}, {pv_at_high})",
                self.bracket.low,
                self.bracket.high
            );
            return Err(BondError::DidNotConverge {
                iterations: 0,
                residual: f64::NAN,
            });
        }

        if !(target.is_finite() && target > 0.0 && pv_at_low >= target && target >= pv_at_high) {
            log::warn!(
                "price {target} not attainable in rate bracket [{}, {}] (pv range [{pv_at_high:.6}, {pv_at_low:.6}])",
                self.bracket.low,
                self.bracket.high
            );
            return Err(self.no_bracket(target, pv_at_low, pv_at_high));
        }

        // Relative residual keeps the tolerance independent of the price scale
        let objective = |r: f64| discount(&flows, r) / target - 1.0;
        let derivative = |r: f64| discount_derivative(&flows, r) / target;

        let outcome = match self.method {
            SolverMethod::Bisection => {
                bisection(objective, self.bracket.low, self.bracket.high, &self.config)
            }
            SolverMethod::NewtonBisection => newton_bisection(
                objective,
                derivative,
                self.bracket.low,
                self.bracket.high,
                &self.config,
            ),
        };

        let SolverResult {
            root,
            iterations,
            residual,
        } = outcome.map_err(|e| self.map_math_error(e, target, pv_at_low, pv_at_high))?;

        let m = schedule.payments_per_year();
        let yield_value = self.annualization.annualize(root, m);
        log::debug!(
            "{} solved periodic rate {root:.10} ({} yield {yield_value:.10}) in {iterations} iterations",
            self.method,
            self.annualization
        );

        Ok(YieldResult {
            yield_value,
            periodic_rate: root,
            payments_per_year: m,
            iterations,
            residual,
        })
    }

    fn no_bracket(&self, price: f64, pv_at_low: f64, pv_at_high: f64) -> BondError {
        BondError::NoBracket {
            price,
            low_rate: self.bracket.low,
            high_rate: self.bracket.high,
            pv_at_low,
            pv_at_high,
        }
    }

    fn map_math_error(&self, err: MathError, price: f64, pv_at_low: f64, pv_at_high: f64) -> BondError {
        match err {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => {
                log::error!(
                    "{} did not converge in {iterations} iterations (residual {residual:.2e}); check solver tolerance and bracket",
                    self.method
                );
                BondError::DidNotConverge {
                    iterations,
                    residual,
                }
            }
            MathError::InvalidBracket { .. } => self.no_bracket(price, pv_at_low, pv_at_high),
            MathError::InvalidInput { reason } => BondError::InvalidInput { reason },
        }
    }
}

/// Solves for yield with the default solver.
///
/// See [`YieldSolver::solve`].
pub fn solve_yield(schedule: &CashFlowSchedule, price: Decimal) -> BondResult<YieldResult> {
    YieldSolver::default().solve(schedule, price)
}

/// Present value of `schedule` discounted at a per-period rate.
///
/// Uses the same discounting as the solver, so re-pricing at a solved
/// `periodic_rate` reproduces the target price.
pub fn present_value(schedule: &CashFlowSchedule, periodic_rate: f64) -> BondResult<f64> {
    let flows = to_f64_flows(schedule)?;
    Ok(discount(&flows, periodic_rate))
}

/// Current yield: annual coupon divided by price.
///
/// Ignores time value and the pull to par.
pub fn current_yield(annual_coupon: Decimal, price: Decimal) -> BondResult<f64> {
    if price <= Decimal::ZERO {
        return Err(BondError::invalid_input(format!(
            "price must be positive for current yield, got {price}"
        )));
    }
    (annual_coupon / price)
        .to_f64()
        .ok_or_else(|| BondError::invalid_input("current yield is not representable"))
}

fn to_f64_flows(schedule: &CashFlowSchedule) -> BondResult<Vec<(i32, f64)>> {
    if schedule.is_empty() {
        return Err(BondError::invalid_input("no cash flows to discount"));
    }
    // Zero amounts add nothing and would turn 0/0 into NaN where the
    // discount factor underflows
    schedule
        .iter()
        .filter(|cf| !cf.amount.is_zero())
        .map(|cf| {
            let period = i32::try_from(cf.period).map_err(|_| {
                BondError::invalid_input(format!("period {} is out of range", cf.period))
            })?;
            let amount = cf.amount.to_f64().ok_or_else(|| {
                BondError::invalid_input(format!("cash flow {} is not representable", cf.amount))
            })?;
            Ok((period, amount))
        })
        .collect()
}

fn discount(flows: &[(i32, f64)], rate: f64) -> f64 {
    let base = 1.0 + rate;
    flows
        .iter()
        .map(|&(period, amount)| amount / base.powi(period))
        .sum()
}

fn discount_derivative(flows: &[(i32, f64)], rate: f64) -> f64 {
    let base = 1.0 + rate;
    flows
        .iter()
        .map(|&(period, amount)| -f64::from(period) * amount / base.powi(period + 1))
        .sum()
}

//! Safeguarded Newton-bisection root finding.
//!
//! Newton's method is fast near the root but can overshoot badly on convex
//! functions such as bond prices, and from the flat side of a steep curve it
//! can crawl. A sign-change bracket catches the first case; requiring each
//! Newton step to halve the one before last catches the second. Either way
//! the iteration falls back to bisection.

use crate::error::{MathError, MathResult};
use crate::solvers::{checked_bracket, SolverConfig, SolverResult};

/// Hybrid Newton-bisection root finder.
///
/// # Strategy
///
/// 1. Validate the bracket `[a, b]` and start from its midpoint
/// 2. Shrink the bracket around each new iterate using the sign of `f`
/// 3. Take the Newton step if it is finite, strictly inside the bracket and
///    at most half the size of the step before last
/// 4. Otherwise bisect
///
/// Converges when `|f(x)|`, the Newton step, or the bracket half-width
/// drops below `config.tolerance`.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `a`, `b` - Bracket endpoints (either order)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use parity_math::solvers::{newton_bisection, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = newton_bisection(f, df, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn newton_bisection<F, DF>(
    f: F,
    df: DF,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    config.validate()?;
    let ((mut lo, f_lo), (mut hi, f_hi)) = checked_bracket(&f, a, b)?;

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    let lo_is_negative = f_lo < 0.0;
    let mut x = 0.5 * (lo + hi);
    let mut step = hi - lo;
    let mut previous_step = step;
    let mut newton_steps = 0_u32;
    let mut fx = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        fx = f(x);

        if fx.abs() < config.tolerance {
            log::trace!(
                "newton-bisection converged to {x} in {} iterations ({newton_steps} newton)",
                iteration + 1
            );
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }

        if (fx < 0.0) == lo_is_negative {
            lo = x;
        } else {
            hi = x;
        }

        if 0.5 * (hi - lo) < config.tolerance {
            let mid = 0.5 * (lo + hi);
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f(mid),
            });
        }

        let dfx = df(x);
        let candidate = if dfx != 0.0 && dfx.is_finite() {
            x - fx / dfx
        } else {
            f64::NAN
        };

        // Newton must stay inside the bracket and at least halve the step
        // taken two iterations ago; otherwise it is creeping.
        let inside = candidate.is_finite() && candidate > lo && candidate < hi;
        let contracting = (2.0 * fx).abs() <= (previous_step * dfx).abs();

        previous_step = step;
        if inside && contracting {
            newton_steps += 1;
            step = candidate - x;
            x = candidate;
            if step.abs() < config.tolerance {
                return Ok(SolverResult {
                    root: x,
                    iterations: iteration + 1,
                    residual: f(x),
                });
            }
        } else {
            let mid = 0.5 * (lo + hi);
            step = mid - x;
            x = mid;
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

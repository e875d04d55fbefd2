//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{checked_bracket, SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the interval and keeps the half over which `f`
/// changes sign. Converges when `|f(mid)|` or the bracket half-width drops
/// below `config.tolerance`.
///
/// Requires a sign change between `f(a)` and `f(b)`; the endpoints may be
/// given in either order.
///
/// # Example
///
/// ```rust
/// use parity_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
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
    let mut residual = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        residual = f_mid;

        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            log::trace!("bisection converged to {mid} in {} iterations", iteration + 1);
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if (f_mid < 0.0) == lo_is_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        residual.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_decreasing_function() {
        let f = |x: f64| 1.0 - x;

        let result = bisection(f, -3.0, 4.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-10);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_infinite_endpoint_value() {
        let f = |x: f64| 1.0 / x - 4.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default());

        // f(0) = inf still counts as a positive endpoint
        assert_relative_eq!(result.unwrap().root, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::new(1e-14, 5);

        let result = bisection(f, 1.0, 2.0, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 5, .. })
        ));
    }
}

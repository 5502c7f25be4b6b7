//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;

/// Brent's method root finder.
///
/// Combines bisection, secant and inverse quadratic interpolation. Guaranteed
/// to converge for continuous functions with a valid bracket.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver {
    config: SolverConfig,
}

impl BrentSolver {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root estimate
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, mut f: F, a: f64, b: f64) -> Result<f64, SolverError>
    where
        F: FnMut(f64) -> f64,
    {
        self.try_find_root(|x| Ok::<f64, SolverError>(f(x)), a, b)
    }

    /// Find a root of a fallible objective in the bracket [a, b].
    ///
    /// The first error returned by `f` aborts the search and is passed
    /// through unchanged; solver failures are converted with `E::from`.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::BrentSolver;
    /// use pricer_core::types::SolverError;
    ///
    /// let solver = BrentSolver::with_defaults();
    /// let root = solver
    ///     .try_find_root(|x| Ok::<_, SolverError>(x.exp() - 2.0), 0.0, 1.0)
    ///     .unwrap();
    /// assert!((root - 2.0_f64.ln()).abs() < 1e-10);
    /// ```
    pub fn try_find_root<F, E>(&self, mut f: F, a: f64, b: f64) -> Result<f64, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<SolverError>,
    {
        let tolerance = self.config.tolerance;
        let mut a = a;
        let mut b = b;
        let mut fa = f(a)?;
        let mut fb = f(b)?;

        if !fa.is_finite() || !fb.is_finite() {
            return Err(SolverError::NumericalInstability(format!(
                "objective not finite at bracket ends: f({}) = {}, f({}) = {}",
                a, fa, b, fb
            ))
            .into());
        }
        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket { a, b }.into());
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        for _iteration in 0..self.config.max_iterations {
            // Keep the root between b and c
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b is always the best estimate
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tolerance;
            let xm = 0.5 * (c - b);
            if xm.abs() <= tol1 || fb.abs() < tolerance {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant step
                    (2.0 * xm * s, 1.0 - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();
                let min1 = 3.0 * xm * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if 2.0 * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol1 {
                d
            } else {
                tol1.copysign(xm)
            };
            fb = f(b)?;
            if !fb.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "objective not finite at x = {}",
                    b
                ))
                .into());
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        }
        .into())
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ========================================
    // Basic Functionality Tests
    // ========================================

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x| x * x - 2.0, 0.0, 2.0).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_find_sin_root() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(f64::sin, 3.0, 4.0).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_bracket_reversed() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x * x - 2.0, 2.0, 0.0).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_root_at_bracket_endpoint() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x - 1.0, 0.0, 1.0).unwrap();
        assert_eq!(root, 1.0);
    }

    #[test]
    fn test_flat_then_steep_function() {
        // x - cos(x) converges slowly with plain secant steps
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x - x.cos(), 0.0, 1.0).unwrap();
        assert_abs_diff_eq!(root - root.cos(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_root_near_bracket_edge_of_correlation_range() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x - 0.95, -0.999, 0.999).unwrap();
        assert_abs_diff_eq!(root, 0.95, epsilon = 1e-10);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_no_bracket_same_sign() {
        let solver = BrentSolver::with_defaults();
        match solver.find_root(|x| x * x + 1.0, -1.0, 1.0) {
            Err(SolverError::NoBracket { a, b }) => {
                assert_eq!(a, -1.0);
                assert_eq!(b, 1.0);
            }
            other => panic!("Expected NoBracket error, got {:?}", other),
        }
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BrentSolver::new(SolverConfig::new(1e-300, 3));
        match solver.find_root(|x| x * x - 2.0, 0.0, 2.0) {
            Err(SolverError::MaxIterationsExceeded { iterations }) => assert_eq!(iterations, 3),
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    #[test]
    fn test_fallible_objective_error_passes_through() {
        #[derive(Debug, PartialEq)]
        enum ObjectiveError {
            Solver(SolverError),
            Pricing,
        }
        impl From<SolverError> for ObjectiveError {
            fn from(err: SolverError) -> Self {
                ObjectiveError::Solver(err)
            }
        }

        let solver = BrentSolver::with_defaults();
        let result = solver.try_find_root(
            |x| {
                if x > 0.5 {
                    Err(ObjectiveError::Pricing)
                } else {
                    Ok(x - 0.25)
                }
            },
            0.0,
            1.0,
        );
        assert_eq!(result, Err(ObjectiveError::Pricing));
    }

    #[test]
    fn test_non_finite_objective_is_reported() {
        let solver = BrentSolver::with_defaults();
        let result = solver.find_root(|x| if x > 0.0 { f64::NAN } else { -1.0 }, -1.0, 1.0);
        assert!(matches!(result, Err(SolverError::NumericalInstability(_))));
    }

    #[test]
    fn test_evaluation_count_is_small() {
        let solver = BrentSolver::with_defaults();
        let mut calls = 0;
        let root = solver
            .find_root(
                |x| {
                    calls += 1;
                    x.exp() - 2.0
                },
                0.0,
                1.0,
            )
            .unwrap();
        assert_abs_diff_eq!(root, 2.0_f64.ln(), epsilon = 1e-10);
        assert!(calls < 20, "took {} evaluations", calls);
    }
}

//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;

/// Derivatives smaller than this abort the iteration.
const DERIVATIVE_FLOOR: f64 = 1e-30;

/// Newton-Raphson root finder with an explicit derivative.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x| x * x - 2.0, |x| 2.0 * x, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver {
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
    /// Create a new Newton-Raphson solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` starting from `x0`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::DerivativeNearZero)` - `|f'(x)|` fell below 1e-30
    /// * `Err(SolverError::NumericalInstability)` - An iterate became non-finite
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        self.find_root_with(|x| (f(x), f_prime(x)), x0)
    }

    /// Find a root when value and derivative come from one evaluation.
    ///
    /// Useful when both are produced by an adjoint routine.
    pub fn find_root_with<F>(&self, f: F, x0: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> (f64, f64),
    {
        let mut x = x0;

        for _iteration in 0..self.config.max_iterations {
            let (value, derivative) = f(x);

            if value.abs() < self.config.tolerance {
                return Ok(x);
            }
            if derivative.abs() < DERIVATIVE_FLOOR {
                return Err(SolverError::DerivativeNearZero { x });
            }

            x -= value / derivative;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Find a root, converging on the step instead of the residual.
    ///
    /// Stops once `|Δx| <= tolerance · |x|`. Suited to objectives whose
    /// residual can be small long before `x` is pinned down, such as an
    /// option price that barely depends on its volatility.
    ///
    /// # Errors
    ///
    /// Same as [`find_root_with`](Self::find_root_with).
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-14, 50));
    /// let root = solver.find_root_by_step(|x| (x * x - 2.0, 2.0 * x), 1.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-14);
    /// ```
    pub fn find_root_by_step<F>(&self, f: F, x0: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> (f64, f64),
    {
        let mut x = x0;

        for _iteration in 0..self.config.max_iterations {
            let (value, derivative) = f(x);
            if value == 0.0 {
                return Ok(x);
            }
            if derivative.abs() < DERIVATIVE_FLOOR {
                return Err(SolverError::DerivativeNearZero { x });
            }

            let step = value / derivative;
            x -= step;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
            if step.abs() <= self.config.tolerance * x.abs() {
                return Ok(x);
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
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

    #[test]
    fn test_find_sqrt_2() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let root = solver.find_root(|x| x * x - 2.0, |x| 2.0 * x, 1.0).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_find_root_with_joint_evaluation() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let root = solver
            .find_root_with(|x| (x.exp() - 2.0, x.exp()), 0.0)
            .unwrap();
        assert_abs_diff_eq!(root, 2.0_f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn test_find_root_by_step_ignores_small_residual() {
        // Residual below any price-style tolerance far from the root
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 100));
        let root = solver
            .find_root_by_step(|x| (1e-20 * (x - 3.0), 1e-20), 0.5)
            .unwrap();
        assert_abs_diff_eq!(root, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_near_zero() {
        let solver = NewtonRaphsonSolver::with_defaults();
        match solver.find_root(|x| x * x + 1.0, |x| 2.0 * x, 0.0) {
            Err(SolverError::DerivativeNearZero { x }) => assert_eq!(x, 0.0),
            other => panic!("Expected DerivativeNearZero, got {:?}", other),
        }
    }

    #[test]
    fn test_max_iterations_exceeded() {
        // x² + 1 has no real root; iterates wander without converging
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-10, 5));
        let result = solver.find_root(|x| x * x + 1.0, |x| 2.0 * x, 0.5);
        assert!(matches!(
            result,
            Err(SolverError::MaxIterationsExceeded { iterations: 5 })
        ));
    }
}

//! Solver configuration types.

use crate::types::SolverError;

/// Configuration for root-finding algorithms.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.tolerance, 1e-10);
/// assert_eq!(config.max_iterations, 100);
///
/// let custom = SolverConfig::default()
///     .with_tolerance(1e-12)
///     .with_max_iterations(200);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Convergence tolerance.
    ///
    /// Newton stops when `|f(x)| < tolerance`; Brent additionally stops
    /// once the bracket half-width falls below `tolerance / 2`.
    pub tolerance: f64,

    /// Maximum number of iterations before giving up with
    /// `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// | Field | Default |
    /// |-------|---------|
    /// | `tolerance` | 1e-10 |
    /// | `max_iterations` | 100 |
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Tight tolerance (1e-14) and a generous iteration budget (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-14,
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-6) and a small iteration budget (50).
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 50,
        }
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that the configuration can drive a solver.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(SolverError::NumericalInstability(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::NumericalInstability(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Umbrella error for pricing operations
//! - `InterpolationError`: Errors from interpolation operations
//! - `SolverError`: Errors from root-finding solvers
//! - `IntegrationFailure`: Errors from numerical quadrature

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation failed to converge
/// - `ModelFailure`: Model assumptions violated
/// - `UnsupportedInstrument`: Instrument type not supported by model
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative notional".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative notional");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Model failed to produce valid result
    #[error("Model failure: {0}")]
    ModelFailure(String),

    /// Instrument type not supported
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),
}

/// Interpolation-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Data is not monotonic when monotonicity is required.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Why an adaptive quadrature gave up.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegrationFailureReason {
    /// A panel was bisected `depth` times without meeting the tolerance.
    #[error("maximum bisection depth {depth} reached")]
    MaxDepthExceeded {
        /// Depth at which refinement stopped
        depth: usize,
    },

    /// The integrand returned NaN or an infinity.
    #[error("integrand is not finite at x = {x}")]
    NonFiniteIntegrand {
        /// Abscissa of the offending evaluation
        x: f64,
    },

    /// A fixed rule was requested with zero nodes or zero panels.
    #[error("quadrature rule needs at least one node and one panel")]
    EmptyRule,

    /// Bounds are NaN or infinite.
    #[error("invalid integration bounds [{lower}, {upper}]")]
    InvalidBounds {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },
}

/// Failure of a numerical integration, carrying the last panel estimate.
///
/// # Examples
/// ```
/// use pricer_core::types::{IntegrationFailure, IntegrationFailureReason};
///
/// let err = IntegrationFailure::new(
///     IntegrationFailureReason::MaxDepthExceeded { depth: 30 },
///     0.125,
/// );
/// assert!(format!("{}", err).contains("depth 30"));
/// assert_eq!(err.last_value, 0.125);
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("integration failed: {reason} (last estimate {last_value})")]
pub struct IntegrationFailure {
    /// What went wrong
    pub reason: IntegrationFailureReason,
    /// Estimate of the failing panel when refinement stopped
    pub last_value: f64,
}

impl IntegrationFailure {
    /// Create a new integration failure.
    pub fn new(reason: IntegrationFailureReason, last_value: f64) -> Self {
        Self { reason, last_value }
    }
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::NumericalInstability(err.to_string())
    }
}

impl From<IntegrationFailure> for PricingError {
    fn from(err: IntegrationFailure) -> Self {
        PricingError::NumericalInstability(err.to_string())
    }
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

//! Error types for analytical pricing operations.

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive or non-finite volatility
/// - `InvalidExpiry`: Negative or non-finite time to expiry
/// - `InvalidForward`: Non-positive forward where a lognormal law is assumed
/// - `PriceOutOfRange`: Option price below intrinsic value or above its bound
/// - `ImpliedVolatility`: Root finder failure while inverting a price
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid forward.
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Price outside the no-arbitrage range.
    #[error("Price {price} outside no-arbitrage range [{lower}, {upper}]")]
    PriceOutOfRange {
        /// The quoted price
        price: f64,
        /// Lower bound (intrinsic value)
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Implied volatility inversion failed.
    #[error("Implied volatility failed: {0}")]
    ImpliedVolatility(#[from] SolverError),
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::ImpliedVolatility(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

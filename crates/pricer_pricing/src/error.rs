//! Error types for CMS replication.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{IntegrationFailure, PricingError, SolverError};
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_models::models::sabr::SABRError;
use thiserror::Error;

/// Replication pricing error.
///
/// A pricing call either returns a complete result or one of these; there
/// is no partial result.
#[derive(Debug, Error)]
pub enum ReplicationError {
    /// Adaptive integration did not converge.
    #[error("Integration failed: {0}")]
    Integration(#[from] IntegrationFailure),

    /// Root finder failure (implied correlation).
    #[error("Solver failed: {0}")]
    Solver(#[from] SolverError),

    /// Curve lookup or discount factor failure.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Invalid SABR parameters or extrapolation settings.
    #[error("SABR error: {0}")]
    Sabr(#[from] SABRError),

    /// Analytic kernel failure (implied normal volatility).
    #[error("Analytical error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Invalid instrument.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Correlation function returned a value outside [-1, 1].
    #[error("Correlation {correlation} at strike {strike} outside [-1, 1]")]
    InvalidCorrelation {
        /// Evaluated correlation
        correlation: f64,
        /// Strike it was evaluated at
        strike: f64,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Inputs for which the requested quantity is undefined.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ReplicationError> for PricingError {
    fn from(err: ReplicationError) -> Self {
        match err {
            ReplicationError::Integration(e) => e.into(),
            ReplicationError::Solver(e) => e.into(),
            ReplicationError::MarketData(e) => e.into(),
            ReplicationError::Sabr(e) => e.into(),
            ReplicationError::Analytical(e) => e.into(),
            ReplicationError::Instrument(e) => e.into(),
            other => PricingError::ModelFailure(other.to_string()),
        }
    }
}

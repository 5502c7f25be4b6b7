//! Instrument error types.
//!
//! Instruments are validated once at construction; pricing methods may then
//! rely on their invariants.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Instrument construction errors.
///
/// # Variants
/// - `InvalidTime`: A time is negative, not finite, or out of order
/// - `InvalidNotional`: Notional is not finite
/// - `InvalidStrike`: Strike is not finite
/// - `EmptyLeg`: A swap leg has no payment
/// - `NonVanillaSwap`: Leg data cannot describe a vanilla fixed/float swap
/// - `MismatchedDiscountCurves`: Legs of a spread discount on different curves
/// - `Schedule`: Schedule generation failed
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidTime { name: "payment", time: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid payment time: -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid time (negative, not finite or out of order).
    #[error("Invalid {name} time: {time}")]
    InvalidTime {
        /// Which time was rejected
        name: &'static str,
        /// The rejected value (years)
        time: f64,
    },

    /// Invalid notional amount.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Invalid strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// A swap leg has no payment.
    #[error("Empty {leg} leg")]
    EmptyLeg {
        /// Which leg is empty
        leg: &'static str,
    },

    /// Leg data that does not describe a vanilla fixed/float swap.
    #[error("Non-vanilla swap: {message}")]
    NonVanillaSwap {
        /// What is wrong with the legs
        message: String,
    },

    /// The two underlying swaps of a spread discount on different curves.
    #[error("Discount curves differ between legs: {first} vs {second}")]
    MismatchedDiscountCurves {
        /// Discount curve of the first swap
        first: String,
        /// Discount curve of the second swap
        second: String,
    },

    /// Schedule generation failure.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::NonVanillaSwap { message } => PricingError::UnsupportedInstrument(message),
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}

/// Reject negative or non-finite times.
pub(crate) fn check_time(name: &'static str, time: f64) -> Result<(), InstrumentError> {
    if time >= 0.0 && time.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidTime { name, time })
    }
}

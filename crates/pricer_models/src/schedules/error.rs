//! Schedule construction errors.

use thiserror::Error;

/// Errors raised while generating a payment schedule.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::ScheduleError;
///
/// let err = ScheduleError::InvalidRange { start: 5.0, end: 2.0 };
/// assert!(format!("{}", err).contains("must be before"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// Start time does not precede end time.
    #[error("Start time {start} must be before end time {end}")]
    InvalidRange {
        /// Schedule start (years)
        start: f64,
        /// Schedule end (years)
        end: f64,
    },

    /// A required builder field was not set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// A time is negative or not finite.
    #[error("Invalid time: {time}")]
    InvalidTime {
        /// Offending time (years)
        time: f64,
    },
}

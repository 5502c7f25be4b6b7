//! Payment schedules in year fractions.
//!
//! - [`Frequency`]: regular payment frequency
//! - [`Period`]: one accrual period
//! - [`Schedule`] / [`ScheduleBuilder`]: regular schedules from start, tenor and frequency

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{Schedule, ScheduleBuilder};

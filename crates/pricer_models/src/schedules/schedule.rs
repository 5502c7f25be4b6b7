//! Regular schedules generated from a start time, a tenor and a frequency.

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::Period;

/// Ordered accrual periods of one leg.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    periods: Vec<Period>,
}

impl Schedule {
    /// Wrap an explicit list of periods.
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    /// All periods in order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the schedule has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Payment times.
    pub fn payment_times(&self) -> Vec<f64> {
        self.periods.iter().map(Period::payment).collect()
    }

    /// Accrual fractions.
    pub fn accruals(&self) -> Vec<f64> {
        self.periods.iter().map(Period::accrual).collect()
    }

    /// Sum of accrual fractions.
    pub fn total_accrual(&self) -> f64 {
        self.periods.iter().map(Period::accrual).sum()
    }
}

/// Builder for regular schedules.
///
/// The last period ends exactly at `start + tenor`; a short final stub is
/// produced when the tenor is not a whole number of periods.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
///
/// let schedule = ScheduleBuilder::new()
///     .start(5.0)
///     .tenor(10.0)
///     .frequency(Frequency::Quarterly)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 40);
/// assert!((schedule.total_accrual() - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    start: Option<f64>,
    tenor: Option<f64>,
    frequency: Option<Frequency>,
}

impl ScheduleBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of the first accrual period (years).
    pub fn start(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }

    /// Total length of the schedule (years).
    pub fn tenor(mut self, tenor: f64) -> Self {
        self.tenor = Some(tenor);
        self
    }

    /// Payment frequency.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Generate the periods; payment is at each period end.
    ///
    /// # Errors
    ///
    /// Fails if a field is missing, the start is negative or the tenor is
    /// not positive.
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self.start.ok_or(ScheduleError::MissingField { field: "start" })?;
        let tenor = self.tenor.ok_or(ScheduleError::MissingField { field: "tenor" })?;
        let frequency = self
            .frequency
            .ok_or(ScheduleError::MissingField { field: "frequency" })?;

        if !(start >= 0.0) || !start.is_finite() {
            return Err(ScheduleError::InvalidTime { time: start });
        }
        let end = start + tenor;
        if !(tenor > 0.0) || !end.is_finite() {
            return Err(ScheduleError::InvalidRange { start, end });
        }

        let step = frequency.accrual_fraction();
        // Absorb rounding so that 10Y quarterly gives exactly 40 periods
        let n_periods = ((tenor / step) - 1e-9).ceil().max(1.0) as usize;
        let periods = (0..n_periods)
            .map(|i| {
                let period_start = start + i as f64 * step;
                let period_end = if i + 1 == n_periods {
                    end
                } else {
                    start + (i + 1) as f64 * step
                };
                Period::new(period_start, period_end, period_end)
            })
            .collect();

        Ok(Schedule::new(periods))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_regular_schedule() {
        let schedule = ScheduleBuilder::new()
            .start(1.0)
            .tenor(2.0)
            .frequency(Frequency::SemiAnnual)
            .build()
            .unwrap();
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.payment_times(), vec![1.5, 2.0, 2.5, 3.0]);
        for accrual in schedule.accruals() {
            assert_abs_diff_eq!(accrual, 0.5, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_short_final_stub() {
        let schedule = ScheduleBuilder::new()
            .start(0.0)
            .tenor(1.1)
            .frequency(Frequency::Annual)
            .build()
            .unwrap();
        assert_eq!(schedule.len(), 2);
        assert_abs_diff_eq!(schedule.periods()[1].accrual(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_fields() {
        let err = ScheduleBuilder::new().tenor(1.0).build().unwrap_err();
        assert_eq!(err, ScheduleError::MissingField { field: "start" });
        let err = ScheduleBuilder::new().start(0.0).tenor(1.0).build().unwrap_err();
        assert_eq!(err, ScheduleError::MissingField { field: "frequency" });
    }

    #[test]
    fn test_invalid_range() {
        let err = ScheduleBuilder::new()
            .start(1.0)
            .tenor(-1.0)
            .frequency(Frequency::Annual)
            .build()
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange { .. }));
    }
}

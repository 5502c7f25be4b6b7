//! Accrual period measured in year fractions.

use std::fmt;

/// One accrual period of a leg, with times in years from valuation.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Period;
///
/// let period = Period::new(1.0, 1.25, 1.25);
/// assert!((period.accrual() - 0.25).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    start: f64,
    end: f64,
    payment: f64,
}

impl Period {
    /// Period accruing over `[start, end]` and paying at `payment`.
    pub fn new(start: f64, end: f64, payment: f64) -> Self {
        Self {
            start,
            end,
            payment,
        }
    }

    /// Accrual start time.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Accrual end time.
    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Payment time.
    #[inline]
    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Accrual fraction `end − start`.
    #[inline]
    pub fn accrual(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}] paid {:.4}", self.start, self.end, self.payment)
    }
}

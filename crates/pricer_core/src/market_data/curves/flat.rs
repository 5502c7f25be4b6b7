//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Flat yield curve with a constant continuously-compounded rate.
///
/// `D(t) = exp(-r t)`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// assert_eq!(curve.zero_rate(5.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given constant rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Same curve with the rate shifted by `shift`.
    #[inline]
    pub fn shifted(&self, shift: T) -> Self {
        Self::new(self.rate + shift)
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor() {
        let curve = FlatCurve::new(0.03_f64);
        assert_relative_eq!(
            curve.discount_factor(10.0).unwrap(),
            (-0.3_f64).exp(),
            epsilon = 1e-15
        );
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_negative_time_is_rejected() {
        let curve = FlatCurve::new(0.03_f64);
        assert_eq!(
            curve.discount_factor(-0.5),
            Err(MarketDataError::InvalidMaturity { t: -0.5 })
        );
    }

    #[test]
    fn test_shifted() {
        let curve = FlatCurve::new(0.03_f64).shifted(1e-4);
        assert_relative_eq!(curve.rate(), 0.0301, epsilon = 1e-15);
    }

    #[test]
    fn test_forward_rate_is_flat() {
        let curve = FlatCurve::new(0.04_f64);
        assert_relative_eq!(curve.forward_rate(2.0, 7.5).unwrap(), 0.04, epsilon = 1e-13);
    }

    #[test]
    fn test_generic_over_f32() {
        let curve = FlatCurve::new(0.05_f32);
        assert!((curve.discount_factor(1.0).unwrap() - 0.951_229).abs() < 1e-5);
    }
}

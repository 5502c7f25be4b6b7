//! Static dispatch over the concrete yield curves.

use super::{FlatCurve, InterpolatedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;

/// Static dispatch enum wrapping concrete yield curve implementations.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
///
/// let curve = CurveEnum::flat(0.02);
/// assert!((curve.zero_rate(4.0).unwrap() - 0.02).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveEnum {
    /// Constant rate
    Flat(FlatCurve<f64>),
    /// Zero rates at pillars
    Interpolated(InterpolatedCurve),
}

impl CurveEnum {
    /// Flat curve at `rate`.
    pub fn flat(rate: f64) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }

    /// Same curve with every zero rate shifted by `shift`.
    pub fn shifted(&self, shift: f64) -> Self {
        match self {
            CurveEnum::Flat(c) => CurveEnum::Flat(c.shifted(shift)),
            CurveEnum::Interpolated(c) => CurveEnum::Interpolated(c.shifted(shift)),
        }
    }
}

impl YieldCurve<f64> for CurveEnum {
    #[inline]
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.discount_factor(t),
            CurveEnum::Interpolated(c) => c.discount_factor(t),
        }
    }

    #[inline]
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.zero_rate(t),
            CurveEnum::Interpolated(c) => c.zero_rate(t),
        }
    }
}

impl From<FlatCurve<f64>> for CurveEnum {
    fn from(curve: FlatCurve<f64>) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl From<InterpolatedCurve> for CurveEnum {
    fn from(curve: InterpolatedCurve) -> Self {
        CurveEnum::Interpolated(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dispatch_matches_inner_curve() {
        let inner = InterpolatedCurve::new(vec![1.0, 10.0], vec![0.01, 0.03]).unwrap();
        let wrapped: CurveEnum = inner.clone().into();
        assert_eq!(
            wrapped.discount_factor(4.0).unwrap(),
            inner.discount_factor(4.0).unwrap()
        );
    }

    #[test]
    fn test_shifted_flat() {
        let curve = CurveEnum::flat(0.02).shifted(0.01);
        assert_relative_eq!(curve.zero_rate(1.0).unwrap(), 0.03, epsilon = 1e-15);
    }
}

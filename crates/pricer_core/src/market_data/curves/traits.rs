//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Term structure of discount factors.
///
/// Implementors supply [`discount_factor`](YieldCurve::discount_factor);
/// zero and forward rates are derived from it with continuous compounding.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.02_f64);
/// let fwd = curve.forward_rate(1.0, 2.0).unwrap();
/// assert!((fwd - 0.02).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor `P(0, t)` for `t >= 0`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` when `t < 0`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously-compounded zero rate `-ln P(0, t) / t`, for `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Continuously-compounded forward rate between `t1` and `t2 > t1`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(f64::NAN),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ExponentialCurve {
        rate: f64,
    }

    impl YieldCurve<f64> for ExponentialCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = ExponentialCurve { rate: 0.05 };
        assert!((curve.zero_rate(3.0).unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_default_zero_rate_at_origin_is_rejected() {
        let curve = ExponentialCurve { rate: 0.05 };
        assert_eq!(
            curve.zero_rate(0.0),
            Err(MarketDataError::InvalidMaturity { t: 0.0 })
        );
    }

    #[test]
    fn test_default_forward_rate_reversed_is_rejected() {
        let curve = ExponentialCurve { rate: 0.05 };
        assert!(matches!(
            curve.forward_rate(2.0, 1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }
}

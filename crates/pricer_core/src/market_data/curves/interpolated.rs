//! Pillar-based yield curve.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::LinearInterpolator;

/// Yield curve defined by continuously-compounded zero rates at pillar
/// times, linearly interpolated and held flat outside the pillars.
///
/// `D(t) = exp(-z(t) t)`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{InterpolatedCurve, YieldCurve};
///
/// let curve = InterpolatedCurve::new(vec![1.0, 5.0, 10.0], vec![0.01, 0.02, 0.025]).unwrap();
/// assert!((curve.zero_rate(3.0).unwrap() - 0.015).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpolatedCurve {
    zero_rates: LinearInterpolator,
}

impl InterpolatedCurve {
    /// Build from strictly increasing pillar times and zero rates.
    pub fn new(times: Vec<f64>, zero_rates: Vec<f64>) -> Result<Self, MarketDataError> {
        if let Some(&t) = times.iter().find(|&&t| t < 0.0) {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(Self {
            zero_rates: LinearInterpolator::new(times, zero_rates)?,
        })
    }

    /// Pillar times.
    pub fn times(&self) -> &[f64] {
        self.zero_rates.xs()
    }

    /// Pillar zero rates.
    pub fn rates(&self) -> &[f64] {
        self.zero_rates.ys()
    }

    /// Curve with every pillar rate shifted by `shift`.
    pub fn shifted(&self, shift: f64) -> Self {
        Self {
            zero_rates: self.zero_rates.map_values(|_, r| r + shift),
        }
    }

    /// Curve with the rate of pillar `index` shifted by `shift`.
    pub fn with_pillar_shift(&self, index: usize, shift: f64) -> Result<Self, MarketDataError> {
        let count = self.times().len();
        if index >= count {
            return Err(MarketDataError::OutOfBounds {
                x: index as f64,
                min: 0.0,
                max: (count - 1) as f64,
            });
        }
        Ok(Self {
            zero_rates: self
                .zero_rates
                .map_values(|i, r| if i == index { r + shift } else { r }),
        })
    }

    /// Project point sensitivities `(t, ∂PV/∂z(t))` onto the pillars.
    ///
    /// Entry `i` of the result is `∂PV/∂z_i` for pillar rate `z_i`.
    pub fn pillar_sensitivities(&self, points: &[(f64, f64)]) -> Vec<f64> {
        let mut out = vec![0.0; self.times().len()];
        for &(t, amount) in points {
            for (slot, weight) in out.iter_mut().zip(self.zero_rates.node_weights(t)) {
                *slot += weight * amount;
            }
        }
        out
    }
}

impl YieldCurve<f64> for InterpolatedCurve {
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        if t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok((-self.zero_rates.interpolate(t) * t).exp())
    }

    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        if t <= 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(self.zero_rates.interpolate(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> InterpolatedCurve {
        InterpolatedCurve::new(vec![1.0, 5.0, 10.0], vec![0.01, 0.02, 0.025]).unwrap()
    }

    #[test]
    fn test_discount_factor_uses_interpolated_zero_rate() {
        let df = curve().discount_factor(7.5).unwrap();
        assert_relative_eq!(df, (-0.0225_f64 * 7.5).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_flat_extrapolation() {
        assert_relative_eq!(curve().zero_rate(0.25).unwrap(), 0.01, epsilon = 1e-15);
        assert_relative_eq!(curve().zero_rate(30.0).unwrap(), 0.025, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_negative_pillar() {
        assert!(InterpolatedCurve::new(vec![-1.0, 1.0], vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn test_pillar_shift() {
        let bumped = curve().with_pillar_shift(1, 1e-4).unwrap();
        assert_relative_eq!(bumped.rates()[1], 0.0201, epsilon = 1e-15);
        assert_eq!(bumped.rates()[0], 0.01);
        assert!(curve().with_pillar_shift(3, 1e-4).is_err());
    }

    #[test]
    fn test_pillar_sensitivities_match_bumps() {
        // PV = D(3) + 2 D(7); point sensitivities are -t D(t) per unit
        let base = curve();
        let points = vec![
            (3.0, -3.0 * base.discount_factor(3.0).unwrap()),
            (7.0, -2.0 * 7.0 * base.discount_factor(7.0).unwrap()),
        ];
        let projected = base.pillar_sensitivities(&points);

        let pv = |c: &InterpolatedCurve| {
            c.discount_factor(3.0).unwrap() + 2.0 * c.discount_factor(7.0).unwrap()
        };
        let h = 1e-6;
        for (i, &analytic) in projected.iter().enumerate() {
            let up = pv(&base.with_pillar_shift(i, h).unwrap());
            let down = pv(&base.with_pillar_shift(i, -h).unwrap());
            assert_relative_eq!(analytic, (up - down) / (2.0 * h), max_relative = 1e-7);
        }
    }
}

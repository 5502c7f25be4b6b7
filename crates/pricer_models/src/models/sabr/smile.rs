//! Smile functions: undiscounted option prices as a function of strike.
//!
//! Replication integrates these prices across strikes, so the trait is
//! deliberately minimal. [`HaganSmile`] additionally exposes the adjoint
//! needed for sensitivities.

use super::extrapolation::SABRExtrapolationRight;
use super::hagan::{self, SABRVolatilityAdjoint};
use super::params::SABRParameters;
use crate::analytical::{black_price, black_price_adjoint, BlackPriceAdjoint};

/// Undiscounted European option prices across strikes for one expiry.
pub trait SmileFunction {
    /// Forward of the underlying.
    fn forward(&self) -> f64;

    /// Time to expiry.
    fn expiry(&self) -> f64;

    /// Undiscounted price of a call (`is_call`) or put struck at `strike`.
    fn price(&self, strike: f64, is_call: bool) -> f64;
}

/// Hagan SABR smile priced with Black-76.
///
/// # Example
///
/// ```
/// use pricer_models::models::sabr::{HaganSmile, SABRParameters, SmileFunction};
///
/// let params = SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap();
/// let smile = HaganSmile::new(params, 0.03, 5.0);
/// let call = smile.price(0.04, true);
/// let put = smile.price(0.04, false);
/// assert!((call - put - (0.03 - 0.04)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaganSmile {
    params: SABRParameters,
    forward: f64,
    expiry: f64,
}

/// Black price adjoint chained with the smile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmilePriceAdjoint {
    /// Black price and its partial derivatives at fixed volatility
    pub black: BlackPriceAdjoint,
    /// SABR volatility and its partial derivatives
    pub volatility: SABRVolatilityAdjoint,
}

impl SmilePriceAdjoint {
    /// Total ∂price/∂forward, including the smile's forward dependence.
    pub fn forward_derivative(&self) -> f64 {
        self.black.forward + self.black.volatility * self.volatility.forward
    }

    /// Total ∂price/∂strike, including the smile's strike dependence.
    pub fn strike_derivative(&self) -> f64 {
        self.black.strike + self.black.volatility * self.volatility.strike
    }
}

impl HaganSmile {
    /// Smile for one forward and expiry.
    pub fn new(params: SABRParameters, forward: f64, expiry: f64) -> Self {
        Self {
            params,
            forward,
            expiry,
        }
    }

    /// SABR parameters of the smile.
    pub fn parameters(&self) -> &SABRParameters {
        &self.params
    }

    /// Implied Black volatility at `strike`.
    pub fn volatility(&self, strike: f64) -> f64 {
        hagan::volatility(&self.params, self.forward, strike, self.expiry)
    }

    /// Price together with Black and SABR first-order derivatives.
    pub fn price_adjoint(&self, strike: f64, is_call: bool) -> SmilePriceAdjoint {
        let volatility = hagan::volatility_adjoint(&self.params, self.forward, strike, self.expiry);
        let black = black_price_adjoint(
            self.forward,
            strike,
            self.expiry,
            volatility.volatility,
            is_call,
        );
        SmilePriceAdjoint { black, volatility }
    }
}

impl SmileFunction for HaganSmile {
    fn forward(&self) -> f64 {
        self.forward
    }

    fn expiry(&self) -> f64 {
        self.expiry
    }

    fn price(&self, strike: f64, is_call: bool) -> f64 {
        black_price(self.forward, strike, self.expiry, self.volatility(strike), is_call)
    }
}

impl SmileFunction for SABRExtrapolationRight {
    fn forward(&self) -> f64 {
        SABRExtrapolationRight::forward(self)
    }

    fn expiry(&self) -> f64 {
        SABRExtrapolationRight::expiry(self)
    }

    fn price(&self, strike: f64, is_call: bool) -> f64 {
        SABRExtrapolationRight::price(self, strike, is_call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn smile() -> HaganSmile {
        HaganSmile::new(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap(), 0.03, 5.0)
    }

    #[test]
    fn test_adjoint_price_matches_price() {
        let s = smile();
        for strike in [0.01, 0.03, 0.06] {
            assert_relative_eq!(
                s.price_adjoint(strike, true).black.price,
                s.price(strike, true),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_total_derivatives_against_finite_differences() {
        let s = smile();
        let strike = 0.025;
        let h = 1e-7;
        let adjoint = s.price_adjoint(strike, true);

        let dk = (s.price(strike + h, true) - s.price(strike - h, true)) / (2.0 * h);
        assert_relative_eq!(adjoint.strike_derivative(), dk, max_relative = 1e-6);

        let up = HaganSmile::new(*s.parameters(), 0.03 + h, 5.0);
        let down = HaganSmile::new(*s.parameters(), 0.03 - h, 5.0);
        let df = (up.price(strike, true) - down.price(strike, true)) / (2.0 * h);
        assert_relative_eq!(adjoint.forward_derivative(), df, max_relative = 1e-6);
    }

    #[test]
    fn test_extrapolated_smile_agrees_below_cut_off() {
        let s = smile();
        let tail = SABRExtrapolationRight::new(*s.parameters(), 0.03, 5.0, 0.08, 3.0).unwrap();
        let smile_fn: &dyn SmileFunction = &tail;
        assert_eq!(smile_fn.price(0.05, true), s.price(0.05, true));
        assert_eq!(smile_fn.forward(), 0.03);
    }
}

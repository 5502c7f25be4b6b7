//! SABR smile with a power-law right tail.
//!
//! Above the cut-off strike `K*` the call price is replaced by
//!
//! ```text
//! C(K) = K^(−μ) · exp(a + b/K + c/K²)
//! ```
//!
//! with `(a, b, c)` chosen so that price, first and second strike derivative
//! match the Hagan smile at `K*`. Larger `μ` gives a thinner tail. Puts above
//! the cut-off follow from call/put parity.

use super::hagan;
use super::params::{SABRError, SABRParameters};
use crate::analytical::{black_price, black_price_adjoint, black_second_order};

/// Below this time to expiry the tail is taken as identically negligible.
const SMALL_EXPIRY: f64 = 1e-6;
/// Tail level used when the expiry is negligible.
const SMALL_PARAMETER: f64 = -1e4;
/// Tail level used when price and derivatives at the cut-off all vanish.
const VANISHING_PARAMETER: f64 = -100.0;
/// Threshold under which price and derivatives count as vanishing.
const VANISHING_PRICE: f64 = 1e-15;
/// Relative strike shift for the second derivative of the smile.
const STRIKE_SHIFT: f64 = 1e-5;

/// Hagan SABR smile below a cut-off strike, fitted power-law tail above it.
///
/// # Example
///
/// ```
/// use pricer_models::models::sabr::{SABRExtrapolationRight, SABRParameters};
///
/// let params = SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap();
/// let smile = SABRExtrapolationRight::new(params, 0.03, 5.0, 0.10, 2.5).unwrap();
///
/// // Continuous across the cut-off
/// let below = smile.price(0.10 - 1e-12, true);
/// let above = smile.price(0.10 + 1e-12, true);
/// assert!((below - above).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SABRExtrapolationRight {
    params: SABRParameters,
    forward: f64,
    expiry: f64,
    cut_off_strike: f64,
    mu: f64,
    tail: [f64; 3],
}

impl SABRExtrapolationRight {
    /// Fit the tail for one smile.
    ///
    /// # Errors
    ///
    /// Rejects non-positive cut-off strikes or tail parameters and negative expiries.
    pub fn new(
        params: SABRParameters,
        forward: f64,
        expiry: f64,
        cut_off_strike: f64,
        mu: f64,
    ) -> Result<Self, SABRError> {
        if !(cut_off_strike > 0.0) || !cut_off_strike.is_finite() {
            return Err(SABRError::InvalidCutOff(cut_off_strike));
        }
        if !(mu > 0.0) || !mu.is_finite() {
            return Err(SABRError::InvalidMu(mu));
        }
        if !(expiry >= 0.0) {
            return Err(SABRError::InvalidExpiry(expiry));
        }

        let tail = if expiry > SMALL_EXPIRY {
            fit_tail(&params, forward, expiry, cut_off_strike, mu)
        } else {
            [SMALL_PARAMETER, 0.0, 0.0]
        };
        tracing::trace!(cut_off_strike, mu, a = tail[0], b = tail[1], c = tail[2], "fitted SABR right tail");

        Ok(Self {
            params,
            forward,
            expiry,
            cut_off_strike,
            mu,
            tail,
        })
    }

    /// Undiscounted option price.
    pub fn price(&self, strike: f64, is_call: bool) -> f64 {
        if strike <= self.cut_off_strike {
            let vol = hagan::volatility(&self.params, self.forward, strike, self.expiry);
            black_price(self.forward, strike, self.expiry, vol, is_call)
        } else {
            let call = self.tail_price(strike);
            if is_call {
                call
            } else {
                call - (self.forward - strike)
            }
        }
    }

    /// ∂price/∂strike including the smile dependence.
    pub fn price_derivative_strike(&self, strike: f64, is_call: bool) -> f64 {
        if strike <= self.cut_off_strike {
            let vol = hagan::volatility_adjoint(&self.params, self.forward, strike, self.expiry);
            let black = black_price_adjoint(self.forward, strike, self.expiry, vol.volatility, is_call);
            black.strike + black.volatility * vol.strike
        } else {
            let derivative = self.tail_derivative(strike);
            if is_call {
                derivative
            } else {
                derivative + 1.0
            }
        }
    }

    fn tail_price(&self, strike: f64) -> f64 {
        let [a, b, c] = self.tail;
        strike.powf(-self.mu) * (a + b / strike + c / (strike * strike)).exp()
    }

    fn tail_derivative(&self, strike: f64) -> f64 {
        let [_, b, c] = self.tail;
        -self.tail_price(strike) * (self.mu + (b + 2.0 * c / strike) / strike) / strike
    }

    /// Fitted `(a, b, c)`.
    pub fn tail_parameters(&self) -> [f64; 3] {
        self.tail
    }

    /// SABR parameters of the smile body.
    pub fn parameters(&self) -> &SABRParameters {
        &self.params
    }

    /// Strike above which the tail applies.
    pub fn cut_off_strike(&self) -> f64 {
        self.cut_off_strike
    }

    /// Tail thickness parameter.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Forward of the underlying.
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Time to expiry.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }
}

/// Solve for `(a, b, c)` in closed form from the price and its first two
/// strike derivatives at the cut-off.
fn fit_tail(params: &SABRParameters, forward: f64, expiry: f64, cut_off: f64, mu: f64) -> [f64; 3] {
    let vol = hagan::volatility_adjoint(params, forward, cut_off, expiry);
    let sigma = vol.volatility;
    let sigma_k = vol.strike;

    let h = cut_off * STRIKE_SHIFT;
    let up = hagan::volatility_adjoint(params, forward, cut_off + h, expiry).strike;
    let down = hagan::volatility_adjoint(params, forward, cut_off - h, expiry).strike;
    let sigma_kk = (up - down) / (2.0 * h);

    let black = black_price_adjoint(forward, cut_off, expiry, sigma, true);
    let second = black_second_order(forward, cut_off, expiry, sigma);

    let p = black.price;
    let p1 = black.strike + black.volatility * sigma_k;
    let p2 = second.strike_strike
        + 2.0 * second.volatility_strike * sigma_k
        + second.volatility_volatility * sigma_k * sigma_k
        + black.volatility * sigma_kk;

    if p.abs() < VANISHING_PRICE && p1.abs() < VANISHING_PRICE && p2.abs() < VANISHING_PRICE {
        return [VANISHING_PARAMETER, 0.0, 0.0];
    }

    let k = cut_off;
    let q = p1 / p;
    let r = p2 / p;
    let c = k.powi(4) / 2.0 * (r - q * q + mu / (k * k) + 2.0 * q / k);
    let b = -2.0 * c / k - q * k * k - mu * k;
    let a = p.ln() + mu * k.ln() - b / k - c / (k * k);
    [a, b, c]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn smile() -> SABRExtrapolationRight {
        let params = SABRParameters::new(0.05, 0.5, -0.25, 0.5).unwrap();
        SABRExtrapolationRight::new(params, 0.05, 10.0, 0.10, 2.5).unwrap()
    }

    // ========================================
    // Fit Tests
    // ========================================

    #[test]
    fn test_value_and_slope_continuous_at_cut_off() {
        let s = smile();
        let k = s.cut_off_strike();
        let eps = 1e-8;
        assert_relative_eq!(s.price(k - eps, true), s.price(k + eps, true), max_relative = 1e-6);
        assert_relative_eq!(
            s.price_derivative_strike(k - eps, true),
            s.price_derivative_strike(k + eps, true),
            max_relative = 1e-5
        );
    }

    #[test]
    fn test_curvature_continuous_at_cut_off() {
        let s = smile();
        let k = s.cut_off_strike();
        let h = 1e-5;
        let left = (s.price(k, true) - 2.0 * s.price(k - h, true) + s.price(k - 2.0 * h, true)) / (h * h);
        let right = (s.price(k + 2.0 * h, true) - 2.0 * s.price(k + h, true) + s.price(k, true)) / (h * h);
        assert_relative_eq!(left, right, max_relative = 2e-2);
    }

    #[test]
    fn test_tail_decays() {
        let s = smile();
        let mut previous = s.price(0.11, true);
        for strike in [0.2, 0.5, 1.0, 2.0] {
            let price = s.price(strike, true);
            assert!(price > 0.0 && price < previous);
            previous = price;
        }
    }

    #[test]
    fn test_put_call_parity_above_cut_off() {
        let s = smile();
        let strike = 0.3;
        assert_relative_eq!(
            s.price(strike, true) - s.price(strike, false),
            s.forward() - strike,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_strike_derivative_in_tail() {
        let s = smile();
        let strike = 0.25;
        let h = 1e-6;
        let fd = (s.price(strike + h, true) - s.price(strike - h, true)) / (2.0 * h);
        assert_relative_eq!(s.price_derivative_strike(strike, true), fd, max_relative = 1e-6);
    }

    #[test]
    fn test_body_matches_hagan() {
        let s = smile();
        let vol = hagan::volatility(s.parameters(), 0.05, 0.04, 10.0);
        assert_eq!(s.price(0.04, false), black_price(0.05, 0.04, 10.0, vol, false));
    }

    // ========================================
    // Degenerate Cases
    // ========================================

    #[test]
    fn test_small_expiry_tail_is_negligible() {
        let params = SABRParameters::new(0.05, 0.5, -0.25, 0.5).unwrap();
        let s = SABRExtrapolationRight::new(params, 0.05, 1e-8, 0.10, 2.5).unwrap();
        assert_eq!(s.tail_parameters(), [SMALL_PARAMETER, 0.0, 0.0]);
        assert!(s.price(0.2, true) < 1e-100);
    }

    #[test]
    fn test_invalid_configuration() {
        let params = SABRParameters::new(0.05, 0.5, -0.25, 0.5).unwrap();
        assert_eq!(
            SABRExtrapolationRight::new(params, 0.05, 1.0, 0.0, 2.5),
            Err(SABRError::InvalidCutOff(0.0))
        );
        assert_eq!(
            SABRExtrapolationRight::new(params, 0.05, 1.0, 0.1, -1.0),
            Err(SABRError::InvalidMu(-1.0))
        );
    }
}

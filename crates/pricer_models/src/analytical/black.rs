//! Black-76 (lognormal forward) option kernel with adjoint derivatives.
//!
//! Prices are undiscounted (numeraire 1):
//!
//! ```text
//! C = F·N(d1) − K·N(d2),   P = K·N(−d2) − F·N(−d1)
//! d1 = ln(F/K)/(σ√T) + σ√T/2,   d2 = d1 − σ√T
//! ```
//!
//! When `σ√T`, the strike or the forward is below 1e-16 the option is worth
//! its intrinsic value and all volatility derivatives vanish.
//!
//! The free functions are the inner kernel used inside integration loops
//! and never fail; [`Black76`] validates its inputs once for external callers.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Threshold below which the intrinsic value is returned.
const SMALL: f64 = 1e-16;

/// Price with its first-order derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackPriceAdjoint {
    /// Undiscounted price
    pub price: f64,
    /// ∂price/∂forward
    pub forward: f64,
    /// ∂price/∂volatility
    pub volatility: f64,
    /// ∂price/∂strike
    pub strike: f64,
}

/// Second-order derivatives used to match smile tails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackSecondOrder {
    /// ∂²price/∂strike²
    pub strike_strike: f64,
    /// ∂²price/∂volatility²
    pub volatility_volatility: f64,
    /// ∂²price/∂volatility∂strike
    pub volatility_strike: f64,
}

#[inline]
fn is_degenerate(forward: f64, strike: f64, vol_sqrt_t: f64) -> bool {
    vol_sqrt_t < SMALL || strike < SMALL || forward < SMALL
}

#[inline]
fn omega(is_call: bool) -> f64 {
    if is_call {
        1.0
    } else {
        -1.0
    }
}

#[inline]
fn d1_d2(forward: f64, strike: f64, vol_sqrt_t: f64) -> (f64, f64) {
    let d1 = (forward / strike).ln() / vol_sqrt_t + 0.5 * vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Undiscounted Black-76 price.
///
/// # Example
///
/// ```
/// use pricer_models::analytical::black::black_price;
///
/// let call = black_price(0.03, 0.03, 5.0, 0.2, true);
/// let put = black_price(0.03, 0.03, 5.0, 0.2, false);
/// assert!((call - put).abs() < 1e-15);
/// ```
pub fn black_price(forward: f64, strike: f64, expiry: f64, volatility: f64, is_call: bool) -> f64 {
    let w = omega(is_call);
    let vol_sqrt_t = volatility * expiry.max(0.0).sqrt();
    if is_degenerate(forward, strike, vol_sqrt_t) {
        return (w * (forward - strike)).max(0.0);
    }
    let (d1, d2) = d1_d2(forward, strike, vol_sqrt_t);
    w * (forward * norm_cdf(w * d1) - strike * norm_cdf(w * d2))
}

/// Price and first derivatives with respect to forward, volatility and strike.
pub fn black_price_adjoint(
    forward: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    is_call: bool,
) -> BlackPriceAdjoint {
    let w = omega(is_call);
    let sqrt_t = expiry.max(0.0).sqrt();
    let vol_sqrt_t = volatility * sqrt_t;

    if is_degenerate(forward, strike, vol_sqrt_t) {
        let intrinsic = w * (forward - strike);
        return if intrinsic > 0.0 {
            BlackPriceAdjoint {
                price: intrinsic,
                forward: w,
                volatility: 0.0,
                strike: -w,
            }
        } else {
            BlackPriceAdjoint {
                price: 0.0,
                forward: 0.0,
                volatility: 0.0,
                strike: 0.0,
            }
        };
    }

    let (d1, d2) = d1_d2(forward, strike, vol_sqrt_t);
    let n1 = norm_cdf(w * d1);
    let n2 = norm_cdf(w * d2);
    BlackPriceAdjoint {
        price: w * (forward * n1 - strike * n2),
        forward: w * n1,
        volatility: forward * norm_pdf(d1) * sqrt_t,
        strike: -w * n2,
    }
}

/// ∂price/∂volatility.
#[inline]
pub fn black_vega(forward: f64, strike: f64, expiry: f64, volatility: f64) -> f64 {
    let sqrt_t = expiry.max(0.0).sqrt();
    let vol_sqrt_t = volatility * sqrt_t;
    if is_degenerate(forward, strike, vol_sqrt_t) {
        return 0.0;
    }
    let (d1, _) = d1_d2(forward, strike, vol_sqrt_t);
    forward * norm_pdf(d1) * sqrt_t
}

/// Second-order strike and volatility derivatives (identical for calls and puts).
pub fn black_second_order(
    forward: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
) -> BlackSecondOrder {
    let sqrt_t = expiry.max(0.0).sqrt();
    let vol_sqrt_t = volatility * sqrt_t;
    if is_degenerate(forward, strike, vol_sqrt_t) {
        return BlackSecondOrder {
            strike_strike: 0.0,
            volatility_volatility: 0.0,
            volatility_strike: 0.0,
        };
    }
    let (d1, d2) = d1_d2(forward, strike, vol_sqrt_t);
    let pdf1 = norm_pdf(d1);
    let vega = forward * pdf1 * sqrt_t;
    BlackSecondOrder {
        strike_strike: norm_pdf(d2) / (strike * vol_sqrt_t),
        volatility_volatility: vega * d1 * d2 / volatility,
        volatility_strike: forward * pdf1 * d1 / (strike * volatility),
    }
}

/// Validated Black-76 model for a fixed forward and volatility.
///
/// # Example
///
/// ```
/// use pricer_models::analytical::Black76;
///
/// let model = Black76::new(0.03, 0.25).unwrap();
/// let call = model.price(0.035, 2.0, true).unwrap();
/// let put = model.price(0.035, 2.0, false).unwrap();
/// assert!((call - put - (0.03 - 0.035)).abs() < 1e-15);
///
/// assert!(Black76::new(0.03, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Black76 {
    forward: f64,
    volatility: f64,
}

impl Black76 {
    /// Create a model with a positive forward and positive volatility.
    pub fn new(forward: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(forward > 0.0) || !forward.is_finite() {
            return Err(AnalyticalError::InvalidForward { forward });
        }
        if !(volatility > 0.0) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            forward,
            volatility,
        })
    }

    /// Forward rate.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Lognormal volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Undiscounted price; fails on a negative expiry.
    pub fn price(&self, strike: f64, expiry: f64, is_call: bool) -> Result<f64, AnalyticalError> {
        check_expiry(expiry)?;
        Ok(black_price(
            self.forward,
            strike,
            expiry,
            self.volatility,
            is_call,
        ))
    }

    /// Price with first derivatives; fails on a negative expiry.
    pub fn price_adjoint(
        &self,
        strike: f64,
        expiry: f64,
        is_call: bool,
    ) -> Result<BlackPriceAdjoint, AnalyticalError> {
        check_expiry(expiry)?;
        Ok(black_price_adjoint(
            self.forward,
            strike,
            expiry,
            self.volatility,
            is_call,
        ))
    }
}

pub(crate) fn check_expiry(expiry: f64) -> Result<(), AnalyticalError> {
    if expiry < 0.0 || !expiry.is_finite() {
        return Err(AnalyticalError::InvalidExpiry { expiry });
    }
    Ok(())
}

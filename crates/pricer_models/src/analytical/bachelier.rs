//! Bachelier (normal) pricing model for European options.
//!
//! Used for spread options, whose underlying can be negative.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = (F - K)·N(d) + σ√T·φ(d)
//! **Put Price**: P = (K - F)·N(-d) + σ√T·φ(d)
//!
//! Where:
//! - d = (F - K) / (σ√T)
//! - N(·) is the standard normal CDF
//! - φ(·) is the standard normal PDF

use pricer_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use pricer_core::types::SolverError;

use super::black::check_expiry;
use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Below this σ√T the option is worth its intrinsic value.
const SMALL: f64 = 1e-16;

/// Upper end of the Brent bracket for implied normal volatility, in units
/// of σ√T: `50·price + 10·|F − K|`.
const BRACKET_PRICE_MULTIPLE: f64 = 50.0;
const BRACKET_MONEYNESS_MULTIPLE: f64 = 10.0;

/// Relative distance to intrinsic below which the implied volatility is zero.
const INTRINSIC_TOLERANCE: f64 = 1e-14;
/// Relative volatility step at which Newton stops.
const VOLATILITY_TOLERANCE: f64 = 1e-13;

/// Price with first derivatives under the normal law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalPriceAdjoint {
    /// Undiscounted price
    pub price: f64,
    /// ∂price/∂forward
    pub forward: f64,
    /// ∂price/∂volatility
    pub volatility: f64,
}

/// Undiscounted Bachelier price.
pub fn normal_price(forward: f64, strike: f64, expiry: f64, volatility: f64, is_call: bool) -> f64 {
    normal_price_adjoint(forward, strike, expiry, volatility, is_call).price
}

/// Price and first derivatives with respect to forward and volatility.
pub fn normal_price_adjoint(
    forward: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    is_call: bool,
) -> NormalPriceAdjoint {
    let w = if is_call { 1.0 } else { -1.0 };
    let sqrt_t = expiry.max(0.0).sqrt();
    let vol_sqrt_t = volatility * sqrt_t;

    if vol_sqrt_t < SMALL {
        let intrinsic = w * (forward - strike);
        return NormalPriceAdjoint {
            price: intrinsic.max(0.0),
            forward: if intrinsic > 0.0 { w } else { 0.0 },
            volatility: 0.0,
        };
    }

    let d = (forward - strike) / vol_sqrt_t;
    let cdf = norm_cdf(w * d);
    let pdf = norm_pdf(d);
    NormalPriceAdjoint {
        price: w * (forward - strike) * cdf + vol_sqrt_t * pdf,
        forward: w * cdf,
        volatility: sqrt_t * pdf,
    }
}

/// Normal volatility reproducing `price`.
///
/// Newton iterations on the vega start from `seed` when given, otherwise
/// from the at-the-money approximation `price·√(2π/T)`; if Newton fails the
/// root is bracketed and solved with Brent. Newton stops on the relative
/// volatility step, not on the price residual.
///
/// A price within `1e-14 · max(|price|, 1)` of the intrinsic value maps to
/// zero volatility.
///
/// # Errors
///
/// [`AnalyticalError::PriceOutOfRange`] when `price` is below intrinsic or
/// above what the bracket can reach, [`AnalyticalError::InvalidExpiry`] for a
/// negative expiry.
///
/// # Example
///
/// ```
/// use pricer_models::analytical::bachelier::{implied_normal_volatility, normal_price};
///
/// let price = normal_price(0.01, 0.012, 3.0, 0.006, true);
/// let vol = implied_normal_volatility(0.01, 0.012, 3.0, price, true, None).unwrap();
/// assert!((vol - 0.006).abs() < 1e-12);
/// ```
pub fn implied_normal_volatility(
    forward: f64,
    strike: f64,
    expiry: f64,
    price: f64,
    is_call: bool,
    seed: Option<f64>,
) -> Result<f64, AnalyticalError> {
    check_expiry(expiry)?;
    let w = if is_call { 1.0 } else { -1.0 };
    let intrinsic = (w * (forward - strike)).max(0.0);
    if !price.is_finite() {
        return Err(AnalyticalError::PriceOutOfRange {
            price,
            lower: intrinsic,
            upper: f64::INFINITY,
        });
    }
    // Time value lost to rounding of `forward - strike`
    if (price - intrinsic).abs() <= INTRINSIC_TOLERANCE * price.abs().max(1.0) || expiry == 0.0 {
        return Ok(0.0);
    }
    if price < intrinsic {
        return Err(AnalyticalError::PriceOutOfRange {
            price,
            lower: intrinsic,
            upper: f64::INFINITY,
        });
    }

    let objective = |vol: f64| {
        let adj = normal_price_adjoint(forward, strike, expiry, vol, is_call);
        (adj.price - price, adj.volatility)
    };

    let start = seed
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or_else(|| price * (2.0 * std::f64::consts::PI / expiry).sqrt());

    let newton = NewtonRaphsonSolver::new(SolverConfig::new(VOLATILITY_TOLERANCE, 50));
    match newton.find_root_by_step(objective, start) {
        Ok(vol) if vol > 0.0 => return Ok(vol),
        Ok(_) | Err(_) => {}
    }

    tracing::debug!(
        forward,
        strike,
        expiry,
        price,
        "Newton failed for implied normal volatility, falling back to Brent"
    );
    let upper = (BRACKET_PRICE_MULTIPLE * price
        + BRACKET_MONEYNESS_MULTIPLE * (forward - strike).abs())
        / expiry.sqrt()
        + start;
    let brent = BrentSolver::new(SolverConfig::new(1e-15, 200));
    let vol = brent
        .find_root(|vol| objective(vol).0, 0.0, upper)
        .map_err(|err| match err {
            SolverError::NoBracket { .. } => AnalyticalError::PriceOutOfRange {
                price,
                lower: intrinsic,
                upper: normal_price(forward, strike, expiry, upper, is_call),
            },
            other => AnalyticalError::ImpliedVolatility(other),
        })?;
    Ok(vol)
}

/// Bachelier model with a fixed forward and normal volatility.
///
/// # Example
///
/// ```
/// use pricer_models::analytical::Bachelier;
///
/// let model = Bachelier::new(-0.002, 0.007).unwrap();
/// let call = model.price_call(0.0, 1.0).unwrap();
/// let put = model.price_put(0.0, 1.0).unwrap();
/// assert!((call - put + 0.002).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bachelier {
    forward: f64,
    volatility: f64,
}

impl Bachelier {
    /// Create a model; the forward may be negative, the volatility must be positive.
    pub fn new(forward: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !forward.is_finite() {
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

    /// Forward value.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Normal volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Undiscounted call price.
    pub fn price_call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        check_expiry(expiry)?;
        Ok(normal_price(self.forward, strike, expiry, self.volatility, true))
    }

    /// Undiscounted put price.
    pub fn price_put(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        check_expiry(expiry)?;
        Ok(normal_price(self.forward, strike, expiry, self.volatility, false))
    }
}

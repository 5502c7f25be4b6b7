//! Binormal pricing of CMS spread caps and floors.
//!
//! Each rate is given a normal distribution under the payment measure:
//! its mean is the replicated CMS coupon and its volatility is implied from
//! the replicated at-the-money CMS cap. The spread is then normal with
//!
//! ```text
//! σ² = σ₁² − 2ρ(K)σ₁σ₂ + σ₂²
//! ```

use pricer_core::math::solvers::BrentSolver;
use pricer_models::analytical::{implied_normal_volatility, normal_price};
use pricer_models::instruments::CapFloorCmsSpread;
use pricer_models::models::sabr::SABRProvider;

use crate::config::{CorrelationFunction, ReplicationConfig, SpreadConfig};
use crate::error::ReplicationError;
use crate::market::SABRMarketData;
use crate::replication::{CapFloorCmsSabrReplicationMethod, CmsReplication};

/// Bracket for implied correlation.
const CORRELATION_BOUND: f64 = 0.999;

/// CMS spread cap/floor priced with a bivariate normal on the two rates.
///
/// `M` prices the CMS coupons and caps of each leg; any [`CmsReplication`]
/// works, so the extrapolated-tail methods can be used as well.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveEnum, CurveSet};
/// use pricer_models::instruments::{CapFloorCmsSpread, FixedFloatSwap};
/// use pricer_models::models::sabr::{SABRParameters, SABRSurface};
/// use pricer_models::schedules::Frequency;
/// use pricer_pricing::config::CorrelationFunction;
/// use pricer_pricing::market::SABRMarketData;
/// use pricer_pricing::replication::CapFloorCmsSabrReplicationMethod;
/// use pricer_pricing::spread::CapFloorCmsSpreadSabrBinormalMethod;
///
/// let curves = CurveSet::new()
///     .with_curve("DSC", CurveEnum::flat(0.02))
///     .with_curve("FWD", CurveEnum::flat(0.025));
/// let sabr = SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap());
/// let market = SABRMarketData::new(curves, sabr);
///
/// let swap10 = FixedFloatSwap::from_tenor(5.0, 10.0, Frequency::Annual, Frequency::SemiAnnual, "DSC", "FWD").unwrap();
/// let swap2 = FixedFloatSwap::from_tenor(5.0, 2.0, Frequency::Annual, Frequency::SemiAnnual, "DSC", "FWD").unwrap();
/// let spread = CapFloorCmsSpread::new(6.0, 1.0, 1e6, 5.0, swap10, swap2, 5.0, 0.001, true).unwrap();
///
/// let method = CapFloorCmsSpreadSabrBinormalMethod::new(
///     CorrelationFunction::Constant(0.8),
///     CapFloorCmsSabrReplicationMethod::default(),
/// );
/// let pv = method.present_value(&spread, &market).unwrap();
/// let rho = method.implied_correlation(&spread, &market, pv).unwrap();
/// assert!((rho - 0.8).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CapFloorCmsSpreadSabrBinormalMethod<M = CapFloorCmsSabrReplicationMethod> {
    correlation: CorrelationFunction,
    method: M,
}

/// Normal distributions of the two rates, fixed for one instrument.
#[derive(Debug, Clone, Copy)]
struct SpreadLegs {
    expected: [f64; 2],
    volatility: [f64; 2],
    expiry: f64,
    /// `DF · notional · accrual`
    scale: f64,
}

impl CapFloorCmsSpreadSabrBinormalMethod<CapFloorCmsSabrReplicationMethod> {
    /// Method on the plain SABR replication built from configuration.
    pub fn from_config(
        spread: SpreadConfig,
        replication: ReplicationConfig,
    ) -> Result<Self, ReplicationError> {
        Ok(Self::new(
            spread.correlation,
            CapFloorCmsSabrReplicationMethod::new(replication)?,
        ))
    }
}

impl<M: CmsReplication> CapFloorCmsSpreadSabrBinormalMethod<M> {
    /// Method with a correlation function and a leg pricer.
    pub fn new(correlation: CorrelationFunction, method: M) -> Self {
        Self {
            correlation,
            method,
        }
    }

    /// The correlation function.
    pub fn correlation(&self) -> &CorrelationFunction {
        &self.correlation
    }

    /// The leg pricer.
    pub fn method(&self) -> &M {
        &self.method
    }

    fn legs<S: SABRProvider>(
        &self,
        spread: &CapFloorCmsSpread,
        market: &SABRMarketData<S>,
    ) -> Result<SpreadLegs, ReplicationError> {
        let discount_factor =
            market.discount_factor(spread.funding_curve(), spread.payment_time())?;
        let scale = discount_factor * spread.notional() * spread.accrual();
        if scale == 0.0 || !scale.is_finite() {
            return Err(ReplicationError::InvalidInput(format!(
                "spread leg scale (discount factor x notional x accrual) must be finite and non-zero, got {}",
                scale
            )));
        }
        let expiry = spread.fixing_time();

        let mut expected = [0.0; 2];
        let mut volatility = [0.0; 2];
        let mut seed = None;
        for (index, first) in [true, false].into_iter().enumerate() {
            let coupon = spread.leg_coupon(first)?;
            let forward = market.forward(coupon.swap())?;
            let cap = spread.leg_cap(first, forward)?;
            let coupon_price = self.method.coupon_present_value(&coupon, market)?;
            let cap_price = self.method.cap_floor_present_value(&cap, market)?;

            expected[index] = coupon_price / scale;
            volatility[index] = implied_normal_volatility(
                expected[index],
                forward,
                expiry,
                cap_price / scale,
                true,
                seed,
            )?;
            seed = Some(volatility[index]);
            tracing::debug!(
                leg = index + 1,
                forward,
                expected = expected[index],
                volatility = volatility[index],
                "CMS spread leg"
            );
        }

        Ok(SpreadLegs {
            expected,
            volatility,
            expiry,
            scale,
        })
    }

    fn price_with_correlation(
        legs: &SpreadLegs,
        correlation: f64,
        strike: f64,
        is_cap: bool,
    ) -> Result<f64, ReplicationError> {
        if !(-1.0..=1.0).contains(&correlation) {
            return Err(ReplicationError::InvalidCorrelation {
                correlation,
                strike,
            });
        }
        let [vol1, vol2] = legs.volatility;
        let variance = vol1 * vol1 - 2.0 * correlation * vol1 * vol2 + vol2 * vol2;
        let spread_volatility = variance.max(0.0).sqrt();
        let forward = legs.expected[0] - legs.expected[1];
        Ok(normal_price(forward, strike, legs.expiry, spread_volatility, is_cap) * legs.scale)
    }

    /// Present value.
    ///
    /// # Errors
    ///
    /// Fails when a leg cannot be priced or its normal volatility cannot be
    /// implied, or when the correlation at the strike lies outside [-1, 1].
    pub fn present_value<S: SABRProvider>(
        &self,
        spread: &CapFloorCmsSpread,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        if spread.notional() == 0.0 {
            return Ok(0.0);
        }
        let legs = self.legs(spread, market)?;
        let correlation = self.correlation.evaluate(spread.strike());
        let price = Self::price_with_correlation(&legs, correlation, spread.strike(), spread.is_cap())?;
        tracing::debug!(correlation, price, "CMS spread price");
        Ok(price)
    }

    /// Constant correlation reproducing `price`.
    ///
    /// Both legs are priced once; Brent's method then searches
    /// (−0.999, 0.999).
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::Solver`] when `price` is not attainable
    /// inside the bracket, and [`ReplicationError::InvalidInput`] when the
    /// spread has zero notional, since every correlation then gives the same
    /// price.
    pub fn implied_correlation<S: SABRProvider>(
        &self,
        spread: &CapFloorCmsSpread,
        market: &SABRMarketData<S>,
        price: f64,
    ) -> Result<f64, ReplicationError> {
        let legs = self.legs(spread, market)?;
        let strike = spread.strike();
        let is_cap = spread.is_cap();
        let solver = BrentSolver::with_defaults();
        let correlation = solver.try_find_root(
            |correlation| {
                let trial = Self::price_with_correlation(&legs, correlation, strike, is_cap)?;
                tracing::debug!(correlation, trial, target = price, "implied correlation trial");
                Ok::<f64, ReplicationError>(trial - price)
            },
            -CORRELATION_BOUND,
            CORRELATION_BOUND,
        )?;
        tracing::debug!(correlation, "implied correlation");
        Ok(correlation)
    }
}

//! SABR replication of CMS caps and floors.

use pricer_core::market_data::CurveSensitivity;
use pricer_models::instruments::CapFloorCms;
use pricer_models::models::sabr::{SABRProvider, SabrParameter};

use super::integrand::{DeltaIntegrand, FlooredHaganSmile, StrikeIntegrand, VegaIntegrand};
use super::{CmsContext, CmsReplication};
use crate::config::ReplicationConfig;
use crate::error::ReplicationError;
use crate::market::SABRMarketData;
use crate::sensitivity::SabrSensitivity;

/// Prices CMS caps/floors by replication on the Hagan SABR smile.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveEnum, CurveSet};
/// use pricer_models::instruments::{CapFloorCms, FixedFloatSwap};
/// use pricer_models::models::sabr::{SABRParameters, SABRSurface};
/// use pricer_models::schedules::Frequency;
/// use pricer_pricing::market::SABRMarketData;
/// use pricer_pricing::replication::CapFloorCmsSabrReplicationMethod;
///
/// let curves = CurveSet::new()
///     .with_curve("DSC", CurveEnum::flat(0.02))
///     .with_curve("FWD", CurveEnum::flat(0.025));
/// let sabr = SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap());
/// let market = SABRMarketData::new(curves, sabr);
///
/// let swap = FixedFloatSwap::from_tenor(5.0, 10.0, Frequency::Quarterly, Frequency::Quarterly, "DSC", "FWD").unwrap();
/// let cap = CapFloorCms::new(5.25, 0.25, 1_000_000.0, 5.0, swap, 5.0, 0.03, true).unwrap();
///
/// let method = CapFloorCmsSabrReplicationMethod::default();
/// let pv = method.present_value(&cap, &market).unwrap();
/// assert!(pv > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CapFloorCmsSabrReplicationMethod {
    config: ReplicationConfig,
}

impl CapFloorCmsSabrReplicationMethod {
    /// Method with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ReplicationError::InvalidConfig` if any tolerance is not
    /// positive, `max_depth` is 0, or the integration window is not positive.
    pub fn new(config: ReplicationConfig) -> Result<Self, ReplicationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReplicationConfig {
        &self.config
    }

    fn smile<S: SABRProvider>(&self, context: &CmsContext, market: &SABRMarketData<S>) -> FlooredHaganSmile {
        FlooredHaganSmile::new(
            market.sabr().smile(context.expiry, context.maturity, context.forward),
            self.config.strike_floor,
        )
    }

    /// Present value of a CMS cap or floor.
    ///
    /// The strike part `factor · k(K) · P(K)` plus the replication integral
    /// over the cap window `[K, K + W]` (or minus the floor integral over
    /// `[0, K]`), discounted to the payment date and scaled by notional and
    /// accrual.
    ///
    /// # Arguments
    ///
    /// * `cap_floor` - The CMS cap or floor
    /// * `market` - Curves and SABR surface
    ///
    /// # Errors
    ///
    /// Returns `ReplicationError` if:
    /// - A curve named by the instrument is missing
    /// - The swap forward cannot be computed from the curves
    /// - The adaptive integration does not converge within `max_depth`
    pub fn present_value<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        let context = CmsContext::new(cap_floor, market, &self.config)?;
        let smile = self.smile(&context, market);
        context.replicate(&smile)
    }

    /// Sensitivity to the zero rates of every curve.
    ///
    /// Combines the payment discount factor with the forward dependence of
    /// the replication, chained through the underlying swap's par rate.
    pub fn present_value_curve_sensitivity<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<CurveSensitivity, ReplicationError> {
        let context = CmsContext::new(cap_floor, market, &self.config)?;
        let smile = self.smile(&context, market);
        let price = context.replicate(&smile)?;

        let strike = context.strike;
        let delta = DeltaIntegrand::new(&context.kernel, &smile, strike, context.is_cap);
        let strike_part = context.kernel.k(strike) * delta.price_derivative(strike);
        let integral_part = context.integrate(|x| delta.evaluate(x))?;
        let delta_forward = context.discount_factor * (strike_part + integral_part) * context.scale;
        tracing::debug!(delta_forward, "CMS forward sensitivity");

        let payment_time = cap_floor.payment_time();
        let mut result = CurveSensitivity::new();
        result.add_point(cap_floor.funding_curve(), payment_time, -payment_time * price);

        let forward_sensitivity = cap_floor.swap().par_rate_sensitivity(market.curves())?;
        Ok(result
            .plus(&forward_sensitivity.multiplied_by(delta_forward))
            .cleaned())
    }

    /// Sensitivity to SABR alpha, rho and nu at the smile's (expiry, maturity).
    ///
    /// # Errors
    ///
    /// Same conditions as [`present_value`](Self::present_value).
    pub fn present_value_sabr_sensitivity<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<SabrSensitivity, ReplicationError> {
        let context = CmsContext::new(cap_floor, market, &self.config)?;
        let smile = self.smile(&context, market);
        let strike = context.strike;
        let vega = VegaIntegrand::new(&context.kernel, &smile, strike, context.is_cap, context.factor);
        let at_strike = smile.adjoint(strike, context.is_cap);
        let strike_weight = context.factor * context.kernel.k(strike) * at_strike.black.volatility;

        let mut result = SabrSensitivity::new();
        for parameter in SabrParameter::ALL {
            let strike_part = strike_weight * at_strike.volatility.parameter(parameter);
            let integral_part = context.integrate(|x| vega.evaluate(x, parameter))?;
            let amount = (strike_part + integral_part) * context.discount_factor * context.scale;
            tracing::debug!(?parameter, amount, "CMS SABR sensitivity");
            result.add(context.expiry, context.maturity, parameter, amount);
        }
        Ok(result)
    }

    /// Derivative of the present value with respect to the strike.
    ///
    /// The contribution of the far end of the cap window is ignored.
    pub fn present_value_strike_sensitivity<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        let context = CmsContext::new(cap_floor, market, &self.config)?;
        let smile = self.smile(&context, market);
        let strike = context.strike;
        let is_cap = context.is_cap;

        let (kp, _) = context.kernel.kp_kpp(strike);
        let at_strike = smile.adjoint(strike, is_cap);
        let boundary = -kp * at_strike.black.price;
        let smile_part = context.kernel.k(strike) * at_strike.strike_derivative();
        let strike_integrand = StrikeIntegrand::new(&context.kernel, &smile, is_cap);
        let integral_part = context.integrate(|x| strike_integrand.evaluate(x))?;

        let sensitivity = context.scale
            * context.discount_factor
            * context.factor
            * (boundary + smile_part + integral_part);
        tracing::debug!(sensitivity, "CMS strike sensitivity");
        Ok(sensitivity)
    }
}

impl CmsReplication for CapFloorCmsSabrReplicationMethod {
    fn cap_floor_present_value<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        self.present_value(cap_floor, market)
    }
}

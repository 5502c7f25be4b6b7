//! SABR replication of CMS coupons.

use pricer_core::market_data::CurveSensitivity;
use pricer_models::instruments::{CapFloorCms, CouponCms};
use pricer_models::models::sabr::SABRProvider;

use super::capfloor::CapFloorCmsSabrReplicationMethod;
use super::CmsReplication;
use crate::config::ReplicationConfig;
use crate::error::ReplicationError;
use crate::market::SABRMarketData;
use crate::sensitivity::SabrSensitivity;

/// Prices CMS coupons as CMS caps struck at zero.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveEnum, CurveSet};
/// use pricer_models::instruments::{CouponCms, FixedFloatSwap};
/// use pricer_models::models::sabr::{SABRParameters, SABRSurface};
/// use pricer_models::schedules::Frequency;
/// use pricer_pricing::market::SABRMarketData;
/// use pricer_pricing::replication::CouponCmsSabrReplicationMethod;
///
/// let curves = CurveSet::new()
///     .with_curve("DSC", CurveEnum::flat(0.02))
///     .with_curve("FWD", CurveEnum::flat(0.025));
/// let sabr = SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap());
/// let market = SABRMarketData::new(curves, sabr);
///
/// let swap = FixedFloatSwap::from_tenor(5.0, 10.0, Frequency::Quarterly, Frequency::Quarterly, "DSC", "FWD").unwrap();
/// let coupon = CouponCms::new(5.25, 0.25, 1_000_000.0, 5.0, swap, 5.0).unwrap();
///
/// let pv = CouponCmsSabrReplicationMethod::default()
///     .present_value(&coupon, &market)
///     .unwrap();
/// // Convexity lifts the coupon above the discounted forward
/// let forward_value = 0.025 * 0.25 * 1_000_000.0 * (-0.02_f64 * 5.25).exp();
/// assert!(pv > forward_value);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CouponCmsSabrReplicationMethod {
    cap_method: CapFloorCmsSabrReplicationMethod,
}

impl CouponCmsSabrReplicationMethod {
    /// Method with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ReplicationError::InvalidConfig` on the same conditions as
    /// [`CapFloorCmsSabrReplicationMethod::new`].
    pub fn new(config: ReplicationConfig) -> Result<Self, ReplicationError> {
        Ok(Self {
            cap_method: CapFloorCmsSabrReplicationMethod::new(config)?,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReplicationConfig {
        self.cap_method.config()
    }

    fn as_cap(coupon: &CouponCms) -> Result<CapFloorCms, ReplicationError> {
        Ok(CapFloorCms::from_coupon(coupon, 0.0, true)?)
    }

    /// Present value of the coupon, replicated as a cap struck at zero.
    ///
    /// # Errors
    ///
    /// Returns `ReplicationError` if a curve is missing or the integration
    /// does not converge.
    pub fn present_value<S: SABRProvider>(
        &self,
        coupon: &CouponCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        self.cap_method.present_value(&Self::as_cap(coupon)?, market)
    }

    /// Sensitivity to the zero rates of every curve.
    pub fn present_value_curve_sensitivity<S: SABRProvider>(
        &self,
        coupon: &CouponCms,
        market: &SABRMarketData<S>,
    ) -> Result<CurveSensitivity, ReplicationError> {
        self.cap_method
            .present_value_curve_sensitivity(&Self::as_cap(coupon)?, market)
    }

    /// Sensitivity to SABR alpha, rho and nu.
    pub fn present_value_sabr_sensitivity<S: SABRProvider>(
        &self,
        coupon: &CouponCms,
        market: &SABRMarketData<S>,
    ) -> Result<SabrSensitivity, ReplicationError> {
        self.cap_method
            .present_value_sabr_sensitivity(&Self::as_cap(coupon)?, market)
    }
}

impl CmsReplication for CouponCmsSabrReplicationMethod {
    fn cap_floor_present_value<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        self.cap_method.present_value(cap_floor, market)
    }

    fn coupon_present_value<S: SABRProvider>(
        &self,
        coupon: &CouponCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        self.present_value(coupon, market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::{CurveEnum, CurveSet};
    use pricer_models::instruments::FixedFloatSwap;
    use pricer_models::models::sabr::{SABRParameters, SABRSurface, SabrParameter};
    use pricer_models::schedules::Frequency;

    fn setup() -> (CouponCms, SABRMarketData<SABRSurface>) {
        let curves = CurveSet::new()
            .with_curve("DSC", CurveEnum::flat(0.02))
            .with_curve("FWD", CurveEnum::flat(0.025));
        let sabr = SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap());
        let swap = FixedFloatSwap::from_tenor(
            2.0,
            5.0,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            "DSC",
            "FWD",
        )
        .unwrap();
        let coupon = CouponCms::new(2.5, 0.5, 1_000_000.0, 2.0, swap, 2.0).unwrap();
        (coupon, SABRMarketData::new(curves, sabr))
    }

    #[test]
    fn test_coupon_includes_convexity() {
        let (coupon, market) = setup();
        let pv = CouponCmsSabrReplicationMethod::default()
            .present_value(&coupon, &market)
            .unwrap();
        let forward = market.forward(coupon.swap()).unwrap();
        let df = market.discount_factor("DSC", 2.5).unwrap();
        let naive = forward * 1_000_000.0 * 0.5 * df;
        assert!(pv > naive, "pv {} naive {}", pv, naive);
        assert!(pv < 1.10 * naive);
    }

    #[test]
    fn test_trait_coupon_matches_method() {
        let (coupon, market) = setup();
        let method = CouponCmsSabrReplicationMethod::default();
        assert_eq!(
            method.coupon_present_value(&coupon, &market).unwrap(),
            method.present_value(&coupon, &market).unwrap()
        );
    }

    #[test]
    fn test_sensitivities_delegate_to_cap_at_zero() {
        let (coupon, market) = setup();
        let method = CouponCmsSabrReplicationMethod::default();
        let cap = CapFloorCms::from_coupon(&coupon, 0.0, true).unwrap();
        let cap_method = CapFloorCmsSabrReplicationMethod::default();

        let vega = method.present_value_sabr_sensitivity(&coupon, &market).unwrap();
        let cap_vega = cap_method.present_value_sabr_sensitivity(&cap, &market).unwrap();
        assert_eq!(vega, cap_vega);
        assert!(vega.get(2.0, 5.0, SabrParameter::Nu) > 0.0);

        let delta = method.present_value_curve_sensitivity(&coupon, &market).unwrap();
        let cap_delta = cap_method.present_value_curve_sensitivity(&cap, &market).unwrap();
        assert_eq!(delta, cap_delta);
    }
}

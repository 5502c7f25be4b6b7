//! Replication on a SABR smile with a power-law right tail.
//!
//! Prices only. The tail keeps the cap integral finite for heavy-winged
//! smiles where the raw Hagan formula over-prices far out-of-the-money
//! strikes.

use pricer_models::instruments::{CapFloorCms, CouponCms};
use pricer_models::models::sabr::{SABRExtrapolationRight, SABRProvider};

use super::{CmsContext, CmsReplication};
use crate::config::{ExtrapolationConfig, ReplicationConfig};
use crate::error::ReplicationError;
use crate::market::SABRMarketData;

/// CMS cap/floor replication on [`SABRExtrapolationRight`].
///
/// The smile is used unfloored: strikes below the cut-off go straight to
/// the Hagan formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapFloorCmsSabrExtrapolationRightReplicationMethod {
    config: ReplicationConfig,
    extrapolation: ExtrapolationConfig,
}

impl CapFloorCmsSabrExtrapolationRightReplicationMethod {
    /// Method with validated replication and tail settings.
    ///
    /// # Errors
    ///
    /// Returns `ReplicationError::InvalidConfig` if either configuration
    /// fails validation (for instance a tail exponent `mu <= 0`).
    pub fn new(
        config: ReplicationConfig,
        extrapolation: ExtrapolationConfig,
    ) -> Result<Self, ReplicationError> {
        config.validate()?;
        extrapolation.validate()?;
        Ok(Self {
            config,
            extrapolation,
        })
    }

    /// Default replication settings with the given tail.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_pricing::replication::CapFloorCmsSabrExtrapolationRightReplicationMethod;
    ///
    /// let method = CapFloorCmsSabrExtrapolationRightReplicationMethod::with_tail(0.08, 2.5).unwrap();
    /// assert_eq!(method.extrapolation().cut_off_strike, 0.08);
    /// assert!(CapFloorCmsSabrExtrapolationRightReplicationMethod::with_tail(0.08, 0.0).is_err());
    /// ```
    pub fn with_tail(cut_off_strike: f64, mu: f64) -> Result<Self, ReplicationError> {
        Self::new(
            ReplicationConfig::default(),
            ExtrapolationConfig::new(cut_off_strike, mu),
        )
    }

    /// Replication settings.
    pub fn config(&self) -> &ReplicationConfig {
        &self.config
    }

    /// Tail settings.
    pub fn extrapolation(&self) -> &ExtrapolationConfig {
        &self.extrapolation
    }

    /// Present value on the extrapolated smile.
    ///
    /// # Errors
    ///
    /// Returns `ReplicationError::Sabr` if the tail cannot be fitted at the
    /// cut-off, otherwise the same conditions as the plain replication.
    pub fn present_value<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        let context = CmsContext::new(cap_floor, market, &self.config)?;
        let smile = SABRExtrapolationRight::new(
            market.sabr().parameters(context.expiry, context.maturity),
            context.forward,
            context.expiry,
            self.extrapolation.cut_off_strike,
            self.extrapolation.mu,
        )?;
        context.replicate(&smile)
    }
}

impl CmsReplication for CapFloorCmsSabrExtrapolationRightReplicationMethod {
    fn cap_floor_present_value<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        self.present_value(cap_floor, market)
    }
}

/// CMS coupon replication on [`SABRExtrapolationRight`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponCmsSabrExtrapolationRightReplicationMethod {
    cap_method: CapFloorCmsSabrExtrapolationRightReplicationMethod,
}

impl CouponCmsSabrExtrapolationRightReplicationMethod {
    /// Method with validated replication and tail settings.
    ///
    /// # Errors
    ///
    /// See [`CapFloorCmsSabrExtrapolationRightReplicationMethod::new`].
    pub fn new(
        config: ReplicationConfig,
        extrapolation: ExtrapolationConfig,
    ) -> Result<Self, ReplicationError> {
        Ok(Self {
            cap_method: CapFloorCmsSabrExtrapolationRightReplicationMethod::new(config, extrapolation)?,
        })
    }

    /// Default replication settings with the given tail.
    pub fn with_tail(cut_off_strike: f64, mu: f64) -> Result<Self, ReplicationError> {
        Ok(Self {
            cap_method: CapFloorCmsSabrExtrapolationRightReplicationMethod::with_tail(cut_off_strike, mu)?,
        })
    }

    /// Present value of the coupon as a zero-strike cap on the extrapolated smile.
    pub fn present_value<S: SABRProvider>(
        &self,
        coupon: &CouponCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        let cap = CapFloorCms::from_coupon(coupon, 0.0, true)?;
        self.cap_method.present_value(&cap, market)
    }
}

impl CmsReplication for CouponCmsSabrExtrapolationRightReplicationMethod {
    fn cap_floor_present_value<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        self.cap_method.present_value(cap_floor, market)
    }
}

//! CMS cap/floor.

use crate::instruments::error::InstrumentError;

use super::{CouponCms, FixedFloatSwap};

/// Caplet or floorlet on a CMS rate:
/// `notional · accrual · max(ω(S − K), 0)` with `ω = ±1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapFloorCms {
    coupon: CouponCms,
    strike: f64,
    is_cap: bool,
}

impl CapFloorCms {
    /// Create a CMS cap/floor.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        payment_time: f64,
        accrual: f64,
        notional: f64,
        fixing_time: f64,
        swap: FixedFloatSwap,
        settlement_time: f64,
        strike: f64,
        is_cap: bool,
    ) -> Result<Self, InstrumentError> {
        let coupon = CouponCms::new(payment_time, accrual, notional, fixing_time, swap, settlement_time)?;
        Self::from_coupon(&coupon, strike, is_cap)
    }

    /// Cap/floor with the same dates, notional and underlying as `coupon`.
    ///
    /// A coupon is the cap struck at zero.
    pub fn from_coupon(coupon: &CouponCms, strike: f64, is_cap: bool) -> Result<Self, InstrumentError> {
        if !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        Ok(Self {
            coupon: coupon.clone(),
            strike,
            is_cap,
        })
    }

    /// Same option with another strike.
    pub fn with_strike(&self, strike: f64) -> Result<Self, InstrumentError> {
        Self::from_coupon(&self.coupon, strike, self.is_cap)
    }

    /// Underlying coupon.
    pub fn coupon(&self) -> &CouponCms {
        &self.coupon
    }

    /// Strike.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Cap (`true`) or floor.
    pub fn is_cap(&self) -> bool {
        self.is_cap
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.coupon.payment_time()
    }

    /// Accrual fraction.
    pub fn accrual(&self) -> f64 {
        self.coupon.accrual()
    }

    /// Notional.
    pub fn notional(&self) -> f64 {
        self.coupon.notional()
    }

    /// Fixing time.
    pub fn fixing_time(&self) -> f64 {
        self.coupon.fixing_time()
    }

    /// Underlying swap.
    pub fn swap(&self) -> &FixedFloatSwap {
        self.coupon.swap()
    }

    /// Settlement time of the underlying swap.
    pub fn settlement_time(&self) -> f64 {
        self.coupon.settlement_time()
    }

    /// Discounting curve name.
    pub fn funding_curve(&self) -> &str {
        self.coupon.funding_curve()
    }

    /// Payoff per unit notional and accrual for a realised rate.
    pub fn payoff(&self, rate: f64) -> f64 {
        if self.is_cap {
            (rate - self.strike).max(0.0)
        } else {
            (self.strike - rate).max(0.0)
        }
    }
}

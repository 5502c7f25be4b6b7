//! CMS coupon paying the fixing of a swap rate.

use crate::instruments::error::{check_time, InstrumentError};

use super::FixedFloatSwap;

/// Coupon paying `notional · accrual · S(fixing_time)` at `payment_time`,
/// where `S` is the par rate of the underlying swap.
///
/// The swap's own fixed rate and notional play no part in valuation; only
/// its schedule and curve names are used.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponCms {
    payment_time: f64,
    accrual: f64,
    notional: f64,
    fixing_time: f64,
    swap: FixedFloatSwap,
    settlement_time: f64,
}

impl CouponCms {
    /// Create a CMS coupon.
    ///
    /// # Errors
    ///
    /// Returns an [`InstrumentError`] when a time is negative, the fixing is
    /// after the payment, or the notional/accrual is not finite.
    pub fn new(
        payment_time: f64,
        accrual: f64,
        notional: f64,
        fixing_time: f64,
        swap: FixedFloatSwap,
        settlement_time: f64,
    ) -> Result<Self, InstrumentError> {
        check_time("payment", payment_time)?;
        check_time("fixing", fixing_time)?;
        check_time("settlement", settlement_time)?;
        if fixing_time > payment_time {
            return Err(InstrumentError::InvalidTime {
                name: "fixing",
                time: fixing_time,
            });
        }
        if !notional.is_finite() {
            return Err(InstrumentError::InvalidNotional { notional });
        }
        if !(accrual > 0.0) || !accrual.is_finite() {
            return Err(InstrumentError::InvalidTime {
                name: "accrual",
                time: accrual,
            });
        }
        Ok(Self {
            payment_time,
            accrual,
            notional,
            fixing_time,
            swap,
            settlement_time,
        })
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual fraction of the coupon.
    pub fn accrual(&self) -> f64 {
        self.accrual
    }

    /// Notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixing time of the swap rate.
    pub fn fixing_time(&self) -> f64 {
        self.fixing_time
    }

    /// Underlying swap.
    pub fn swap(&self) -> &FixedFloatSwap {
        &self.swap
    }

    /// Settlement time of the underlying swap.
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Name of the curve the coupon is discounted on.
    pub fn funding_curve(&self) -> &str {
        self.swap.discount_curve()
    }

    /// Same coupon with a different notional.
    pub fn with_notional(&self, notional: f64) -> Result<Self, InstrumentError> {
        Self::new(
            self.payment_time,
            self.accrual,
            notional,
            self.fixing_time,
            self.swap.clone(),
            self.settlement_time,
        )
    }
}

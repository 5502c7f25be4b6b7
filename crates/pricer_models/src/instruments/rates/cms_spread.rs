//! Cap/floor on the spread between two CMS rates.

use crate::instruments::error::{check_time, InstrumentError};

use super::{CapFloorCms, CouponCms, FixedFloatSwap};

/// Option paying `notional · accrual · max(ω(S₁ − S₂ − K), 0)`.
///
/// Both underlying swaps must discount on the same curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapFloorCmsSpread {
    payment_time: f64,
    accrual: f64,
    notional: f64,
    fixing_time: f64,
    swap1: FixedFloatSwap,
    swap2: FixedFloatSwap,
    settlement_time: f64,
    strike: f64,
    is_cap: bool,
}

impl CapFloorCmsSpread {
    /// Create a CMS spread cap/floor.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::MismatchedDiscountCurves`] when the swaps use
    /// different discount curves, plus the usual time/notional/strike checks.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        payment_time: f64,
        accrual: f64,
        notional: f64,
        fixing_time: f64,
        swap1: FixedFloatSwap,
        swap2: FixedFloatSwap,
        settlement_time: f64,
        strike: f64,
        is_cap: bool,
    ) -> Result<Self, InstrumentError> {
        if swap1.discount_curve() != swap2.discount_curve() {
            return Err(InstrumentError::MismatchedDiscountCurves {
                first: swap1.discount_curve().to_string(),
                second: swap2.discount_curve().to_string(),
            });
        }
        check_time("settlement", settlement_time)?;
        if !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        // Validates the remaining coupon fields
        CouponCms::new(payment_time, accrual, notional, fixing_time, swap1.clone(), settlement_time)?;
        Ok(Self {
            payment_time,
            accrual,
            notional,
            fixing_time,
            swap1,
            swap2,
            settlement_time,
            strike,
            is_cap,
        })
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual fraction.
    pub fn accrual(&self) -> f64 {
        self.accrual
    }

    /// Notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixing time of both rates.
    pub fn fixing_time(&self) -> f64 {
        self.fixing_time
    }

    /// Swap of the first (long) rate.
    pub fn swap1(&self) -> &FixedFloatSwap {
        &self.swap1
    }

    /// Swap of the second (short) rate.
    pub fn swap2(&self) -> &FixedFloatSwap {
        &self.swap2
    }

    /// Settlement time shared by both swaps.
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Spread strike.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Cap (`true`) or floor.
    pub fn is_cap(&self) -> bool {
        self.is_cap
    }

    /// Discounting curve name shared by both legs.
    pub fn funding_curve(&self) -> &str {
        self.swap1.discount_curve()
    }

    /// Same option with a different spread strike.
    pub fn with_strike(&self, strike: f64) -> Result<Self, InstrumentError> {
        if !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        Ok(Self {
            strike,
            ..self.clone()
        })
    }

    /// CMS coupon on the first (`first = true`) or second rate.
    pub fn leg_coupon(&self, first: bool) -> Result<CouponCms, InstrumentError> {
        let swap = if first { &self.swap1 } else { &self.swap2 };
        CouponCms::new(
            self.payment_time,
            self.accrual,
            self.notional,
            self.fixing_time,
            swap.clone(),
            self.settlement_time,
        )
    }

    /// CMS cap on one of the rates, struck at `strike`.
    pub fn leg_cap(&self, first: bool, strike: f64) -> Result<CapFloorCms, InstrumentError> {
        CapFloorCms::from_coupon(&self.leg_coupon(first)?, strike, true)
    }
}

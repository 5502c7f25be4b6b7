//! Vanilla fixed-for-floating swap used as the underlying of CMS products.
//!
//! Only the schedules and curve names matter for CMS valuation; the swap
//! carries no fixed rate or notional.
//!
//! # Par rate
//!
//! ```text
//! S = Σⱼ D(pⱼ) δpⱼ Fⱼ / A,   A = Σᵢ D(tᵢ) δᵢ
//! Fⱼ = (P(sⱼ)/P(eⱼ) − 1) / δfⱼ
//! ```
//!
//! where `D` is the discount curve, `P` the forward curve, `tᵢ`/`δᵢ` the
//! fixed payment times and accruals, `pⱼ`/`δpⱼ` the float payment times and
//! accruals, and `[sⱼ, eⱼ]`/`δfⱼ` the fixing periods.

use pricer_core::market_data::{CurveSensitivity, CurveSet, MarketDataError};

use crate::instruments::error::{check_time, InstrumentError};
use crate::schedules::{Frequency, Schedule, ScheduleBuilder};

/// Fixed leg: payment times and accrual fractions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedLeg {
    payment_times: Vec<f64>,
    accruals: Vec<f64>,
}

impl FixedLeg {
    /// Build a fixed leg from parallel vectors.
    pub fn new(payment_times: Vec<f64>, accruals: Vec<f64>) -> Result<Self, InstrumentError> {
        if payment_times.is_empty() {
            return Err(InstrumentError::EmptyLeg { leg: "fixed" });
        }
        if payment_times.len() != accruals.len() {
            return Err(InstrumentError::NonVanillaSwap {
                message: format!(
                    "fixed leg has {} payment times but {} accruals",
                    payment_times.len(),
                    accruals.len()
                ),
            });
        }
        for &t in &payment_times {
            check_time("fixed payment", t)?;
        }
        check_positive_accruals("fixed", &accruals)?;
        Ok(Self {
            payment_times,
            accruals,
        })
    }

    /// Fixed leg paying at each period end of `schedule`.
    pub fn from_schedule(schedule: &Schedule) -> Result<Self, InstrumentError> {
        Self::new(schedule.payment_times(), schedule.accruals())
    }

    /// Payment times.
    pub fn payment_times(&self) -> &[f64] {
        &self.payment_times
    }

    /// Accrual fractions.
    pub fn accruals(&self) -> &[f64] {
        &self.accruals
    }

    /// Number of payments.
    pub fn len(&self) -> usize {
        self.payment_times.len()
    }

    /// Always false: construction rejects empty legs.
    pub fn is_empty(&self) -> bool {
        self.payment_times.is_empty()
    }
}

/// Floating leg: fixing periods, payment times and accruals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatLeg {
    fixing_start_times: Vec<f64>,
    fixing_end_times: Vec<f64>,
    fixing_accruals: Vec<f64>,
    payment_times: Vec<f64>,
    payment_accruals: Vec<f64>,
}

impl FloatLeg {
    /// Build a floating leg from parallel vectors.
    pub fn new(
        fixing_start_times: Vec<f64>,
        fixing_end_times: Vec<f64>,
        fixing_accruals: Vec<f64>,
        payment_times: Vec<f64>,
        payment_accruals: Vec<f64>,
    ) -> Result<Self, InstrumentError> {
        let n = payment_times.len();
        if n == 0 {
            return Err(InstrumentError::EmptyLeg { leg: "float" });
        }
        if [
            fixing_start_times.len(),
            fixing_end_times.len(),
            fixing_accruals.len(),
            payment_accruals.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(InstrumentError::NonVanillaSwap {
                message: "float leg vectors have different lengths".to_string(),
            });
        }
        for ((&start, &end), &pay) in fixing_start_times
            .iter()
            .zip(&fixing_end_times)
            .zip(&payment_times)
        {
            check_time("fixing start", start)?;
            check_time("payment", pay)?;
            if !(end > start) {
                return Err(InstrumentError::InvalidTime {
                    name: "fixing end",
                    time: end,
                });
            }
        }
        check_positive_accruals("float fixing", &fixing_accruals)?;
        check_positive_accruals("float payment", &payment_accruals)?;
        Ok(Self {
            fixing_start_times,
            fixing_end_times,
            fixing_accruals,
            payment_times,
            payment_accruals,
        })
    }

    /// Floating leg fixing over each period of `schedule` and paying at its end.
    pub fn from_schedule(schedule: &Schedule) -> Result<Self, InstrumentError> {
        let starts = schedule.periods().iter().map(|p| p.start()).collect();
        let ends = schedule.periods().iter().map(|p| p.end()).collect();
        let accruals = schedule.accruals();
        Self::new(starts, ends, accruals.clone(), schedule.payment_times(), accruals)
    }

    /// Fixing period start times.
    pub fn fixing_start_times(&self) -> &[f64] {
        &self.fixing_start_times
    }

    /// Fixing period end times.
    pub fn fixing_end_times(&self) -> &[f64] {
        &self.fixing_end_times
    }

    /// Fixing period accrual fractions.
    pub fn fixing_accruals(&self) -> &[f64] {
        &self.fixing_accruals
    }

    /// Payment times.
    pub fn payment_times(&self) -> &[f64] {
        &self.payment_times
    }

    /// Payment accrual fractions.
    pub fn payment_accruals(&self) -> &[f64] {
        &self.payment_accruals
    }

    /// Number of coupons.
    pub fn len(&self) -> usize {
        self.payment_times.len()
    }

    /// Always false: construction rejects empty legs.
    pub fn is_empty(&self) -> bool {
        self.payment_times.is_empty()
    }
}

fn check_positive_accruals(leg: &str, accruals: &[f64]) -> Result<(), InstrumentError> {
    match accruals.iter().position(|&a| !(a > 0.0) || !a.is_finite()) {
        Some(i) => Err(InstrumentError::NonVanillaSwap {
            message: format!("{} accrual {} is {}", leg, i, accruals[i]),
        }),
        None => Ok(()),
    }
}

/// Vanilla fixed/float swap referenced by CMS instruments.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveEnum, CurveSet};
/// use pricer_models::instruments::rates::FixedFloatSwap;
/// use pricer_models::schedules::Frequency;
///
/// let swap = FixedFloatSwap::from_tenor(
///     5.0, 10.0, Frequency::Quarterly, Frequency::Quarterly, "DSC", "FWD",
/// )
/// .unwrap();
/// assert_eq!(swap.nb_fixed_periods(), 40);
/// assert_eq!(swap.fixed_periods_per_year(), 4);
/// assert!((swap.maturity() - 10.0).abs() < 1e-12);
///
/// let curves = CurveSet::new()
///     .with_curve("DSC", CurveEnum::flat(0.02))
///     .with_curve("FWD", CurveEnum::flat(0.02));
/// let rate = swap.par_rate(&curves).unwrap();
/// // Single curve: quarterly compounded equivalent of 2% continuous
/// assert!((rate - 4.0 * ((0.02_f64 / 4.0).exp() - 1.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedFloatSwap {
    settlement_time: f64,
    fixed_leg: FixedLeg,
    float_leg: FloatLeg,
    discount_curve: String,
    forward_curve: String,
}

impl FixedFloatSwap {
    /// Assemble a swap from its legs.
    ///
    /// # Errors
    ///
    /// Rejects negative settlement times and fixed payments before settlement.
    pub fn new(
        settlement_time: f64,
        fixed_leg: FixedLeg,
        float_leg: FloatLeg,
        discount_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        check_time("settlement", settlement_time)?;
        if let Some(&t) = fixed_leg.payment_times().iter().find(|&&t| t < settlement_time) {
            return Err(InstrumentError::InvalidTime {
                name: "fixed payment",
                time: t,
            });
        }
        Ok(Self {
            settlement_time,
            fixed_leg,
            float_leg,
            discount_curve: discount_curve.into(),
            forward_curve: forward_curve.into(),
        })
    }

    /// Regular swap starting at `settlement_time` and running for `tenor` years.
    pub fn from_tenor(
        settlement_time: f64,
        tenor: f64,
        fixed_frequency: Frequency,
        float_frequency: Frequency,
        discount_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        let fixed = ScheduleBuilder::new()
            .start(settlement_time)
            .tenor(tenor)
            .frequency(fixed_frequency)
            .build()?;
        let float = ScheduleBuilder::new()
            .start(settlement_time)
            .tenor(tenor)
            .frequency(float_frequency)
            .build()?;
        Self::new(
            settlement_time,
            FixedLeg::from_schedule(&fixed)?,
            FloatLeg::from_schedule(&float)?,
            discount_curve,
            forward_curve,
        )
    }

    /// Settlement (start) time.
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Fixed leg.
    pub fn fixed_leg(&self) -> &FixedLeg {
        &self.fixed_leg
    }

    /// Floating leg.
    pub fn float_leg(&self) -> &FloatLeg {
        &self.float_leg
    }

    /// Name of the discounting curve.
    pub fn discount_curve(&self) -> &str {
        &self.discount_curve
    }

    /// Name of the forward projection curve.
    pub fn forward_curve(&self) -> &str {
        &self.forward_curve
    }

    /// Number of fixed-leg payments.
    pub fn nb_fixed_periods(&self) -> usize {
        self.fixed_leg.len()
    }

    /// Fixed payments per year, from the first fixed accrual.
    pub fn fixed_periods_per_year(&self) -> u32 {
        (1.0 / self.fixed_leg.accruals()[0]).round().max(1.0) as u32
    }

    /// Last fixed payment time minus settlement time.
    pub fn maturity(&self) -> f64 {
        self.fixed_leg.payment_times()[self.fixed_leg.len() - 1] - self.settlement_time
    }

    /// Present value of one unit of fixed rate: `Σ D(tᵢ) δᵢ`.
    pub fn annuity(&self, curves: &CurveSet) -> Result<f64, MarketDataError> {
        let mut annuity = 0.0;
        for (&t, &accrual) in self.fixed_leg.payment_times().iter().zip(self.fixed_leg.accruals()) {
            annuity += curves.discount_factor(&self.discount_curve, t)? * accrual;
        }
        Ok(annuity)
    }

    fn float_coupons(&self, curves: &CurveSet) -> Result<Vec<FloatCoupon>, MarketDataError> {
        let leg = &self.float_leg;
        let mut coupons = Vec::with_capacity(leg.len());
        for j in 0..leg.len() {
            let start = leg.fixing_start_times[j];
            let end = leg.fixing_end_times[j];
            let payment = leg.payment_times[j];
            let df_start = curves.discount_factor(&self.forward_curve, start)?;
            let df_end = curves.discount_factor(&self.forward_curve, end)?;
            coupons.push(FloatCoupon {
                start,
                end,
                payment,
                fixing_accrual: leg.fixing_accruals[j],
                payment_accrual: leg.payment_accruals[j],
                df_start,
                df_end,
                df_payment: curves.discount_factor(&self.discount_curve, payment)?,
            });
        }
        Ok(coupons)
    }

    /// Present value of the floating leg per unit notional.
    pub fn float_leg_value(&self, curves: &CurveSet) -> Result<f64, MarketDataError> {
        Ok(self
            .float_coupons(curves)?
            .iter()
            .map(|c| c.df_payment * c.payment_accrual * c.forward())
            .sum())
    }

    /// Par swap rate.
    pub fn par_rate(&self, curves: &CurveSet) -> Result<f64, MarketDataError> {
        Ok(self.float_leg_value(curves)? / self.annuity(curves)?)
    }

    /// Sensitivity of the par rate to the zero rates of the discount and
    /// forward curves, as `(time, ∂S/∂z(time))` points.
    pub fn par_rate_sensitivity(&self, curves: &CurveSet) -> Result<CurveSensitivity, MarketDataError> {
        let annuity = self.annuity(curves)?;
        let coupons = self.float_coupons(curves)?;
        let float_value: f64 = coupons
            .iter()
            .map(|c| c.df_payment * c.payment_accrual * c.forward())
            .sum();
        let rate = float_value / annuity;

        let mut sensitivity = CurveSensitivity::new();
        for c in &coupons {
            // Float leg numerator through the discount curve
            sensitivity.add_point(
                &self.discount_curve,
                c.payment,
                c.payment_accrual * c.forward() / annuity * (-c.payment * c.df_payment),
            );
            // Forward rate through the projection curve
            let weight = c.df_payment * c.payment_accrual / annuity;
            let denominator = c.df_end * c.fixing_accrual;
            sensitivity.add_point(
                &self.forward_curve,
                c.start,
                weight * (-c.start * c.df_start) / denominator,
            );
            sensitivity.add_point(
                &self.forward_curve,
                c.end,
                weight * c.end * c.df_start / denominator,
            );
        }
        // Annuity denominator
        for (&t, &accrual) in self.fixed_leg.payment_times().iter().zip(self.fixed_leg.accruals()) {
            let df = curves.discount_factor(&self.discount_curve, t)?;
            sensitivity.add_point(&self.discount_curve, t, rate * accrual * t * df / annuity);
        }
        Ok(sensitivity.cleaned())
    }
}

struct FloatCoupon {
    start: f64,
    end: f64,
    payment: f64,
    fixing_accrual: f64,
    payment_accrual: f64,
    df_start: f64,
    df_end: f64,
    df_payment: f64,
}

impl FloatCoupon {
    #[inline]
    fn forward(&self) -> f64 {
        (self.df_start / self.df_end - 1.0) / self.fixing_accrual
    }
}

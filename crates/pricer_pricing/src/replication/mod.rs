//! Static replication of CMS payoffs under SABR.
//!
//! A CMS cap/floor paying `(S − K)⁺` at the payment date is priced as
//!
//! ```text
//! PV = N · δ · DF · n(F) · [ k(K)·C(K) + ∫_K^(K+W) (k″(x)(x − K) + 2k′(x))·C(x) dx ]
//! ```
//!
//! where `C` is the undiscounted payer swaption price under the annuity
//! measure and `n = g/h`. A floor uses receiver prices `P`, integrates over
//! `[0, max(K, 0)]` and subtracts the integral.
//!
//! This module provides:
//! - [`ConvexityKernel`]: `g`, `h`, `k` and their derivatives
//! - [`CapFloorCmsSabrReplicationMethod`]: price and sensitivities of cap/floors
//! - [`CouponCmsSabrReplicationMethod`]: the same for CMS coupons
//! - Extrapolated-tail variants of both (price only)
//! - [`CmsReplication`]: the pricing contract shared by all of them

mod capfloor;
pub mod convexity;
mod coupon;
mod extrapolation;
pub mod integrand;

pub use capfloor::CapFloorCmsSabrReplicationMethod;
pub use convexity::{ConvexityKernel, RATE_EPS};
pub use coupon::CouponCmsSabrReplicationMethod;
pub use extrapolation::{
    CapFloorCmsSabrExtrapolationRightReplicationMethod,
    CouponCmsSabrExtrapolationRightReplicationMethod,
};

use pricer_core::math::integrators::{Integrator, RungeKuttaIntegrator};
use pricer_models::instruments::{CapFloorCms, CouponCms};
use pricer_models::models::sabr::{SABRProvider, SmileFunction};

use crate::config::ReplicationConfig;
use crate::error::ReplicationError;
use crate::market::SABRMarketData;
use integrand::PriceIntegrand;

/// Bisections forced on every initial replication panel.
const MIN_DEPTH: usize = 1;

/// Present values of CMS coupons and cap/floors by replication.
///
/// The spread method is generic over this trait so that either the plain
/// or the extrapolated smile can price its legs.
pub trait CmsReplication {
    /// Present value of a CMS cap/floor.
    fn cap_floor_present_value<S: SABRProvider>(
        &self,
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError>;

    /// Present value of a CMS coupon, priced as a cap struck at zero.
    fn coupon_present_value<S: SABRProvider>(
        &self,
        coupon: &CouponCms,
        market: &SABRMarketData<S>,
    ) -> Result<f64, ReplicationError> {
        let cap = CapFloorCms::from_coupon(coupon, 0.0, true)?;
        self.cap_floor_present_value(&cap, market)
    }
}

/// Market quantities fixed for one pricing call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CmsContext {
    pub forward: f64,
    pub discount_factor: f64,
    pub expiry: f64,
    pub maturity: f64,
    pub strike: f64,
    pub is_cap: bool,
    /// `notional · accrual`
    pub scale: f64,
    /// `g(F) / h(F)`
    pub factor: f64,
    pub kernel: ConvexityKernel,
    pub lower: f64,
    pub upper: f64,
    /// Smile strike floor when it falls inside the window
    pub breakpoint: Option<f64>,
    pub integrator: RungeKuttaIntegrator,
}

impl CmsContext {
    pub fn new<S: SABRProvider>(
        cap_floor: &CapFloorCms,
        market: &SABRMarketData<S>,
        config: &ReplicationConfig,
    ) -> Result<Self, ReplicationError> {
        let swap = cap_floor.swap();
        let forward = market.forward(swap)?;
        let discount_factor =
            market.discount_factor(cap_floor.funding_curve(), cap_floor.payment_time())?;
        let kernel = ConvexityKernel::from_swap(
            swap,
            cap_floor.payment_time(),
            cap_floor.settlement_time(),
        );
        let strike = cap_floor.strike();
        let is_cap = cap_floor.is_cap();
        let scale = cap_floor.notional() * cap_floor.accrual();
        let (lower, upper) = if is_cap {
            (strike, strike + config.integration_interval)
        } else {
            (0.0, strike.max(0.0))
        };
        let absolute_tolerance =
            config.price_tolerance / (discount_factor * cap_floor.notional().abs() * cap_floor.accrual());
        let integrator = RungeKuttaIntegrator::new(
            absolute_tolerance,
            config.relative_tolerance,
            config.min_steps,
        )
        .with_min_depth(MIN_DEPTH)
        .with_max_depth(config.max_depth);
        // The floored volatility has a kink at the floor
        let breakpoint = Some(config.strike_floor).filter(|&b| lower < b && b < upper);

        tracing::debug!(forward, discount_factor, strike, is_cap, "CMS replication context");

        Ok(Self {
            forward,
            discount_factor,
            expiry: cap_floor.fixing_time(),
            maturity: swap.maturity(),
            strike,
            is_cap,
            scale,
            factor: kernel.g(forward) / kernel.h(forward),
            kernel,
            lower,
            upper,
            breakpoint,
            integrator,
        })
    }

    /// Integrate `f` over the replication window, negated for a floor.
    ///
    /// The window is split at the strike floor when it contains it.
    pub fn integrate<F>(&self, mut f: F) -> Result<f64, ReplicationError>
    where
        F: FnMut(f64) -> f64,
    {
        let integral = match self.breakpoint {
            Some(breakpoint) => {
                self.integrator.integrate(&mut f, self.lower, breakpoint)?
                    + self.integrator.integrate(&mut f, breakpoint, self.upper)?
            }
            None => self.integrator.integrate(f, self.lower, self.upper)?,
        };
        Ok(if self.is_cap { integral } else { -integral })
    }

    /// Strike part plus integral part, scaled to a present value.
    pub fn replicate<M: SmileFunction>(&self, smile: &M) -> Result<f64, ReplicationError> {
        let integrand =
            PriceIntegrand::new(&self.kernel, smile, self.strike, self.is_cap, self.factor);
        let strike_part = self.discount_factor
            * self.factor
            * self.kernel.k(self.strike)
            * smile.price(self.strike, self.is_cap);
        let integral_part = self.discount_factor * self.integrate(|x| integrand.evaluate(x))?;
        let price = (strike_part + integral_part) * self.scale;
        tracing::debug!(strike_part, integral_part, price, "CMS replication price");
        Ok(price)
    }
}

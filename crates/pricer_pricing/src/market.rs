//! Market data consumed by the replication methods.

use pricer_core::market_data::{CurveSet, MarketDataError};
use pricer_models::instruments::FixedFloatSwap;
use pricer_models::models::sabr::SABRProvider;

/// Curves plus a SABR parameter source.
///
/// Read-only during a pricing call; `Sync` whenever `S` is, so one bundle
/// can serve parallel pricing.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveEnum, CurveSet};
/// use pricer_models::models::sabr::{SABRParameters, SABRSurface};
/// use pricer_pricing::market::SABRMarketData;
///
/// let curves = CurveSet::new().with_curve("DSC", CurveEnum::flat(0.02));
/// let sabr = SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap());
/// let market = SABRMarketData::new(curves, sabr);
/// assert!((market.discount_factor("DSC", 1.0).unwrap() - (-0.02_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Clone, Debug)]
pub struct SABRMarketData<S> {
    curves: CurveSet,
    sabr: S,
}

impl<S: SABRProvider> SABRMarketData<S> {
    /// Bundle curves and a SABR provider.
    pub fn new(curves: CurveSet, sabr: S) -> Self {
        Self { curves, sabr }
    }

    /// The curve set.
    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    /// The SABR provider.
    pub fn sabr(&self) -> &S {
        &self.sabr
    }

    /// Discount factor of curve `name` at `time`.
    pub fn discount_factor(&self, name: &str, time: f64) -> Result<f64, MarketDataError> {
        self.curves.discount_factor(name, time)
    }

    /// Par rate of `swap`.
    pub fn forward(&self, swap: &FixedFloatSwap) -> Result<f64, MarketDataError> {
        swap.par_rate(&self.curves)
    }

    /// Same SABR data on other curves.
    pub fn with_curves(&self, curves: CurveSet) -> Self
    where
        S: Clone,
    {
        Self {
            curves,
            sabr: self.sabr.clone(),
        }
    }

    /// Same curves with another SABR provider.
    pub fn with_sabr<T: SABRProvider>(&self, sabr: T) -> SABRMarketData<T> {
        SABRMarketData {
            curves: self.curves.clone(),
            sabr,
        }
    }
}

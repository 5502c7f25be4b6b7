//! Parallel pricing of CMS cap/floor strips.
//!
//! Each caplet is an independent pricing call over shared read-only market
//! data, so strips are priced with `rayon` without any coordination.

use pricer_models::instruments::CapFloorCms;
use pricer_models::models::sabr::SABRProvider;
use rayon::prelude::*;

use crate::error::ReplicationError;
use crate::market::SABRMarketData;
use crate::replication::CmsReplication;

/// Present value of every caplet, in input order.
///
/// # Errors
///
/// The first failing caplet fails the whole strip.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveEnum, CurveSet};
/// use pricer_models::instruments::{CapFloorCms, FixedFloatSwap};
/// use pricer_models::models::sabr::{SABRParameters, SABRSurface};
/// use pricer_models::schedules::Frequency;
/// use pricer_pricing::market::SABRMarketData;
/// use pricer_pricing::portfolio::present_values;
/// use pricer_pricing::replication::CapFloorCmsSabrReplicationMethod;
///
/// let curves = CurveSet::new()
///     .with_curve("DSC", CurveEnum::flat(0.02))
///     .with_curve("FWD", CurveEnum::flat(0.025));
/// let sabr = SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap());
/// let market = SABRMarketData::new(curves, sabr);
///
/// let strip: Vec<CapFloorCms> = (1..=4)
///     .map(|i| {
///         let fixing = f64::from(i);
///         let swap = FixedFloatSwap::from_tenor(fixing, 5.0, Frequency::Annual, Frequency::SemiAnnual, "DSC", "FWD").unwrap();
///         CapFloorCms::new(fixing + 1.0, 1.0, 1e6, fixing, swap, fixing, 0.03, true).unwrap()
///     })
///     .collect();
///
/// let method = CapFloorCmsSabrReplicationMethod::default();
/// let values = present_values(&method, &strip, &market).unwrap();
/// assert_eq!(values.len(), 4);
/// ```
pub fn present_values<M, S>(
    method: &M,
    cap_floors: &[CapFloorCms],
    market: &SABRMarketData<S>,
) -> Result<Vec<f64>, ReplicationError>
where
    M: CmsReplication + Sync,
    S: SABRProvider + Sync,
{
    let values = cap_floors
        .par_iter()
        .map(|cap_floor| method.cap_floor_present_value(cap_floor, market))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = values.len(), "priced CMS strip");
    Ok(values)
}

/// Sum of the caplet present values.
pub fn total_present_value<M, S>(
    method: &M,
    cap_floors: &[CapFloorCms],
    market: &SABRMarketData<S>,
) -> Result<f64, ReplicationError>
where
    M: CmsReplication + Sync,
    S: SABRProvider + Sync,
{
    Ok(present_values(method, cap_floors, market)?.iter().sum())
}

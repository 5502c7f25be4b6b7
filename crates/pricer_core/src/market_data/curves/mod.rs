//! Yield curves and named curve bundles.
//!
//! - [`YieldCurve`]: Discount factor, zero rate and forward rate contract
//! - [`FlatCurve`]: Constant continuously-compounded rate
//! - [`InterpolatedCurve`]: Zero rates at pillars, linear in between
//! - [`CurveEnum`]: Static dispatch over the concrete curves
//! - [`CurveSet`]: Curves keyed by name, as consumed by pricing methods

mod curve_enum;
mod curve_set;
mod flat;
mod interpolated;
mod traits;

pub use curve_enum::CurveEnum;
pub use curve_set::CurveSet;
pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
pub use traits::YieldCurve;

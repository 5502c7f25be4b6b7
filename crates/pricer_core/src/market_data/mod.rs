//! Market data for rates pricing.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait, flat / interpolated curves and the named
//!   [`CurveSet`] bundle
//! - [`sensitivity`]: [`CurveSensitivity`], point sensitivities to zero rates
//!   keyed by curve name
//! - [`error`]: Market data error types ([`MarketDataError`])
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{CurveEnum, CurveSet, FlatCurve, YieldCurve};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let set = CurveSet::new().with_curve("USD-OIS", CurveEnum::flat(0.05));
//! assert_eq!(set.discount_factor("USD-OIS", 1.0).unwrap(), df);
//! ```

pub mod curves;
pub mod error;
pub mod sensitivity;

pub use curves::{CurveEnum, CurveSet, FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
pub use sensitivity::CurveSensitivity;

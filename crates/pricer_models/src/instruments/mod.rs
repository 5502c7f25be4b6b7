//! Instrument value objects.
//!
//! Instruments are immutable once built: constructors validate times,
//! notionals and leg structure, and pricing methods only read them through
//! getters.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{CapFloorCms, CouponCms, FixedFloatSwap};
//! use pricer_models::schedules::Frequency;
//!
//! let swap = FixedFloatSwap::from_tenor(
//!     5.0, 10.0, Frequency::Quarterly, Frequency::Quarterly, "EUR-DSC", "EUR-E3M",
//! )
//! .unwrap();
//! let coupon = CouponCms::new(5.25, 0.25, 1_000_000.0, 5.0, swap, 5.0).unwrap();
//! let cap = CapFloorCms::from_coupon(&coupon, 0.02, true).unwrap();
//! assert!((cap.payoff(0.035) - 0.015).abs() < 1e-15);
//! ```

mod error;
pub mod rates;

pub use error::InstrumentError;
pub use rates::{CapFloorCms, CapFloorCmsSpread, CouponCms, FixedFloatSwap, FixedLeg, FloatLeg};

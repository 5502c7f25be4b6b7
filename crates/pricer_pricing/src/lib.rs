//! # Pricer Pricing (L3: Replication Engine)
//!
//! Static replication of CMS coupons, caps and floors on a SABR smile, and
//! binormal pricing of CMS spread options built on top of it.
//!
//! This crate provides:
//! - The convexity kernel `g`, `h`, `k` and the replication integrands
//!   ([`replication`])
//! - Cap/floor and coupon methods with curve, SABR and strike
//!   sensitivities, plus extrapolated-tail variants ([`replication`])
//! - The CMS spread binormal method with implied correlation ([`spread`])
//! - Parallel strip pricing ([`portfolio`])
//! - TOML-loadable configuration ([`config`]) and a single error type
//!   ([`error`])
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{CurveEnum, CurveSet};
//! use pricer_models::instruments::{CouponCms, FixedFloatSwap};
//! use pricer_models::models::sabr::{SABRParameters, SABRSurface, SabrParameter};
//! use pricer_models::schedules::Frequency;
//! use pricer_pricing::market::SABRMarketData;
//! use pricer_pricing::replication::CouponCmsSabrReplicationMethod;
//!
//! let curves = CurveSet::new()
//!     .with_curve("DSC", CurveEnum::flat(0.02))
//!     .with_curve("FWD", CurveEnum::flat(0.025));
//! let sabr = SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap());
//! let market = SABRMarketData::new(curves, sabr);
//!
//! let swap = FixedFloatSwap::from_tenor(2.0, 10.0, Frequency::SemiAnnual, Frequency::Quarterly, "DSC", "FWD").unwrap();
//! let coupon = CouponCms::new(2.5, 0.5, 1e6, 2.0, swap, 2.0).unwrap();
//!
//! let method = CouponCmsSabrReplicationMethod::default();
//! let pv = method.present_value(&coupon, &market).unwrap();
//! let vega = method.present_value_sabr_sensitivity(&coupon, &market).unwrap();
//! assert!(pv > 0.0);
//! assert!(vega.total(SabrParameter::Alpha) > 0.0);
//! ```
//!
//! ## Logging
//!
//! Pricing calls emit `tracing` events at `debug` level. The crate never
//! installs a subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod error;
pub mod market;
pub mod portfolio;
pub mod replication;
pub mod sensitivity;
pub mod spread;

pub use config::{CorrelationFunction, ExtrapolationConfig, ReplicationConfig, SpreadConfig};
pub use error::ReplicationError;
pub use market::SABRMarketData;
pub use replication::{
    CapFloorCmsSabrExtrapolationRightReplicationMethod, CapFloorCmsSabrReplicationMethod,
    CmsReplication, CouponCmsSabrExtrapolationRightReplicationMethod,
    CouponCmsSabrReplicationMethod,
};
pub use sensitivity::SabrSensitivity;
pub use spread::CapFloorCmsSpreadSabrBinormalMethod;

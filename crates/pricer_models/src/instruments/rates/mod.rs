//! Interest-rate instruments underlying CMS replication.
//!
//! - [`FixedFloatSwap`]: vanilla swap defining a swap-rate index
//! - [`CouponCms`]: coupon paying a swap-rate fixing
//! - [`CapFloorCms`]: cap/floor on a swap-rate fixing
//! - [`CapFloorCmsSpread`]: cap/floor on the spread of two swap rates

mod cms_capfloor;
mod cms_coupon;
mod cms_spread;
mod swap;

pub use cms_capfloor::CapFloorCms;
pub use cms_coupon::CouponCms;
pub use cms_spread::CapFloorCmsSpread;
pub use swap::{FixedFloatSwap, FixedLeg, FloatLeg};

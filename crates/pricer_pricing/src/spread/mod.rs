//! CMS spread options.
//!
//! - [`CapFloorCmsSpreadSabrBinormalMethod`]: binormal pricing with
//!   strike-dependent correlation and implied correlation

mod binormal;

pub use binormal::CapFloorCmsSpreadSabrBinormalMethod;

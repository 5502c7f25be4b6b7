//! Analytical pricing formulas for European options on forwards.
//!
//! - [`black`]: Black-76 lognormal kernel with first and second derivatives
//! - [`bachelier`]: Normal kernel, its adjoint and implied normal volatility
//! - [`distributions`]: Standard normal CDF and PDF
//!
//! The free functions are pure kernels meant for integration loops; the
//! [`Black76`] and [`Bachelier`] structs validate inputs for direct use.

pub mod bachelier;
pub mod black;
pub mod distributions;
pub mod error;

pub use bachelier::{
    implied_normal_volatility, normal_price, normal_price_adjoint, Bachelier, NormalPriceAdjoint,
};
pub use black::{
    black_price, black_price_adjoint, black_second_order, black_vega, Black76, BlackPriceAdjoint,
    BlackSecondOrder,
};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;

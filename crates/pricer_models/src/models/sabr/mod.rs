//! SABR stochastic volatility model.
//!
//! ```text
//! dF = α F^β dW₁
//! dα = ν α dW₂
//! E[dW₁ dW₂] = ρ dt
//! ```
//!
//! - [`hagan`]: Hagan et al. implied volatility and its adjoint
//! - [`SABRExtrapolationRight`]: smile with a fitted power-law right tail
//! - [`SABRSurface`]: parameters on an (expiry, maturity) grid
//! - [`SmileFunction`]: common pricing interface used by replication

pub mod extrapolation;
pub mod hagan;
pub mod params;
pub mod smile;
pub mod surface;

pub use extrapolation::SABRExtrapolationRight;
pub use hagan::SABRVolatilityAdjoint;
pub use params::{SABRError, SABRParameters, SabrParameter};
pub use smile::{HaganSmile, SmileFunction, SmilePriceAdjoint};
pub use surface::{SABRProvider, SABRSurface};

//! Volatility smile models.
//!
//! Only SABR is provided; every smile exposes prices through
//! [`sabr::SmileFunction`] so replication code is independent of the tail
//! treatment.

pub mod sabr;

pub use sabr::{
    HaganSmile, SABRError, SABRExtrapolationRight, SABRParameters, SABRProvider, SABRSurface,
    SABRVolatilityAdjoint, SabrParameter, SmileFunction,
};

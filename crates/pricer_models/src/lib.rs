//! # Pricer Models (L2: Business Logic)
//!
//! Option kernels, the SABR smile model and CMS instrument definitions.
//!
//! This crate provides:
//! - Black-76 and Bachelier prices with adjoint derivatives ([`analytical`])
//! - Hagan SABR volatility, its adjoint, right-tail extrapolation and
//!   parameter surfaces ([`models`])
//! - Regular payment schedules in year fractions ([`schedules`])
//! - Fixed/float swaps and CMS coupons, caps/floors and spread options
//!   ([`instruments`])
//!
//! ## Design Principles
//!
//! - **Adjoint-first kernels**: every smile quantity used in a sensitivity
//!   comes with its analytic derivatives in the same call
//! - **Validated value objects**: instruments and SABR parameters are
//!   checked at construction and immutable afterwards
//! - **Trait seams** at the smile ([`models::sabr::SmileFunction`]) and the
//!   parameter source ([`models::sabr::SABRProvider`])

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
pub mod schedules;

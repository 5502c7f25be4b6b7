//! Core error types.
//!
//! - `error`: Structured error types for pricing, interpolation, solver and
//!   integration operations
//!
//! # Re-exports
//!
//! [`PricingError`], [`InterpolationError`], [`SolverError`],
//! [`IntegrationFailure`] and [`IntegrationFailureReason`] are re-exported at
//! this module level.

pub mod error;

pub use error::{
    IntegrationFailure, IntegrationFailureReason, InterpolationError, PricingError, SolverError,
};

//! # pricer_core: Numerical Foundation for CMS Replication Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Root finders: Brent (with a fallible-objective variant) and Newton-Raphson (`math::solvers`)
//! - Quadrature: adaptive Runge–Kutta and Gauss–Legendre (`math::integrators`)
//! - Linear and bilinear interpolation (`math::interpolators`)
//! - Yield curves, named curve sets and curve sensitivities (`market_data`)
//! - Error types: `PricingError`, `SolverError`, `IntegrationFailure` (`types::error`)
//!
//! ## Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - num-traits: Generic floating-point curve abstractions
//! - thiserror: Error derivation
//! - tracing: Diagnostics from the adaptive integrator
//! - serde: Serialisation support (optional)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::math::integrators::{Integrator, RungeKuttaIntegrator};
//! use pricer_core::market_data::curves::{CurveEnum, CurveSet};
//!
//! let curves = CurveSet::new().with_curve("EUR-DSC", CurveEnum::flat(0.02));
//! let df = curves.discount_factor("EUR-DSC", 5.0).unwrap();
//!
//! let integrator = RungeKuttaIntegrator::new(1e-12, 1e-10, 6);
//! let area = integrator.integrate(|x| df * x, 0.0, 1.0).unwrap();
//! # assert!((area - 0.5 * df).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for curves, sensitivities and configs

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;

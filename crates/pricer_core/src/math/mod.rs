//! Numerical building blocks.
//!
//! - `integrators`: Adaptive and Gauss–Legendre quadrature
//! - `interpolators`: Linear and bilinear grid interpolation
//! - `solvers`: Brent and Newton-Raphson root finders

pub mod integrators;
pub mod interpolators;
pub mod solvers;

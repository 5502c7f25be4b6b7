//! One-dimensional numerical integration.
//!
//! ## Available Integrators
//!
//! - [`RungeKuttaIntegrator`]: Adaptive Simpson/Runge–Kutta quadrature with
//!   Richardson correction, absolute + relative tolerance and a bisection
//!   depth cap
//! - [`GaussLegendreIntegrator`]: Composite fixed-order Gauss–Legendre rule,
//!   used as an independent reference
//!
//! Both implement [`Integrator`].
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::integrators::{Integrator, RungeKuttaIntegrator};
//!
//! let integrator = RungeKuttaIntegrator::new(1e-12, 1e-10, 6);
//! let value = integrator.integrate(|x| x.exp(), 0.0, 1.0).unwrap();
//! assert!((value - (1.0_f64.exp() - 1.0)).abs() < 1e-11);
//! ```

mod gauss_legendre;
mod runge_kutta;

pub use gauss_legendre::{gauss_legendre_nodes_weights, GaussLegendreIntegrator};
pub use runge_kutta::RungeKuttaIntegrator;

use crate::types::IntegrationFailure;

/// Definite integral of a real function over `[lower, upper]`.
///
/// Implementations return the negated integral when `lower > upper`.
pub trait Integrator {
    /// Integrate `f` from `lower` to `upper`.
    fn integrate<F>(&self, f: F, lower: f64, upper: f64) -> Result<f64, IntegrationFailure>
    where
        F: FnMut(f64) -> f64;
}

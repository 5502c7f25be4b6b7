//! Composite Gauss–Legendre quadrature.

use std::f64::consts::PI;

use super::Integrator;
use crate::types::{IntegrationFailure, IntegrationFailureReason};

/// Legendre polynomial `P_n(x)` and its derivative by the three-term recurrence.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 2..=n {
        let kf = k as f64;
        let p_next = ((2.0 * kf - 1.0) * x * p - (kf - 1.0) * p_prev) / kf;
        p_prev = p;
        p = p_next;
    }
    let derivative = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, derivative)
}

/// Nodes and weights of the `n`-point Gauss–Legendre rule on `[-1, 1]`.
///
/// Roots are found by Newton iteration from the Chebyshev-like initial
/// guess `cos(π (i + 3/4) / (n + 1/2))`.
pub fn gauss_legendre_nodes_weights(
    n: usize,
) -> Result<(Vec<f64>, Vec<f64>), IntegrationFailure> {
    if n == 0 {
        return Err(IntegrationFailure::new(
            IntegrationFailureReason::EmptyRule,
            f64::NAN,
        ));
    }

    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];
    let nf = n as f64;

    for i in 0..n.div_ceil(2) {
        let mut z = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        for _ in 0..100 {
            let (p, dp) = legendre_with_derivative(n, z);
            let dz = p / dp;
            z -= dz;
            if dz.abs() < 1e-15 {
                break;
            }
        }
        let (_, dp) = legendre_with_derivative(n, z);
        let w = 2.0 / ((1.0 - z * z) * dp * dp);

        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    Ok((nodes, weights))
}

/// Fixed-order Gauss–Legendre rule applied on `panels` equal sub-intervals.
///
/// ```
/// use pricer_core::math::integrators::{GaussLegendreIntegrator, Integrator};
///
/// let integrator = GaussLegendreIntegrator::new(20, 4).unwrap();
/// let value = integrator.integrate(|x| x.sin(), 0.0, std::f64::consts::PI).unwrap();
/// assert!((value - 2.0).abs() < 1e-13);
/// ```
#[derive(Debug, Clone)]
pub struct GaussLegendreIntegrator {
    nodes: Vec<f64>,
    weights: Vec<f64>,
    panels: usize,
}

impl GaussLegendreIntegrator {
    /// Create an `order`-point rule repeated over `panels` sub-intervals.
    pub fn new(order: usize, panels: usize) -> Result<Self, IntegrationFailure> {
        if panels == 0 {
            return Err(IntegrationFailure::new(
                IntegrationFailureReason::EmptyRule,
                f64::NAN,
            ));
        }
        let (nodes, weights) = gauss_legendre_nodes_weights(order)?;
        Ok(Self {
            nodes,
            weights,
            panels,
        })
    }

    /// Number of nodes per panel.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Number of panels.
    pub fn panels(&self) -> usize {
        self.panels
    }
}

impl Integrator for GaussLegendreIntegrator {
    fn integrate<F>(&self, mut f: F, lower: f64, upper: f64) -> Result<f64, IntegrationFailure>
    where
        F: FnMut(f64) -> f64,
    {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(IntegrationFailure::new(
                IntegrationFailureReason::InvalidBounds { lower, upper },
                f64::NAN,
            ));
        }

        let width = (upper - lower) / self.panels as f64;
        let half = 0.5 * width;
        let mut total = 0.0;
        for panel in 0..self.panels {
            let centre = lower + (panel as f64 + 0.5) * width;
            let mut sum = 0.0;
            for (&node, &weight) in self.nodes.iter().zip(&self.weights) {
                let x = centre + half * node;
                let value = f(x);
                if !value.is_finite() {
                    return Err(IntegrationFailure::new(
                        IntegrationFailureReason::NonFiniteIntegrand { x },
                        total,
                    ));
                }
                sum += weight * value;
            }
            total += half * sum;
        }
        Ok(total)
    }
}

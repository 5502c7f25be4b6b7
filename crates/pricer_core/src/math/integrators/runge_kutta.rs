//! Adaptive Runge–Kutta (Simpson) quadrature.

use super::Integrator;
use crate::types::{IntegrationFailure, IntegrationFailureReason};

/// Default bisection depth allowed below each initial panel.
pub const DEFAULT_MAX_DEPTH: usize = 30;

/// Adaptive quadrature based on the classical fourth-order Runge–Kutta
/// step, which for a function of the abscissa alone is Simpson's rule.
///
/// Each panel is integrated with one Simpson step (`ya`) and with two half
/// steps (`yb`). The panel is accepted when
///
/// ```text
/// |ya - yb| < absolute_tolerance + relative_tolerance * max(|ya|, |yb|)
/// ```
///
/// and contributes the Richardson-corrected value `yb + (yb - ya) / 15`.
/// Otherwise it is bisected and both halves are refined with the same
/// tolerances. The interval is first split into `min_steps` equal panels.
///
/// The tolerances apply per panel, so the total error can reach a small
/// multiple of `absolute_tolerance` when many panels are accepted. A panel
/// is never accepted above `min_depth` bisections: the five-point estimate
/// of a coarse panel can agree by chance on an integrand with a kink or a
/// steep rise.
///
/// Refinement below `max_depth` bisections fails with
/// [`IntegrationFailureReason::MaxDepthExceeded`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RungeKuttaIntegrator {
    absolute_tolerance: f64,
    relative_tolerance: f64,
    min_steps: usize,
    min_depth: usize,
    max_depth: usize,
}

/// Function values already known on a panel `[x, x + h]`.
#[derive(Clone, Copy)]
struct Panel {
    x: f64,
    h: f64,
    f_lower: f64,
    f_mid: f64,
    f_upper: f64,
}

impl RungeKuttaIntegrator {
    /// Create an integrator with the default depth cap.
    ///
    /// A `min_steps` of zero is treated as one.
    pub fn new(absolute_tolerance: f64, relative_tolerance: f64, min_steps: usize) -> Self {
        Self {
            absolute_tolerance,
            relative_tolerance,
            min_steps: min_steps.max(1),
            min_depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Bisect every initial panel at least `min_depth` times.
    ///
    /// Capped at the maximum depth when refining.
    pub fn with_min_depth(mut self, min_depth: usize) -> Self {
        self.min_depth = min_depth;
        self
    }

    /// Override the bisection depth cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Absolute tolerance per panel.
    pub fn absolute_tolerance(&self) -> f64 {
        self.absolute_tolerance
    }

    /// Relative tolerance per panel.
    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    /// Number of initial panels.
    pub fn min_steps(&self) -> usize {
        self.min_steps
    }

    /// Bisections forced below each initial panel.
    pub fn min_depth(&self) -> usize {
        self.min_depth
    }

    /// Bisection depth cap.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn refine<F>(&self, f: &mut F, panel: Panel, depth: usize) -> Result<f64, IntegrationFailure>
    where
        F: FnMut(f64) -> f64,
    {
        let Panel {
            x,
            h,
            f_lower,
            f_mid,
            f_upper,
        } = panel;
        let f_quarter = evaluate(f, x + 0.25 * h)?;
        let f_three_quarter = evaluate(f, x + 0.75 * h)?;

        let ya = h * (f_lower + 4.0 * f_mid + f_upper) / 6.0;
        let yb = h
            * (f_lower + 2.0 * f_mid + 4.0 * (f_quarter + f_three_quarter) + f_upper)
            / 12.0;

        let tolerance = self.absolute_tolerance + self.relative_tolerance * ya.abs().max(yb.abs());
        if depth >= self.min_depth.min(self.max_depth) && (ya - yb).abs() < tolerance {
            return Ok(yb + (yb - ya) / 15.0);
        }

        if depth >= self.max_depth {
            tracing::warn!(
                lower = x,
                upper = x + h,
                depth,
                estimate = yb,
                "adaptive integration reached its depth cap"
            );
            return Err(IntegrationFailure::new(
                IntegrationFailureReason::MaxDepthExceeded { depth },
                yb,
            ));
        }

        let half = 0.5 * h;
        let left = self.refine(
            f,
            Panel {
                x,
                h: half,
                f_lower,
                f_mid: f_quarter,
                f_upper: f_mid,
            },
            depth + 1,
        )?;
        let right = self.refine(
            f,
            Panel {
                x: x + half,
                h: half,
                f_lower: f_mid,
                f_mid: f_three_quarter,
                f_upper,
            },
            depth + 1,
        )?;
        Ok(left + right)
    }
}

impl Integrator for RungeKuttaIntegrator {
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
        if lower == upper {
            return Ok(0.0);
        }
        if lower > upper {
            return self.integrate(f, upper, lower).map(|v| -v);
        }

        let h = (upper - lower) / self.min_steps as f64;
        let mut total = 0.0;
        let mut x = lower;
        let mut f_x = evaluate(&mut f, x)?;
        for step in 0..self.min_steps {
            // Land exactly on the upper bound for the last panel
            let next = if step + 1 == self.min_steps {
                upper
            } else {
                lower + (step + 1) as f64 * h
            };
            let f_next = evaluate(&mut f, next)?;
            let f_mid = evaluate(&mut f, 0.5 * (x + next))?;
            total += self.refine(
                &mut f,
                Panel {
                    x,
                    h: next - x,
                    f_lower: f_x,
                    f_mid,
                    f_upper: f_next,
                },
                0,
            )?;
            x = next;
            f_x = f_next;
        }
        Ok(total)
    }
}

#[inline]
fn evaluate<F>(f: &mut F, x: f64) -> Result<f64, IntegrationFailure>
where
    F: FnMut(f64) -> f64,
{
    let value = f(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IntegrationFailure::new(
            IntegrationFailureReason::NonFiniteIntegrand { x },
            value,
        ))
    }
}

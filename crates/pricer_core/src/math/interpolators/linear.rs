//! Piecewise linear 1D interpolation.

use super::{locate, validate_axis};
use crate::types::InterpolationError;

/// Piecewise linear interpolator with flat extrapolation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Build from strictly increasing `xs` and matching `ys`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, InterpolationError> {
        validate_axis(&xs, 1)?;
        if ys.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "{} values for {} nodes",
                ys.len(),
                xs.len()
            )));
        }
        Ok(Self { xs, ys })
    }

    /// Interpolated value at `x`.
    pub fn interpolate(&self, x: f64) -> f64 {
        if self.xs.len() == 1 {
            return self.ys[0];
        }
        let (i, w) = locate(&self.xs, x);
        (1.0 - w) * self.ys[i] + w * self.ys[i + 1]
    }

    /// Weights of each node in the value at `x`.
    ///
    /// At most two entries are non-zero; they sum to one.
    pub fn node_weights(&self, x: f64) -> Vec<f64> {
        let mut weights = vec![0.0; self.xs.len()];
        if self.xs.len() == 1 {
            weights[0] = 1.0;
            return weights;
        }
        let (i, w) = locate(&self.xs, x);
        weights[i] += 1.0 - w;
        weights[i + 1] += w;
        weights
    }

    /// Same nodes with each value replaced by `f(index, value)`.
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(usize, f64) -> f64,
    {
        Self {
            xs: self.xs.clone(),
            ys: self.ys.iter().enumerate().map(|(i, &y)| f(i, y)).collect(),
        }
    }

    /// Node abscissae.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Node values.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
}

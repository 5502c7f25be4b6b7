//! Bilinear 2D interpolation for surfaces.

use super::{locate, validate_axis};
use crate::types::InterpolationError;

/// Bilinear interpolator on a rectangular grid with flat extrapolation.
///
/// Values are stored row-major: `values[i][j] = z(xs[i], ys[j])`.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let interp = BilinearInterpolator::new(
///     vec![1.0, 5.0],
///     vec![2.0, 10.0],
///     vec![vec![0.2, 0.3], vec![0.4, 0.5]],
/// )
/// .unwrap();
/// assert!((interp.interpolate(3.0, 6.0) - 0.35).abs() < 1e-12);
/// assert_eq!(interp.interpolate(0.0, 0.0), 0.2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BilinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl BilinearInterpolator {
    /// Construct from strictly increasing axes and a matching grid.
    ///
    /// An axis with a single node is constant in that direction.
    pub fn new(
        xs: Vec<f64>,
        ys: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, InterpolationError> {
        validate_axis(&xs, 1)?;
        validate_axis(&ys, 1)?;
        if values.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid rows ({}) must match x-axis length ({})",
                values.len(),
                xs.len()
            )));
        }
        if let Some((i, row)) = values.iter().enumerate().find(|(_, r)| r.len() != ys.len()) {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid row {} length ({}) must match y-axis length ({})",
                i,
                row.len(),
                ys.len()
            )));
        }
        Ok(Self { xs, ys, values })
    }

    /// Interpolated value at `(x, y)`; coordinates outside the grid are clamped.
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let (i, u) = locate(&self.xs, x);
        let (j, v) = locate(&self.ys, y);
        let i1 = (i + 1).min(self.xs.len() - 1);
        let j1 = (j + 1).min(self.ys.len() - 1);

        let z00 = self.values[i][j];
        let z10 = self.values[i1][j];
        let z01 = self.values[i][j1];
        let z11 = self.values[i1][j1];

        (1.0 - u) * (1.0 - v) * z00 + u * (1.0 - v) * z10 + (1.0 - u) * v * z01 + u * v * z11
    }

    /// Same grid with each value replaced by `f(value)`.
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            xs: self.xs.clone(),
            ys: self.ys.clone(),
            values: self
                .values
                .iter()
                .map(|row| row.iter().map(|&v| f(v)).collect())
                .collect(),
        }
    }

    /// X-axis coordinates.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y-axis coordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Grid values.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }
}

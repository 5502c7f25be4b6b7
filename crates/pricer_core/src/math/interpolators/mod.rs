//! Interpolation on sorted grids with flat extrapolation.
//!
//! - [`LinearInterpolator`]: Piecewise linear in one dimension
//! - [`BilinearInterpolator`]: Tensor-product linear on a 2D grid, used for
//!   SABR parameter surfaces indexed by (expiry, maturity)
//!
//! Both validate that their axes are strictly increasing and hold the end
//! values constant outside the grid.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::LinearInterpolator;
//!
//! let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]).unwrap();
//! assert!((interp.interpolate(1.5) - 2.5).abs() < 1e-12);
//! assert_eq!(interp.interpolate(5.0), 4.0);
//! ```

mod bilinear;
mod linear;

pub use bilinear::BilinearInterpolator;
pub use linear::LinearInterpolator;

use crate::types::InterpolationError;

/// Check that `axis` is strictly increasing and has at least `need` points.
pub(crate) fn validate_axis(axis: &[f64], need: usize) -> Result<(), InterpolationError> {
    if axis.len() < need {
        return Err(InterpolationError::InsufficientData {
            got: axis.len(),
            need,
        });
    }
    if let Some(index) = axis.iter().position(|x| !x.is_finite()) {
        return Err(InterpolationError::InvalidInput(format!(
            "axis value at index {} is not finite",
            index
        )));
    }
    if let Some(index) = axis.windows(2).position(|w| w[1] <= w[0]) {
        return Err(InterpolationError::NonMonotonicData { index: index + 1 });
    }
    Ok(())
}

/// Index `i` of the cell `[axis[i], axis[i + 1]]` used for `x`, and the
/// clamped weight of the upper node.
///
/// A NaN `x` maps to the first cell with a NaN weight, so the interpolated
/// value is NaN.
pub(crate) fn locate(axis: &[f64], x: f64) -> (usize, f64) {
    if axis.len() == 1 {
        return (0, 0.0);
    }
    if x.is_nan() {
        return (0, f64::NAN);
    }
    let last = axis.len() - 1;
    if x <= axis[0] {
        return (0, 0.0);
    }
    if x >= axis[last] {
        return (last - 1, 1.0);
    }
    let i = axis.partition_point(|&a| a <= x).saturating_sub(1);
    let weight = (x - axis[i]) / (axis[i + 1] - axis[i]);
    (i, weight)
}

//! SABR parameter surfaces indexed by (expiry, underlying maturity).

use pricer_core::math::interpolators::BilinearInterpolator;

use super::hagan::{self, SABRVolatilityAdjoint};
use super::params::{SABRError, SABRParameters, SabrParameter};
use super::smile::HaganSmile;

/// Source of calibrated SABR parameters.
///
/// Implementations must be safe to query concurrently; they are read-only
/// for the duration of a pricing call.
pub trait SABRProvider {
    /// Parameters of the smile for options expiring at `expiry` on a swap
    /// of length `maturity` (both in years).
    fn parameters(&self, expiry: f64, maturity: f64) -> SABRParameters;

    /// Implied Black volatility.
    fn volatility(&self, expiry: f64, maturity: f64, strike: f64, forward: f64) -> f64 {
        hagan::volatility(&self.parameters(expiry, maturity), forward, strike, expiry)
    }

    /// Implied Black volatility with its derivatives.
    fn volatility_adjoint(
        &self,
        expiry: f64,
        maturity: f64,
        strike: f64,
        forward: f64,
    ) -> SABRVolatilityAdjoint {
        hagan::volatility_adjoint(&self.parameters(expiry, maturity), forward, strike, expiry)
    }

    /// The smile at one (expiry, maturity) point.
    fn smile(&self, expiry: f64, maturity: f64, forward: f64) -> HaganSmile {
        HaganSmile::new(self.parameters(expiry, maturity), forward, expiry)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ParameterGrid {
    Flat(f64),
    Grid(BilinearInterpolator),
}

impl ParameterGrid {
    fn value(&self, expiry: f64, maturity: f64) -> f64 {
        match self {
            ParameterGrid::Flat(v) => *v,
            ParameterGrid::Grid(interp) => interp.interpolate(expiry, maturity),
        }
    }

    fn shifted(&self, shift: f64) -> Self {
        match self {
            ParameterGrid::Flat(v) => ParameterGrid::Flat(v + shift),
            ParameterGrid::Grid(interp) => ParameterGrid::Grid(interp.map_values(|v| v + shift)),
        }
    }
}

/// Alpha, rho and nu on an (expiry, maturity) grid with a single beta.
///
/// Between nodes the parameters are interpolated bilinearly; outside the
/// grid they are held flat.
///
/// # Example
///
/// ```
/// use pricer_models::models::sabr::{SABRParameters, SABRProvider, SABRSurface};
///
/// let surface = SABRSurface::grid(
///     0.5,
///     vec![1.0, 5.0],
///     vec![2.0, 10.0],
///     vec![vec![0.02, 0.03], vec![0.04, 0.05]],
///     vec![vec![-0.2; 2]; 2],
///     vec![vec![0.3; 2]; 2],
/// )
/// .unwrap();
///
/// let params = surface.parameters(3.0, 6.0);
/// assert!((params.alpha - 0.035).abs() < 1e-12);
/// assert_eq!(params.beta, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SABRSurface {
    beta: f64,
    alpha: ParameterGrid,
    rho: ParameterGrid,
    nu: ParameterGrid,
}

impl SABRSurface {
    /// The same parameters for every expiry and maturity.
    pub fn flat(params: SABRParameters) -> Self {
        Self {
            beta: params.beta,
            alpha: ParameterGrid::Flat(params.alpha),
            rho: ParameterGrid::Flat(params.rho),
            nu: ParameterGrid::Flat(params.nu),
        }
    }

    /// Grid of parameters; `alpha[i][j]` belongs to `(expiries[i], maturities[j])`.
    ///
    /// # Errors
    ///
    /// Returns `SABRError::Grid` for non-increasing axes or mismatched
    /// dimensions and the matching parameter error for out-of-domain nodes.
    pub fn grid(
        beta: f64,
        expiries: Vec<f64>,
        maturities: Vec<f64>,
        alpha: Vec<Vec<f64>>,
        rho: Vec<Vec<f64>>,
        nu: Vec<Vec<f64>>,
    ) -> Result<Self, SABRError> {
        for ((alpha_row, rho_row), nu_row) in alpha.iter().zip(&rho).zip(&nu) {
            for ((&a, &r), &n) in alpha_row.iter().zip(rho_row).zip(nu_row) {
                SABRParameters::new(a, beta, r, n)?;
            }
        }
        if !(0.0..=1.0).contains(&beta) {
            return Err(SABRError::InvalidBeta(beta));
        }
        Ok(Self {
            beta,
            alpha: ParameterGrid::Grid(BilinearInterpolator::new(
                expiries.clone(),
                maturities.clone(),
                alpha,
            )?),
            rho: ParameterGrid::Grid(BilinearInterpolator::new(
                expiries.clone(),
                maturities.clone(),
                rho,
            )?),
            nu: ParameterGrid::Grid(BilinearInterpolator::new(expiries, maturities, nu)?),
        })
    }

    /// Common beta of the surface.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Copy with one parameter moved by `shift` at every node.
    pub fn with_parameter_shift(&self, parameter: SabrParameter, shift: f64) -> Self {
        let mut shifted = self.clone();
        match parameter {
            SabrParameter::Alpha => shifted.alpha = self.alpha.shifted(shift),
            SabrParameter::Rho => shifted.rho = self.rho.shifted(shift),
            SabrParameter::Nu => shifted.nu = self.nu.shifted(shift),
        }
        shifted
    }
}

impl SABRProvider for SABRSurface {
    fn parameters(&self, expiry: f64, maturity: f64) -> SABRParameters {
        SABRParameters {
            alpha: self.alpha.value(expiry, maturity),
            beta: self.beta,
            rho: self.rho.value(expiry, maturity),
            nu: self.nu.value(expiry, maturity),
        }
    }
}

impl<P: SABRProvider + ?Sized> SABRProvider for &P {
    fn parameters(&self, expiry: f64, maturity: f64) -> SABRParameters {
        (**self).parameters(expiry, maturity)
    }
}

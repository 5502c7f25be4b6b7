//! SABR parameter set and validation errors.

use pricer_core::types::{InterpolationError, PricingError};
use thiserror::Error;

/// SABR model errors.
///
/// # Examples
///
/// ```
/// use pricer_models::models::sabr::SABRError;
///
/// let err = SABRError::InvalidAlpha(-0.1);
/// assert!(format!("{}", err).contains("-0.1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SABRError {
    /// Initial volatility must be non-negative.
    #[error("Invalid alpha: {0} (must be >= 0)")]
    InvalidAlpha(f64),

    /// CEV exponent must lie in [0, 1].
    #[error("Invalid beta: {0} (must be in [0, 1])")]
    InvalidBeta(f64),

    /// Correlation must lie in [-1, 1].
    #[error("Invalid rho: {0} (must be in [-1, 1])")]
    InvalidRho(f64),

    /// Vol-of-vol must be non-negative.
    #[error("Invalid nu: {0} (must be >= 0)")]
    InvalidNu(f64),

    /// Time to expiry must be non-negative.
    #[error("Invalid expiry: {0} (must be >= 0)")]
    InvalidExpiry(f64),

    /// Tail extrapolation needs a positive cut-off strike.
    #[error("Invalid cut-off strike: {0} (must be > 0)")]
    InvalidCutOff(f64),

    /// Tail extrapolation needs a positive thickness parameter.
    #[error("Invalid tail parameter mu: {0} (must be > 0)")]
    InvalidMu(f64),

    /// Parameter grid could not be built.
    #[error("Invalid parameter grid: {0}")]
    Grid(#[from] InterpolationError),
}

impl From<SABRError> for PricingError {
    fn from(err: SABRError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// SABR parameter selected for a sensitivity computation.
///
/// Beta is held fixed per surface and carries no market sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SabrParameter {
    /// Initial volatility level
    Alpha,
    /// Forward/volatility correlation
    Rho,
    /// Volatility of volatility
    Nu,
}

impl SabrParameter {
    /// The three risk parameters in reporting order.
    pub const ALL: [SabrParameter; 3] = [SabrParameter::Alpha, SabrParameter::Rho, SabrParameter::Nu];
}

/// One point of a SABR smile: `(alpha, beta, rho, nu)`.
///
/// # Examples
///
/// ```
/// use pricer_models::models::sabr::SABRParameters;
///
/// let params = SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap();
/// assert_eq!(params.beta, 0.5);
/// assert!(SABRParameters::new(0.03, 1.5, -0.2, 0.3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SABRParameters {
    /// Initial volatility (alpha >= 0)
    pub alpha: f64,
    /// CEV exponent: 0 = normal, 1 = lognormal
    pub beta: f64,
    /// Correlation between forward and volatility
    pub rho: f64,
    /// Volatility of volatility (nu >= 0)
    pub nu: f64,
}

impl SABRParameters {
    /// Create a validated parameter set.
    pub fn new(alpha: f64, beta: f64, rho: f64, nu: f64) -> Result<Self, SABRError> {
        let params = Self {
            alpha,
            beta,
            rho,
            nu,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the admissible domain of each parameter.
    pub fn validate(&self) -> Result<(), SABRError> {
        if !(self.alpha >= 0.0) || !self.alpha.is_finite() {
            return Err(SABRError::InvalidAlpha(self.alpha));
        }
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(SABRError::InvalidBeta(self.beta));
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(SABRError::InvalidRho(self.rho));
        }
        if !(self.nu >= 0.0) || !self.nu.is_finite() {
            return Err(SABRError::InvalidNu(self.nu));
        }
        Ok(())
    }

    /// Value of one of the risk parameters.
    pub fn get(&self, parameter: SabrParameter) -> f64 {
        match parameter {
            SabrParameter::Alpha => self.alpha,
            SabrParameter::Rho => self.rho,
            SabrParameter::Nu => self.nu,
        }
    }

    /// Copy with one risk parameter moved by `shift`.
    ///
    /// No validation is performed, so bumps at the domain boundary are allowed.
    pub fn bumped(&self, parameter: SabrParameter, shift: f64) -> Self {
        let mut bumped = *self;
        match parameter {
            SabrParameter::Alpha => bumped.alpha += shift,
            SabrParameter::Rho => bumped.rho += shift,
            SabrParameter::Nu => bumped.nu += shift,
        }
        bumped
    }

    /// Hagan implied Black volatility.
    pub fn volatility(&self, forward: f64, strike: f64, expiry: f64) -> f64 {
        super::hagan::volatility(self, forward, strike, expiry)
    }

    /// Hagan implied Black volatility with all first-order derivatives.
    pub fn volatility_adjoint(
        &self,
        forward: f64,
        strike: f64,
        expiry: f64,
    ) -> super::hagan::SABRVolatilityAdjoint {
        super::hagan::volatility_adjoint(self, forward, strike, expiry)
    }
}

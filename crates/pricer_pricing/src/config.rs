//! Configuration for the replication methods.
//!
//! Every config is `serde`-deserialisable and can be read from TOML:
//!
//! ```
//! use pricer_pricing::config::ReplicationConfig;
//!
//! let config = ReplicationConfig::from_toml_str("integration_interval = 0.5").unwrap();
//! assert_eq!(config.integration_interval, 0.5);
//! assert_eq!(config.min_steps, 6);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ReplicationError;

/// Settings shared by the cap/floor and coupon replication methods.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `integration_interval` | 1.0 | Width of the cap integration window above the strike |
/// | `relative_tolerance` | 1e-10 | Relative tolerance per integration panel |
/// | `price_tolerance` | 1.0 | Target absolute error in currency units |
/// | `min_steps` | 6 | Initial number of integration panels |
/// | `max_depth` | 30 | Bisection depth cap per panel |
/// | `strike_floor` | 1e-4 | Strikes below this are floored before SABR evaluation |
///
/// The integrator's absolute tolerance is derived per call as
/// `price_tolerance / (DF · |notional| · accrual)`. Each Simpson panel is
/// accepted against that tolerance, and every panel is bisected at least
/// once, so the error left in the priced integral stays a small fraction of
/// `price_tolerance`. The window is also split at `strike_floor`, where the
/// floored smile has a kink.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplicationConfig {
    /// Cap integration runs over `[K, K + integration_interval]`.
    pub integration_interval: f64,
    /// Relative tolerance of the adaptive integrator.
    pub relative_tolerance: f64,
    /// Absolute price error, in currency units, the integration aims for.
    pub price_tolerance: f64,
    /// Initial number of panels.
    pub min_steps: usize,
    /// Maximum bisection depth.
    pub max_depth: usize,
    /// SABR strike floor inside the integrands.
    pub strike_floor: f64,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            integration_interval: 1.0,
            relative_tolerance: 1e-10,
            price_tolerance: 1.0,
            min_steps: 6,
            max_depth: 30,
            strike_floor: 1e-4,
        }
    }
}

impl ReplicationConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cap integration window.
    pub fn with_integration_interval(mut self, integration_interval: f64) -> Self {
        self.integration_interval = integration_interval;
        self
    }

    /// Sets the relative tolerance.
    pub fn with_relative_tolerance(mut self, relative_tolerance: f64) -> Self {
        self.relative_tolerance = relative_tolerance;
        self
    }

    /// Sets the absolute price tolerance.
    pub fn with_price_tolerance(mut self, price_tolerance: f64) -> Self {
        self.price_tolerance = price_tolerance;
        self
    }

    /// Sets the initial number of panels.
    pub fn with_min_steps(mut self, min_steps: usize) -> Self {
        self.min_steps = min_steps;
        self
    }

    /// Sets the bisection depth cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the SABR strike floor.
    pub fn with_strike_floor(mut self, strike_floor: f64) -> Self {
        self.strike_floor = strike_floor;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ReplicationError::InvalidConfig` if:
    /// - A tolerance, the integration interval or the strike floor is not positive and finite
    /// - `min_steps` or `max_depth` is 0
    pub fn validate(&self) -> Result<(), ReplicationError> {
        check_positive("integration_interval", self.integration_interval)?;
        check_positive("relative_tolerance", self.relative_tolerance)?;
        check_positive("price_tolerance", self.price_tolerance)?;
        check_positive("strike_floor", self.strike_floor)?;
        if self.min_steps == 0 {
            return Err(ReplicationError::InvalidConfig(
                "min_steps must be > 0".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(ReplicationError::InvalidConfig(
                "max_depth must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ReplicationError> {
        let config: Self = parse_toml(source)?;
        config.validate()?;
        Ok(config)
    }
}

/// Right-tail extrapolation settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtrapolationConfig {
    /// Strike above which the power-law tail replaces the Hagan smile.
    pub cut_off_strike: f64,
    /// Tail thickness; larger is thinner.
    pub mu: f64,
}

impl ExtrapolationConfig {
    /// Creates a new extrapolation configuration.
    pub fn new(cut_off_strike: f64, mu: f64) -> Self {
        Self { cut_off_strike, mu }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ReplicationError> {
        check_positive("cut_off_strike", self.cut_off_strike)?;
        check_positive("mu", self.mu)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ReplicationError> {
        let config: Self = parse_toml(source)?;
        config.validate()?;
        Ok(config)
    }
}

/// Correlation between two swap rates as a function of the spread strike.
///
/// ```
/// use pricer_pricing::config::CorrelationFunction;
///
/// let flat = CorrelationFunction::Constant(0.8);
/// assert_eq!(flat.evaluate(0.01), 0.8);
///
/// // 0.5 + 10 K
/// let linear = CorrelationFunction::Polynomial(vec![0.5, 10.0]);
/// assert!((linear.evaluate(0.02) - 0.7).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationFunction {
    /// Same correlation at every strike.
    Constant(f64),
    /// `Σ cᵢ Kⁱ`, coefficients in increasing degree.
    Polynomial(Vec<f64>),
}

impl CorrelationFunction {
    /// Correlation at `strike`.
    pub fn evaluate(&self, strike: f64) -> f64 {
        match self {
            CorrelationFunction::Constant(rho) => *rho,
            CorrelationFunction::Polynomial(coefficients) => coefficients
                .iter()
                .rev()
                .fold(0.0, |acc, &c| acc * strike + c),
        }
    }
}

impl Default for CorrelationFunction {
    fn default() -> Self {
        CorrelationFunction::Constant(0.0)
    }
}

/// CMS spread method settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpreadConfig {
    /// Strike-dependent correlation between the two rates.
    pub correlation: CorrelationFunction,
}

impl SpreadConfig {
    /// Spread settings with the given correlation function.
    pub fn new(correlation: CorrelationFunction) -> Self {
        Self { correlation }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ReplicationError> {
        parse_toml(source)
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), ReplicationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ReplicationError::InvalidConfig(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

fn parse_toml<T: serde::de::DeserializeOwned>(source: &str) -> Result<T, ReplicationError> {
    toml::from_str(source).map_err(|e| ReplicationError::InvalidConfig(e.to_string()))
}

//! Hagan et al. (2002) implied Black volatility for the SABR model.
//!
//! ```text
//! σ(K) = α / [(FK)^((1−β)/2) · (1 + (1−β)²/24·ln²(F/K) + (1−β)⁴/1920·ln⁴(F/K))]
//!        · z/χ(z)
//!        · [1 + ((1−β)²α²/(24(FK)^(1−β)) + ρβνα/(4(FK)^((1−β)/2)) + (2−3ρ²)ν²/24)·T]
//! z = ν/α·(FK)^((1−β)/2)·ln(F/K),   χ(z) = ln[(√(1−2ρz+z²) + z − ρ)/(1−ρ)]
//! ```
//!
//! The ratio z/χ(z) is evaluated with explicit expansions near z = 0 and
//! near ρ = ±1, where the closed form is 0/0 or loses precision.
//!
//! [`volatility_adjoint`] evaluates the same expression as a forward sweep
//! followed by a reverse sweep, returning the value together with every
//! first-order derivative at roughly twice the cost of the value alone.

use super::params::{SABRParameters, SabrParameter};

/// Strikes below `forward · CUTOFF_MONEYNESS` are replaced by that value.
const CUTOFF_MONEYNESS: f64 = 1e-12;
const SMALL_Z: f64 = 1e-6;
const LARGE_NEG_Z: f64 = -1e6;
const LARGE_POS_Z: f64 = 1e8;
const BETA_EPS: f64 = 1e-8;
const RHO_EPS: f64 = 1e-5;
const RHO_EPS_NEGATIVE: f64 = 1e-8;
const ATM_EPS: f64 = 1e-7;

/// Alpha sensitivity reported away from the money when `alpha == 0`,
/// where the exact derivative is unbounded.
const LARGE_ALPHA_SENSITIVITY: f64 = 1e7;

/// Volatility with its derivatives with respect to every input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SABRVolatilityAdjoint {
    /// Implied Black volatility
    pub volatility: f64,
    /// ∂σ/∂forward
    pub forward: f64,
    /// ∂σ/∂strike
    pub strike: f64,
    /// ∂σ/∂alpha
    pub alpha: f64,
    /// ∂σ/∂beta
    pub beta: f64,
    /// ∂σ/∂rho
    pub rho: f64,
    /// ∂σ/∂nu
    pub nu: f64,
}

impl SABRVolatilityAdjoint {
    /// Derivative with respect to one of the risk parameters.
    pub fn parameter(&self, parameter: SabrParameter) -> f64 {
        match parameter {
            SabrParameter::Alpha => self.alpha,
            SabrParameter::Rho => self.rho,
            SabrParameter::Nu => self.nu,
        }
    }
}

#[inline]
fn floor_strike(forward: f64, strike: f64) -> f64 {
    let cutoff = forward * CUTOFF_MONEYNESS;
    if strike < cutoff {
        tracing::trace!(strike, cutoff, "strike below SABR cutoff, using cutoff");
        cutoff
    } else {
        strike
    }
}

/// Implied Black volatility from the Hagan expansion.
///
/// # Example
///
/// ```
/// use pricer_models::models::sabr::{hagan, SABRParameters};
///
/// // beta = 1 and nu = 0 collapse to a flat lognormal smile at alpha
/// let params = SABRParameters::new(0.2, 1.0, 0.0, 0.0).unwrap();
/// let vol = hagan::volatility(&params, 0.03, 0.05, 5.0);
/// assert!((vol - 0.2).abs() < 1e-14);
/// ```
pub fn volatility(params: &SABRParameters, forward: f64, strike: f64, expiry: f64) -> f64 {
    let SABRParameters {
        alpha,
        beta,
        rho,
        nu,
    } = *params;
    if alpha == 0.0 {
        return 0.0;
    }

    let k = floor_strike(forward, strike);
    let beta1 = 1.0 - beta;
    let vol_of_vol_term = nu * nu * (2.0 - 3.0 * rho * rho) / 24.0;

    if (forward - k).abs() < ATM_EPS {
        let f1 = forward.powf(beta1);
        return alpha
            * (1.0
                + expiry
                    * (beta1 * beta1 * alpha * alpha / 24.0 / f1 / f1
                        + rho * alpha * beta * nu / 4.0 / f1
                        + vol_of_vol_term))
            / f1;
    }

    let ln = (forward / k).ln();
    if beta.abs() < BETA_EPS {
        let z = nu * (forward * k).sqrt() * ln / alpha;
        let z_over_chi = z_over_chi(rho, z);
        alpha
            * ln
            * z_over_chi
            * (1.0 + expiry * (alpha * alpha / forward / k + nu * nu * (2.0 - 3.0 * rho * rho)) / 24.0)
            / (forward - k)
    } else if (beta - 1.0).abs() < BETA_EPS {
        let z = nu * ln / alpha;
        alpha * z_over_chi(rho, z) * (1.0 + expiry * (rho * alpha * nu / 4.0 + vol_of_vol_term))
    } else {
        let f1 = (forward * k).powf(beta1);
        let f1_sqrt = f1.sqrt();
        let ln_beta_sq = (beta1 * ln).powi(2);
        let z = nu * f1_sqrt * ln / alpha;
        let first = alpha / (f1_sqrt * (1.0 + ln_beta_sq / 24.0 + ln_beta_sq * ln_beta_sq / 1920.0));
        let third = 1.0
            + expiry
                * (beta1 * beta1 * alpha * alpha / 24.0 / f1
                    + rho * nu * beta * alpha / 4.0 / f1_sqrt
                    + vol_of_vol_term);
        first * z_over_chi(rho, z) * third
    }
}

/// The ratio z/χ(z), stable near z = 0 and near ρ = ±1.
pub fn z_over_chi(rho: f64, z: f64) -> f64 {
    if z.abs() < SMALL_Z {
        return 1.0 - rho * z / 2.0;
    }

    let rho_star = 1.0 - rho;
    if rho_star.abs() < RHO_EPS {
        return if z > 1.0 {
            if rho_star == 0.0 {
                0.0
            } else {
                z / ((2.0 * (z - 1.0)).ln() - rho_star.ln())
            }
        } else if z < 1.0 {
            z / (-(1.0 - z).ln() - 0.5 * (z / (z - 1.0)).powi(2) * rho_star)
        } else {
            0.0
        };
    }

    let rho_hat = 1.0 + rho;
    if rho_hat.abs() < RHO_EPS_NEGATIVE {
        return if z > -1.0 {
            z / (1.0 + z).ln()
        } else if z < -1.0 {
            if rho_hat == 0.0 {
                0.0
            } else {
                z / (rho_hat.ln() - (-(1.0 + z) / rho_star).ln())
            }
        } else {
            0.0
        };
    }

    let arg = chi_argument(rho, z);
    if arg <= 0.0 {
        return 0.0;
    }
    z / (arg.ln() - rho_star.ln())
}

/// `√(1−2ρz+z²) + z − ρ`, with asymptotic forms where it cancels badly.
#[inline]
fn chi_argument(rho: f64, z: f64) -> f64 {
    if z < LARGE_NEG_Z {
        (rho * rho - 1.0) / 2.0 / z
    } else if z > LARGE_POS_Z {
        2.0 * (z - rho)
    } else {
        (1.0 - 2.0 * rho * z + z * z).sqrt() + z - rho
    }
}

/// Implied volatility and its derivatives with respect to forward, strike
/// and the four SABR parameters.
pub fn volatility_adjoint(
    params: &SABRParameters,
    forward: f64,
    strike: f64,
    expiry: f64,
) -> SABRVolatilityAdjoint {
    let SABRParameters {
        alpha,
        beta,
        rho,
        nu,
    } = *params;
    let strike = floor_strike(forward, strike);
    let t = expiry;
    let beta_star = 1.0 - beta;
    let rho_star = 1.0 - rho;

    if alpha == 0.0 {
        let alpha_bar = if (forward - strike).abs() < ATM_EPS {
            (1.0 + (2.0 - 3.0 * rho * rho) * nu * nu / 24.0 * t) / forward.powf(beta_star)
        } else {
            LARGE_ALPHA_SENSITIVITY
        };
        return SABRVolatilityAdjoint {
            volatility: 0.0,
            forward: 0.0,
            strike: 0.0,
            alpha: alpha_bar,
            beta: 0.0,
            rho: 0.0,
            nu: 0.0,
        };
    }

    // Forward sweep
    let sf_k = (forward * strike).powf(beta_star / 2.0);
    let ln_fk = (forward / strike).ln();
    let z = nu / alpha * sf_k * ln_fk;
    let small_z = z.abs() < SMALL_Z;
    let near_rho_one = rho_star.abs() < RHO_EPS;

    let mut xz = 0.0;
    let rzxz = if small_z {
        1.0 - 0.5 * z * rho
    } else if near_rho_one {
        if z >= 1.0 {
            if rho_star == 0.0 {
                xz = f64::INFINITY;
                0.0
            } else {
                xz = (2.0 * (z - 1.0)).ln() - rho_star.ln();
                z / xz
            }
        } else {
            xz = -(1.0 - z).ln() - 0.5 * (z / (z - 1.0)).powi(2) * rho_star;
            z / xz
        }
    } else {
        let arg = chi_argument(rho, z);
        if arg <= 0.0 {
            0.0
        } else {
            xz = (arg / rho_star).ln();
            z / xz
        }
    };

    let ln2 = ln_fk * ln_fk;
    let sf1 = sf_k * (1.0 + beta_star * beta_star / 24.0 * ln2 + beta_star.powi(4) / 1920.0 * ln2 * ln2);
    let sf2 = 1.0
        + ((beta_star * alpha / sf_k).powi(2) / 24.0
            + rho * beta * nu * alpha / (4.0 * sf_k)
            + (2.0 - 3.0 * rho * rho) * nu * nu / 24.0)
            * t;
    let vol = alpha / sf1 * rzxz * sf2;

    // Reverse sweep
    let sf2_bar = alpha / sf1 * rzxz;
    let sf1_bar = -alpha / (sf1 * sf1) * rzxz * sf2;
    let rzxz_bar = alpha / sf1 * sf2;

    let mut xz_bar = 0.0;
    let z_bar = if small_z {
        -rho / 2.0 * rzxz_bar
    } else if near_rho_one {
        if z >= 1.0 {
            if z == 1.0 {
                0.0
            } else {
                xz_bar = -rzxz_bar * z / (xz * xz);
                rzxz_bar / xz + xz_bar / (z - 1.0)
            }
        } else {
            let log_one_minus_z = (1.0 - z).ln();
            xz_bar = -z / (xz * xz) * rzxz_bar;
            -1.0 / log_one_minus_z * (1.0 + z / log_one_minus_z / (1.0 - z)) * rzxz_bar
        }
    } else if xz == 0.0 {
        0.0
    } else if !(LARGE_NEG_Z..=LARGE_POS_Z).contains(&z) {
        rzxz_bar / xz
    } else {
        let root = (1.0 - 2.0 * rho * z + z * z).sqrt();
        xz_bar = -z / (xz * xz) * rzxz_bar;
        rzxz_bar / xz + ((z - rho) / root + 1.0) / (root + z - rho) * xz_bar
    };

    let ln_fk_bar = sf_k
        * (beta_star * beta_star / 12.0 * ln_fk + beta_star.powi(4) / 1920.0 * 4.0 * ln2 * ln_fk)
        * sf1_bar
        + nu / alpha * sf_k * z_bar;
    let sf_k_bar = nu / alpha * ln_fk * z_bar + sf1 / sf_k * sf1_bar
        - ((beta_star * alpha).powi(2) / sf_k.powi(3) / 12.0
            + rho * beta * nu * alpha / 4.0 / (sf_k * sf_k))
            * t
            * sf2_bar;
    let strike_bar = -ln_fk_bar / strike + beta_star * sf_k / (2.0 * strike) * sf_k_bar;
    let forward_bar = ln_fk_bar / forward + beta_star * sf_k / (2.0 * forward) * sf_k_bar;
    let nu_bar = sf_k * ln_fk * z_bar / alpha
        + (rho * beta * alpha / (4.0 * sf_k) + (2.0 - 3.0 * rho * rho) * nu / 12.0) * t * sf2_bar;

    let mut rho_bar = if small_z || (forward - strike).abs() < ATM_EPS {
        -z / 2.0 * rzxz_bar
    } else if near_rho_one {
        if z >= 1.0 {
            if rho_star == 0.0 {
                f64::NEG_INFINITY
            } else {
                xz_bar * (1.0 / rho_star + (0.5 - z) / ((z - 1.0) * (z - 1.0)))
            }
        } else {
            let ratio = z / (1.0 - z);
            (0.5 * ratio * ratio + 0.25 * (z - 4.0) * ratio.powi(3) / (1.0 - z) * rho_star) * xz_bar
        }
    } else {
        let root = (1.0 - 2.0 * rho * z + z * z).sqrt();
        ((-z / root - 1.0) / (root + z - rho) + 1.0 / rho_star) * xz_bar
    };
    rho_bar += (beta * nu * alpha / (4.0 * sf_k) - rho * nu * nu / 4.0) * t * sf2_bar;

    let alpha_bar = -nu / (alpha * alpha) * sf_k * ln_fk * z_bar
        + ((beta_star * alpha / sf_k) * (beta_star / sf_k) / 12.0 + rho * beta * nu / (4.0 * sf_k))
            * t
            * sf2_bar
        + rzxz * sf2 / sf1;
    let beta_bar = -0.5 * (forward * strike).ln() * sf_k * sf_k_bar
        - sf_k * (beta_star / 12.0 * ln2 + beta_star.powi(3) / 480.0 * ln2 * ln2) * sf1_bar
        + (-beta_star * alpha * alpha / sf_k / sf_k / 12.0 + rho * nu * alpha / 4.0 / sf_k)
            * t
            * sf2_bar;

    SABRVolatilityAdjoint {
        volatility: vol,
        forward: forward_bar,
        strike: strike_bar,
        alpha: alpha_bar,
        beta: beta_bar,
        rho: rho_bar,
        nu: nu_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> SABRParameters {
        SABRParameters::new(0.05, 0.5, -0.25, 0.4).unwrap()
    }

    const FORWARD: f64 = 0.05;
    const EXPIRY: f64 = 2.0;

    fn central<F: Fn(f64) -> f64>(f: F, x: f64, h: f64) -> f64 {
        (f(x + h) - f(x - h)) / (2.0 * h)
    }

    // ========================================
    // Value Tests
    // ========================================

    #[test]
    fn test_lognormal_limit_is_flat() {
        let p = SABRParameters::new(0.25, 1.0, 0.3, 0.0).unwrap();
        for strike in [0.01, 0.05, 0.2] {
            assert_relative_eq!(volatility(&p, FORWARD, strike, EXPIRY), 0.25, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_negative_rho_gives_downward_skew() {
        let p = params();
        let low = volatility(&p, FORWARD, 0.03, EXPIRY);
        let atm = volatility(&p, FORWARD, FORWARD, EXPIRY);
        let high = volatility(&p, FORWARD, 0.07, EXPIRY);
        assert!(low > atm, "low {} atm {}", low, atm);
        assert!(atm > high, "atm {} high {}", atm, high);
    }

    #[test]
    fn test_atm_branch_is_continuous() {
        let p = params();
        let atm = volatility(&p, FORWARD, FORWARD, EXPIRY);
        let near = volatility(&p, FORWARD, FORWARD * (1.0 + 1e-5), EXPIRY);
        assert_relative_eq!(atm, near, max_relative = 1e-4);
    }

    #[test]
    fn test_beta_branches_are_continuous() {
        let normal = SABRParameters::new(0.01, 0.0, -0.2, 0.3).unwrap();
        let almost_normal = SABRParameters::new(0.01, 1e-6, -0.2, 0.3).unwrap();
        assert_relative_eq!(
            volatility(&normal, 0.03, 0.04, EXPIRY),
            volatility(&almost_normal, 0.03, 0.04, EXPIRY),
            max_relative = 1e-4
        );

        let lognormal = SABRParameters::new(0.2, 1.0, -0.2, 0.3).unwrap();
        let almost_lognormal = SABRParameters::new(0.2, 1.0 - 1e-6, -0.2, 0.3).unwrap();
        assert_relative_eq!(
            volatility(&lognormal, 0.03, 0.04, EXPIRY),
            volatility(&almost_lognormal, 0.03, 0.04, EXPIRY),
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_zero_alpha() {
        let p = SABRParameters::new(0.0, 0.5, -0.25, 0.4).unwrap();
        assert_eq!(volatility(&p, FORWARD, 0.04, EXPIRY), 0.0);
        let adjoint = volatility_adjoint(&p, FORWARD, 0.04, EXPIRY);
        assert_eq!(adjoint.volatility, 0.0);
        assert_eq!(adjoint.alpha, LARGE_ALPHA_SENSITIVITY);

        let atm = volatility_adjoint(&p, FORWARD, FORWARD, EXPIRY);
        let expected = (1.0 + (2.0 - 3.0 * 0.0625) * 0.16 / 24.0 * EXPIRY) / FORWARD.powf(0.5);
        assert_relative_eq!(atm.alpha, expected, max_relative = 1e-14);
    }

    #[test]
    fn test_zero_strike_uses_cutoff() {
        let p = params();
        assert_eq!(
            volatility(&p, FORWARD, 0.0, EXPIRY),
            volatility(&p, FORWARD, FORWARD * CUTOFF_MONEYNESS, EXPIRY)
        );
    }

    #[test]
    fn test_z_over_chi_limits() {
        assert_relative_eq!(z_over_chi(0.3, 1e-8), 1.0, epsilon = 1e-8);
        // rho = -1 and z > -1 reduces to z / ln(1 + z)
        assert_relative_eq!(z_over_chi(-1.0, 0.5), 0.5 / 1.5_f64.ln(), max_relative = 1e-14);
        assert_eq!(z_over_chi(1.0, 2.0), 0.0);
        assert!(z_over_chi(0.999_999, 0.5).is_finite());
    }

    // ========================================
    // Adjoint Tests
    // ========================================

    #[test]
    fn test_adjoint_value_matches_volatility() {
        let p = params();
        for strike in [0.01, 0.03, 0.045, 0.07, 0.2] {
            let adjoint = volatility_adjoint(&p, FORWARD, strike, EXPIRY);
            assert_relative_eq!(
                adjoint.volatility,
                volatility(&p, FORWARD, strike, EXPIRY),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_adjoint_against_finite_differences() {
        let p = params();
        let h = 1e-6;
        for strike in [0.02, 0.035, 0.08] {
            let adjoint = volatility_adjoint(&p, FORWARD, strike, EXPIRY);

            let d_forward = central(|f| volatility(&p, f, strike, EXPIRY), FORWARD, h * 0.01);
            let d_strike = central(|k| volatility(&p, FORWARD, k, EXPIRY), strike, h * 0.01);
            let d_alpha = central(
                |a| volatility(&SABRParameters { alpha: a, ..p }, FORWARD, strike, EXPIRY),
                p.alpha,
                h,
            );
            let d_beta = central(
                |b| volatility(&SABRParameters { beta: b, ..p }, FORWARD, strike, EXPIRY),
                p.beta,
                h,
            );
            let d_rho = central(
                |r| volatility(&SABRParameters { rho: r, ..p }, FORWARD, strike, EXPIRY),
                p.rho,
                h,
            );
            let d_nu = central(
                |n| volatility(&SABRParameters { nu: n, ..p }, FORWARD, strike, EXPIRY),
                p.nu,
                h,
            );

            assert_relative_eq!(adjoint.forward, d_forward, max_relative = 1e-5, epsilon = 1e-6);
            assert_relative_eq!(adjoint.strike, d_strike, max_relative = 1e-5, epsilon = 1e-6);
            assert_relative_eq!(adjoint.alpha, d_alpha, max_relative = 1e-6);
            assert_relative_eq!(adjoint.beta, d_beta, max_relative = 1e-5, epsilon = 1e-7);
            assert_relative_eq!(adjoint.rho, d_rho, max_relative = 1e-5, epsilon = 1e-7);
            assert_relative_eq!(adjoint.nu, d_nu, max_relative = 1e-5, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_parameter_accessor() {
        let adjoint = volatility_adjoint(&params(), FORWARD, 0.03, EXPIRY);
        assert_eq!(adjoint.parameter(SabrParameter::Alpha), adjoint.alpha);
        assert_eq!(adjoint.parameter(SabrParameter::Rho), adjoint.rho);
        assert_eq!(adjoint.parameter(SabrParameter::Nu), adjoint.nu);
    }
}

//! Replication integrands.
//!
//! Each integrand is a pure function of the integration variable `x` once
//! built; the convexity kernel and the smile are borrowed for the duration
//! of one pricing call.

use pricer_models::analytical::{black_price, black_price_adjoint};
use pricer_models::models::sabr::{HaganSmile, SabrParameter, SmileFunction, SmilePriceAdjoint};

use super::convexity::ConvexityKernel;

/// Hagan smile whose SABR strike is floored; Black is still evaluated at the
/// actual strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlooredHaganSmile {
    smile: HaganSmile,
    floor: f64,
}

impl FlooredHaganSmile {
    /// Wrap `smile` with a strike floor.
    pub fn new(smile: HaganSmile, floor: f64) -> Self {
        Self { smile, floor }
    }

    /// Underlying smile.
    pub fn smile(&self) -> &HaganSmile {
        &self.smile
    }

    /// Price with Black and SABR derivatives.
    ///
    /// Below the floor the volatility no longer depends on the strike and
    /// its strike derivative is reported as zero.
    pub fn adjoint(&self, strike: f64, is_call: bool) -> SmilePriceAdjoint {
        let forward = SmileFunction::forward(&self.smile);
        let expiry = SmileFunction::expiry(&self.smile);
        let mut volatility = self
            .smile
            .parameters()
            .volatility_adjoint(forward, strike.max(self.floor), expiry);
        if strike < self.floor {
            volatility.strike = 0.0;
        }
        let black = black_price_adjoint(forward, strike, expiry, volatility.volatility, is_call);
        SmilePriceAdjoint { black, volatility }
    }
}

impl SmileFunction for FlooredHaganSmile {
    fn forward(&self) -> f64 {
        self.smile.forward()
    }

    fn expiry(&self) -> f64 {
        self.smile.expiry()
    }

    fn price(&self, strike: f64, is_call: bool) -> f64 {
        let vol = self.smile.volatility(strike.max(self.floor));
        black_price(self.smile.forward(), strike, self.smile.expiry(), vol, is_call)
    }
}

/// `factor · (k″(x)(x − K) + 2k′(x)) · P(x)`.
pub struct PriceIntegrand<'a, S> {
    kernel: &'a ConvexityKernel,
    smile: &'a S,
    strike: f64,
    is_call: bool,
    factor: f64,
}

impl<'a, S: SmileFunction> PriceIntegrand<'a, S> {
    /// Integrand for strike `strike` with normalisation `factor = g(F)/h(F)`.
    pub fn new(kernel: &'a ConvexityKernel, smile: &'a S, strike: f64, is_call: bool, factor: f64) -> Self {
        Self {
            kernel,
            smile,
            strike,
            is_call,
            factor,
        }
    }

    /// Value at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (kp, kpp) = self.kernel.kp_kpp(x);
        self.factor * (kpp * (x - self.strike) + 2.0 * kp) * self.smile.price(x, self.is_call)
    }
}

/// Forward derivative of the price integrand:
/// `(k″(x)(x − K) + 2k′(x)) · (n′(F)·P(x) + n(F)·∂P(x)/∂F)`.
pub struct DeltaIntegrand<'a> {
    kernel: &'a ConvexityKernel,
    smile: &'a FlooredHaganSmile,
    strike: f64,
    is_call: bool,
    n: f64,
    n_prime: f64,
}

impl<'a> DeltaIntegrand<'a> {
    /// Integrand with `(n, n′)` evaluated at the forward.
    pub fn new(kernel: &'a ConvexityKernel, smile: &'a FlooredHaganSmile, strike: f64, is_call: bool) -> Self {
        let (n, n_prime) = kernel.n_np(smile.forward());
        Self {
            kernel,
            smile,
            strike,
            is_call,
            n,
            n_prime,
        }
    }

    /// `n′·P + n·∂P/∂F` at strike `x`.
    pub fn price_derivative(&self, x: f64) -> f64 {
        let adjoint = self.smile.adjoint(x, self.is_call);
        self.n_prime * adjoint.black.price + self.n * adjoint.forward_derivative()
    }

    /// Value at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (kp, kpp) = self.kernel.kp_kpp(x);
        (kpp * (x - self.strike) + 2.0 * kp) * self.price_derivative(x)
    }
}

/// Derivative of the price integrand with respect to one SABR parameter:
/// `factor · (k″(x)(x − K) + 2k′(x)) · ∂P/∂σ(x) · ∂σ(x)/∂p`.
pub struct VegaIntegrand<'a> {
    kernel: &'a ConvexityKernel,
    smile: &'a FlooredHaganSmile,
    strike: f64,
    is_call: bool,
    factor: f64,
}

impl<'a> VegaIntegrand<'a> {
    /// Integrand for strike `strike` with normalisation `factor`.
    pub fn new(kernel: &'a ConvexityKernel, smile: &'a FlooredHaganSmile, strike: f64, is_call: bool, factor: f64) -> Self {
        Self {
            kernel,
            smile,
            strike,
            is_call,
            factor,
        }
    }

    /// Value at `x` for `parameter`.
    pub fn evaluate(&self, x: f64, parameter: SabrParameter) -> f64 {
        let (kp, kpp) = self.kernel.kp_kpp(x);
        let adjoint = self.smile.adjoint(x, self.is_call);
        self.factor
            * (kpp * (x - self.strike) + 2.0 * kp)
            * adjoint.black.volatility
            * adjoint.volatility.parameter(parameter)
    }
}

/// Strike derivative of the integral part: `−k″(x) · P(x)`.
pub struct StrikeIntegrand<'a, S> {
    kernel: &'a ConvexityKernel,
    smile: &'a S,
    is_call: bool,
}

impl<'a, S: SmileFunction> StrikeIntegrand<'a, S> {
    /// Strike integrand over `smile`.
    pub fn new(kernel: &'a ConvexityKernel, smile: &'a S, is_call: bool) -> Self {
        Self { kernel, smile, is_call }
    }

    /// Value at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (_, kpp) = self.kernel.kp_kpp(x);
        -kpp * self.smile.price(x, self.is_call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::models::sabr::SABRParameters;

    fn params() -> SABRParameters {
        SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap()
    }

    fn smile(forward: f64) -> FlooredHaganSmile {
        FlooredHaganSmile::new(HaganSmile::new(params(), forward, 5.0), 1e-4)
    }

    fn kernel() -> ConvexityKernel {
        ConvexityKernel::new(40, 4, 5.25, 5.0)
    }

    // ========================================
    // Floored Smile Tests
    // ========================================

    #[test]
    fn test_floor_applies_to_volatility_only() {
        let s = smile(0.03);
        let vol_at_floor = s.smile().volatility(1e-4);
        let expected = black_price(0.03, 5e-5, 5.0, vol_at_floor, false);
        assert_eq!(s.price(5e-5, false), expected);
        assert_eq!(s.adjoint(5e-5, true).volatility.strike, 0.0);
    }

    #[test]
    fn test_above_floor_matches_hagan() {
        let s = smile(0.03);
        assert_eq!(s.price(0.02, true), s.smile().price(0.02, true));
        let adjoint = s.adjoint(0.02, true);
        assert_eq!(adjoint, s.smile().price_adjoint(0.02, true));
    }

    // ========================================
    // Integrand Tests
    // ========================================

    #[test]
    fn test_delta_integrand_is_forward_derivative_of_price_integrand() {
        let k = kernel();
        let forward = 0.03;
        let eps = 1e-7;
        let x = 0.045;
        let strike = 0.02;

        let price_at = |f: f64| {
            let s = smile(f);
            let (n, _) = k.n_np(f);
            PriceIntegrand::new(&k, &s, strike, true, n).evaluate(x)
        };
        let fd = (price_at(forward + eps) - price_at(forward - eps)) / (2.0 * eps);

        let s = smile(forward);
        let delta = DeltaIntegrand::new(&k, &s, strike, true).evaluate(x);
        assert_relative_eq!(delta, fd, max_relative = 1e-6);
    }

    #[test]
    fn test_vega_integrand_against_parameter_bumps() {
        let k = kernel();
        let forward = 0.03;
        let factor = k.g(forward) / k.h(forward);
        let x = 0.05;
        let s = smile(forward);
        let vega = VegaIntegrand::new(&k, &s, 0.02, true, factor);

        for parameter in SabrParameter::ALL {
            let eps = 1e-6;
            let bumped = |shift: f64| {
                let smile = FlooredHaganSmile::new(
                    HaganSmile::new(params().bumped(parameter, shift), forward, 5.0),
                    1e-4,
                );
                PriceIntegrand::new(&k, &smile, 0.02, true, factor).evaluate(x)
            };
            let fd = (bumped(eps) - bumped(-eps)) / (2.0 * eps);
            assert_relative_eq!(vega.evaluate(x, parameter), fd, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_strike_integrand_sign() {
        let k = kernel();
        let s = smile(0.03);
        let integrand = StrikeIntegrand::new(&k, &s, true);
        let (_, kpp) = k.kp_kpp(0.04);
        assert_eq!(integrand.evaluate(0.04), -kpp * s.price(0.04, true));
    }
}

//! Convexity-adjustment functions of the swap rate.
//!
//! With `N` fixed periods, `m` periods per year, `τ = 1/m` and
//! `η = −(payment − settlement)`:
//!
//! ```text
//! g(x) = (1 − (1 + x/m)^(−N)) / x      cash annuity
//! h(x) = (1 + τx)^η                    discount factor to payment
//! k(x) = h(x) / g(x)
//! ```
//!
//! A CMS payoff `f(S)` paid at the payment date is replicated by
//! `k(S)·f(S)` under the annuity measure, renormalised by `g(F)/h(F)`.

use pricer_models::instruments::FixedFloatSwap;

/// Rates below this use the `x → 0` limits.
pub const RATE_EPS: f64 = 1e-10;

/// `g`, `h` and their derivatives for one CMS period.
///
/// Built once per pricing call and shared by every integrand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvexityKernel {
    nb_fixed_periods: f64,
    periods_per_year: f64,
    tau: f64,
    eta: f64,
}

impl ConvexityKernel {
    /// Kernel for `nb_fixed_periods` payments at `periods_per_year` per year,
    /// paying `payment_time − settlement_time` after settlement.
    pub fn new(nb_fixed_periods: usize, periods_per_year: u32, payment_time: f64, settlement_time: f64) -> Self {
        let periods_per_year = f64::from(periods_per_year);
        Self {
            nb_fixed_periods: nb_fixed_periods as f64,
            periods_per_year,
            tau: 1.0 / periods_per_year,
            eta: -(payment_time - settlement_time),
        }
    }

    /// Kernel from an underlying swap's fixed-leg schedule.
    pub fn from_swap(swap: &FixedFloatSwap, payment_time: f64, settlement_time: f64) -> Self {
        Self::new(
            swap.nb_fixed_periods(),
            swap.fixed_periods_per_year(),
            payment_time,
            settlement_time,
        )
    }

    /// Number of fixed periods `N`.
    pub fn nb_fixed_periods(&self) -> f64 {
        self.nb_fixed_periods
    }

    /// Periods per year `m`.
    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }

    /// Exponent `η` of the discount proxy.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Cash annuity `g(x)`.
    pub fn g(&self, x: f64) -> f64 {
        if x >= RATE_EPS {
            let period_factor = 1.0 + x / self.periods_per_year;
            (1.0 - period_factor.powf(-self.nb_fixed_periods)) / x
        } else {
            self.nb_fixed_periods / self.periods_per_year
        }
    }

    /// Discount proxy `h(x)`.
    pub fn h(&self, x: f64) -> f64 {
        (1.0 + self.tau * x).powf(self.eta)
    }

    /// `k(x) = h(x) / g(x)`.
    pub fn k(&self, x: f64) -> f64 {
        let (h, g) = if x >= RATE_EPS {
            (self.h(x), self.g(x))
        } else {
            (1.0, self.nb_fixed_periods / self.periods_per_year)
        };
        h / g
    }

    /// `(g(x), g′(x))`.
    pub fn g_gp(&self, x: f64) -> (f64, f64) {
        let n = self.nb_fixed_periods;
        let m = self.periods_per_year;
        if x >= RATE_EPS {
            let period_factor = 1.0 + x / m;
            let n_period_discount = period_factor.powf(-n);
            let g = (1.0 - n_period_discount) / x;
            let gp = -g / x + n / (x * m) * n_period_discount / period_factor;
            (g, gp)
        } else {
            (n * self.tau, -n * (n + 1.0) * self.tau * self.tau / 2.0)
        }
    }

    /// `(h(x), h′(x))`.
    pub fn h_hp(&self, x: f64) -> (f64, f64) {
        let h = self.h(x);
        (h, self.eta * self.tau * h / (1.0 + x * self.tau))
    }

    /// `(n(x), n′(x))` with `n = g / h`, the normalisation factor.
    pub fn n_np(&self, x: f64) -> (f64, f64) {
        let (g, gp) = self.g_gp(x);
        let (h, hp) = self.h_hp(x);
        (g / h, gp / h - g * hp / (h * h))
    }

    /// `(k′(x), k″(x))`.
    pub fn kp_kpp(&self, x: f64) -> (f64, f64) {
        let n = self.nb_fixed_periods;
        let m = self.periods_per_year;
        let period_factor = 1.0 + x / m;
        let n_period_discount = period_factor.powf(-n);

        let (g, gp, gpp) = if x >= RATE_EPS {
            let g = (1.0 - n_period_discount) / x;
            let gp = -g / x + n / (x * m) * n_period_discount / period_factor;
            let gpp = 2.0 / (x * x) * g
                - 2.0 * n / (x * x * m) * n_period_discount / period_factor
                - (n + 1.0) * n / (x * m * m) * n_period_discount / (period_factor * period_factor);
            (g, gp, gpp)
        } else {
            (
                n / m,
                -n * (n + 1.0) / (2.0 * m * m),
                n / 2.0 * (n + 1.0) * (1.0 + (n + 2.0) / 3.0) / (m * m * m),
            )
        };

        let h = period_factor.powf(self.eta);
        let hp = self.eta * self.tau * h / period_factor;
        let hpp = (self.eta - 1.0) * self.tau * hp / period_factor;

        let kp = hp / g - h * gp / (g * g);
        let kpp = hpp / g - 2.0 * hp * gp / (g * g) - h * (gpp / (g * g) - 2.0 * (gp * gp) / (g * g * g));
        (kp, kpp)
    }
}

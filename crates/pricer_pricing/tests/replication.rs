//! End-to-end properties of CMS replication pricing.
//!
//! # Test Categories
//!
//! 1. **Coupon/cap equivalence**: a coupon is a cap struck at zero
//! 2. **Monotonicity**: caps fall and floors rise with the strike
//! 3. **Cap/floor parity**: up to the convexity of `k`
//! 4. **Reference quadrature**: adaptive integration against Gauss–Legendre
//! 5. **Extrapolated tail**: agrees with the plain smile where the tail is inactive

use approx::assert_relative_eq;
use pricer_core::market_data::{CurveEnum, CurveSet};
use pricer_core::math::integrators::{GaussLegendreIntegrator, Integrator, RungeKuttaIntegrator};
use pricer_models::instruments::{CapFloorCms, CouponCms, FixedFloatSwap};
use pricer_models::models::sabr::{HaganSmile, SABRParameters, SABRSurface, SmileFunction};
use pricer_models::schedules::Frequency;
use pricer_pricing::replication::integrand::{FlooredHaganSmile, PriceIntegrand};
use pricer_pricing::replication::{
    CapFloorCmsSabrExtrapolationRightReplicationMethod, CapFloorCmsSabrReplicationMethod,
    CmsReplication, ConvexityKernel, CouponCmsSabrExtrapolationRightReplicationMethod,
    CouponCmsSabrReplicationMethod,
};
use pricer_pricing::{ExtrapolationConfig, ReplicationConfig, SABRMarketData};
use proptest::prelude::*;

const NOTIONAL: f64 = 10_000_000.0;
const ACCRUAL: f64 = 0.25;
const STRIKE_FLOOR: f64 = 1e-4;

fn sabr() -> SABRParameters {
    SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap()
}

fn market() -> SABRMarketData<SABRSurface> {
    let curves = CurveSet::new()
        .with_curve("DSC", CurveEnum::flat(0.02))
        .with_curve("FWD", CurveEnum::flat(0.028));
    SABRMarketData::new(curves, SABRSurface::flat(sabr()))
}

/// 10Y quarterly swap starting at the 5Y fixing.
fn coupon() -> CouponCms {
    let swap = FixedFloatSwap::from_tenor(
        5.0,
        10.0,
        Frequency::Quarterly,
        Frequency::Quarterly,
        "DSC",
        "FWD",
    )
    .unwrap();
    CouponCms::new(5.25, ACCRUAL, NOTIONAL, 5.0, swap, 5.0).unwrap()
}

fn cap_floor(strike: f64, is_cap: bool) -> CapFloorCms {
    CapFloorCms::from_coupon(&coupon(), strike, is_cap).unwrap()
}

fn tight() -> ReplicationConfig {
    ReplicationConfig::default().with_price_tolerance(1e-4)
}

/// Present value by composite Gauss–Legendre, split at the smile's strike floor.
fn reference_present_value(instrument: &CapFloorCms, m: &SABRMarketData<SABRSurface>) -> f64 {
    let strike = instrument.strike();
    let is_cap = instrument.is_cap();
    let forward = m.forward(instrument.swap()).unwrap();
    let df = m.discount_factor("DSC", 5.25).unwrap();
    let kernel = ConvexityKernel::from_swap(instrument.swap(), 5.25, 5.0);
    let smile = FlooredHaganSmile::new(HaganSmile::new(sabr(), forward, 5.0), STRIKE_FLOOR);
    let factor = kernel.g(forward) / kernel.h(forward);
    let integrand = PriceIntegrand::new(&kernel, &smile, strike, is_cap, factor);
    let rule = GaussLegendreIntegrator::new(32, 400).unwrap();

    let (lower, upper) = if is_cap {
        (strike, strike + 1.0)
    } else {
        (0.0, strike.max(0.0))
    };
    let mut integral = 0.0;
    let mut start = lower;
    if lower < STRIKE_FLOOR && STRIKE_FLOOR < upper {
        integral += rule.integrate(|x| integrand.evaluate(x), lower, STRIKE_FLOOR).unwrap();
        start = STRIKE_FLOOR;
    }
    integral += rule.integrate(|x| integrand.evaluate(x), start, upper).unwrap();
    let integral = if is_cap { integral } else { -integral };

    (factor * kernel.k(strike) * smile.price(strike, is_cap) + integral) * df * instrument.notional() * ACCRUAL
}

// ============================================================================
// Coupon / Cap Equivalence
// ============================================================================

#[test]
fn test_coupon_is_cap_at_zero_strike() {
    let m = market();
    let coupon_pv = CouponCmsSabrReplicationMethod::default()
        .present_value(&coupon(), &m)
        .unwrap();
    let cap_pv = CapFloorCmsSabrReplicationMethod::default()
        .present_value(&cap_floor(0.0, true), &m)
        .unwrap();
    assert_eq!(coupon_pv, cap_pv);
}

#[test]
fn test_coupon_above_forward_value() {
    let m = market();
    let c = coupon();
    let pv = CouponCmsSabrReplicationMethod::default().present_value(&c, &m).unwrap();
    let forward = m.forward(c.swap()).unwrap();
    let df = m.discount_factor("DSC", 5.25).unwrap();
    assert!(pv > forward * df * NOTIONAL * ACCRUAL);
}

// ============================================================================
// Monotonicity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn cap_decreasing_floor_increasing(low in 0.005f64..0.06, gap in 0.001f64..0.02) {
        let m = market();
        let method = CapFloorCmsSabrReplicationMethod::new(tight()).unwrap();
        let high = low + gap;
        let cap_low = method.present_value(&cap_floor(low, true), &m).unwrap();
        let cap_high = method.present_value(&cap_floor(high, true), &m).unwrap();
        let floor_low = method.present_value(&cap_floor(low, false), &m).unwrap();
        let floor_high = method.present_value(&cap_floor(high, false), &m).unwrap();
        prop_assert!(cap_high <= cap_low, "cap {} -> {}", cap_low, cap_high);
        prop_assert!(floor_high >= floor_low, "floor {} -> {}", floor_low, floor_high);
    }
}

// ============================================================================
// Cap / Floor Parity
// ============================================================================

#[test]
fn test_cap_floor_parity_up_to_convexity() {
    let m = market();
    let method = CapFloorCmsSabrReplicationMethod::new(tight()).unwrap();
    let coupon_pv = CouponCmsSabrReplicationMethod::new(tight())
        .unwrap()
        .present_value(&coupon(), &m)
        .unwrap();
    let df = m.discount_factor("DSC", 5.25).unwrap();

    for strike in [0.01, 0.025, 0.04] {
        let cap = method.present_value(&cap_floor(strike, true), &m).unwrap();
        let floor = method.present_value(&cap_floor(strike, false), &m).unwrap();
        let fixed_leg = strike * NOTIONAL * ACCRUAL * df;
        // The pay-date measure carries mass n(F)·E[k(S)], slightly off one
        let gap = (cap - floor) - (coupon_pv - fixed_leg);
        assert!(
            gap.abs() < 3e-3 * fixed_leg,
            "strike {}: gap {} vs fixed leg {}",
            strike,
            gap,
            fixed_leg
        );
    }
}

// ============================================================================
// Reference Quadrature
// ============================================================================

#[test]
fn test_concrete_scenario_matches_gauss_legendre() {
    // N = 40, m = 4, F = 3%, K = 2%, DF = 0.9, fixing 5Y
    let kernel = ConvexityKernel::new(40, 4, 5.25, 5.0);
    let forward = 0.03;
    let strike = 0.02;
    let discount_factor = 0.9;
    let smile = FlooredHaganSmile::new(HaganSmile::new(sabr(), forward, 5.0), 1e-4);
    let factor = kernel.g(forward) / kernel.h(forward);
    let integrand = PriceIntegrand::new(&kernel, &smile, strike, true, factor);
    let strike_part = discount_factor * factor * kernel.k(strike) * smile.price(strike, true);

    let adaptive = RungeKuttaIntegrator::new(1e-14, 1e-12, 6)
        .integrate(|x| integrand.evaluate(x), strike, strike + 1.0)
        .unwrap();
    let reference = GaussLegendreIntegrator::new(32, 400)
        .unwrap()
        .integrate(|x| integrand.evaluate(x), strike, strike + 1.0)
        .unwrap();

    let adaptive_price = strike_part + discount_factor * adaptive;
    let reference_price = strike_part + discount_factor * reference;
    assert_relative_eq!(adaptive_price, reference_price, max_relative = 1e-8);
    assert!(reference_price > discount_factor * (forward - strike));
}

#[test]
fn test_method_matches_reference_integration() {
    let m = market();
    let cap = cap_floor(0.02, true);
    let method = CapFloorCmsSabrReplicationMethod::new(
        ReplicationConfig::default().with_price_tolerance(1e-6),
    )
    .unwrap();
    let pv = method.present_value(&cap, &m).unwrap();
    let reference = reference_present_value(&cap, &m);

    assert_relative_eq!(pv, reference, max_relative = 1e-8);
}

#[test]
fn test_floor_matches_reference_integration() {
    let m = market();
    let method = CapFloorCmsSabrReplicationMethod::new(
        ReplicationConfig::default().with_price_tolerance(1e-6),
    )
    .unwrap();
    for strike in [0.005, 0.02, 0.03] {
        let floor = cap_floor(strike, false);
        let pv = method.present_value(&floor, &m).unwrap();
        let reference = reference_present_value(&floor, &m);
        let bound = (1e-8 * reference.abs()).max(1e-6);
        assert!((pv - reference).abs() <= bound, "strike {}: {} vs {}", strike, pv, reference);
    }
}

#[test]
fn test_default_tolerance_is_a_price_budget() {
    // The default price tolerance is one currency unit, whatever the notional
    let m = market();
    let config = ReplicationConfig::default();
    let method = CapFloorCmsSabrReplicationMethod::new(config).unwrap();
    for notional in [1e4, 1e6, 1e8] {
        let c = coupon().with_notional(notional).unwrap();
        for (strike, is_cap) in [(0.0, true), (0.02, true), (0.04, true), (0.02, false), (0.035, false)] {
            let instrument = CapFloorCms::from_coupon(&c, strike, is_cap).unwrap();
            let pv = method.present_value(&instrument, &m).unwrap();
            let reference = reference_present_value(&instrument, &m);
            assert!(
                (pv - reference).abs() <= config.price_tolerance,
                "notional {} strike {} cap {}: {} vs {}",
                notional,
                strike,
                is_cap,
                pv,
                reference
            );
        }
    }
}

#[test]
fn test_coupon_matches_reference_integration() {
    let m = market();
    let pv = CouponCmsSabrReplicationMethod::new(tight())
        .unwrap()
        .present_value(&coupon(), &m)
        .unwrap();
    let reference = reference_present_value(&cap_floor(0.0, true), &m);
    assert!((pv - reference).abs() <= tight().price_tolerance);
}

// ============================================================================
// Extrapolated Tail
// ============================================================================

#[test]
fn test_extrapolated_coupon_close_to_plain() {
    let m = market();
    let plain = CouponCmsSabrReplicationMethod::default()
        .coupon_present_value(&coupon(), &m)
        .unwrap();
    let extrapolated = CouponCmsSabrExtrapolationRightReplicationMethod::new(
        ReplicationConfig::default(),
        ExtrapolationConfig::new(0.10, 2.5),
    )
    .unwrap()
    .coupon_present_value(&coupon(), &m)
    .unwrap();
    // The tail only changes strikes above 10%
    assert_relative_eq!(extrapolated, plain, max_relative = 5e-2);
}

#[test]
fn test_extrapolated_cap_decreasing_in_mu() {
    let m = market();
    let cap = cap_floor(0.05, true);
    let prices: Vec<f64> = [1.5, 2.5, 5.0, 20.0]
        .iter()
        .map(|&mu| {
            CapFloorCmsSabrExtrapolationRightReplicationMethod::with_tail(0.08, mu)
                .unwrap()
                .present_value(&cap, &m)
                .unwrap()
        })
        .collect();
    for pair in prices.windows(2) {
        assert!(pair[1] < pair[0], "{:?}", prices);
    }
}

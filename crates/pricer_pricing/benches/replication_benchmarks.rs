//! Criterion benchmarks for pricer_pricing replication methods.
//!
//! Benchmarks cover:
//! - CMS cap/floor present value across strikes and integration tolerances
//! - Curve and SABR adjoint sensitivities against a bump-and-revalue baseline
//! - CMS spread pricing and implied correlation
//! - Parallel strip pricing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::{CurveEnum, CurveSet};
use pricer_models::instruments::{CapFloorCms, CapFloorCmsSpread, CouponCms, FixedFloatSwap};
use pricer_models::models::sabr::{SABRParameters, SABRSurface, SabrParameter};
use pricer_models::schedules::Frequency;
use pricer_pricing::config::CorrelationFunction;
use pricer_pricing::portfolio::present_values;
use pricer_pricing::replication::CapFloorCmsSabrExtrapolationRightReplicationMethod;
use pricer_pricing::{
    CapFloorCmsSabrReplicationMethod, CapFloorCmsSpreadSabrBinormalMethod, ReplicationConfig,
    SABRMarketData,
};

fn market() -> SABRMarketData<SABRSurface> {
    let curves = CurveSet::new()
        .with_curve("DSC", CurveEnum::flat(0.02))
        .with_curve("FWD", CurveEnum::flat(0.03));
    SABRMarketData::new(
        curves,
        SABRSurface::flat(SABRParameters::new(0.03, 0.5, -0.2, 0.3).unwrap()),
    )
}

fn swap(tenor: f64) -> FixedFloatSwap {
    FixedFloatSwap::from_tenor(5.0, tenor, Frequency::Annual, Frequency::SemiAnnual, "DSC", "FWD")
        .unwrap()
}

fn coupon() -> CouponCms {
    CouponCms::new(6.0, 1.0, 1e6, 5.0, swap(10.0), 5.0).unwrap()
}

fn cap(strike: f64) -> CapFloorCms {
    CapFloorCms::from_coupon(&coupon(), strike, true).unwrap()
}

/// Cap present value for strikes from deep in to far out of the money.
fn bench_cap_present_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("cap_present_value");
    let m = market();
    let method = CapFloorCmsSabrReplicationMethod::default();

    for strike in [0.0, 0.03, 0.08] {
        let instrument = cap(strike);
        group.bench_with_input(BenchmarkId::new("sabr", strike), &instrument, |b, instrument| {
            b.iter(|| method.present_value(black_box(instrument), &m))
        });
    }

    let tail = CapFloorCmsSabrExtrapolationRightReplicationMethod::with_tail(0.10, 2.5).unwrap();
    let instrument = cap(0.03);
    group.bench_function("sabr_extrapolation_right", |b| {
        b.iter(|| tail.present_value(black_box(&instrument), &m))
    });

    group.finish();
}

/// Effect of the price tolerance on the adaptive integration.
fn bench_price_tolerance(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_tolerance");
    let m = market();
    let instrument = cap(0.03);

    for tolerance in [1.0, 1e-2, 1e-4] {
        let method =
            CapFloorCmsSabrReplicationMethod::new(ReplicationConfig::default().with_price_tolerance(tolerance))
                .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(tolerance), &method, |b, method| {
            b.iter(|| method.present_value(black_box(&instrument), &m))
        });
    }

    group.finish();
}

/// Adjoint sensitivities against bumping every input once.
fn bench_sensitivities(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivities");
    let m = market();
    let method = CapFloorCmsSabrReplicationMethod::default();
    let instrument = cap(0.03);

    group.bench_function("curve_adjoint", |b| {
        b.iter(|| method.present_value_curve_sensitivity(black_box(&instrument), &m))
    });
    group.bench_function("sabr_adjoint", |b| {
        b.iter(|| method.present_value_sabr_sensitivity(black_box(&instrument), &m))
    });
    group.bench_function("bump_and_revalue", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for name in ["DSC", "FWD"] {
                let shifted = m.curves().with_parallel_shift(name, 1e-5).unwrap();
                total += method.present_value(&instrument, &m.with_curves(shifted)).unwrap();
            }
            for parameter in SabrParameter::ALL {
                let surface = m.sabr().with_parameter_shift(parameter, 1e-5);
                total += method.present_value(&instrument, &m.with_sabr(surface)).unwrap();
            }
            black_box(total)
        })
    });

    group.finish();
}

fn bench_spread(c: &mut Criterion) {
    let mut group = c.benchmark_group("cms_spread");
    let m = market();
    let spread = CapFloorCmsSpread::new(6.0, 1.0, 1e6, 5.0, swap(10.0), swap(2.0), 5.0, 0.001, true).unwrap();
    let method = CapFloorCmsSpreadSabrBinormalMethod::new(
        CorrelationFunction::Constant(0.8),
        CapFloorCmsSabrReplicationMethod::default(),
    );
    let pv = method.present_value(&spread, &m).unwrap();

    group.bench_function("present_value", |b| {
        b.iter(|| method.present_value(black_box(&spread), &m))
    });
    group.bench_function("implied_correlation", |b| {
        b.iter(|| method.implied_correlation(black_box(&spread), &m, black_box(pv)))
    });

    group.finish();
}

/// Strip of caps priced through the rayon pool.
fn bench_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip");
    let m = market();
    let method = CapFloorCmsSabrReplicationMethod::default();

    for size in [10, 100] {
        let strip: Vec<CapFloorCms> = (0..size)
            .map(|i| cap(0.005 * (i % 12) as f64))
            .collect();
        group.bench_with_input(BenchmarkId::new("parallel", size), &strip, |b, strip| {
            b.iter(|| present_values(&method, black_box(strip), &m))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cap_present_value,
    bench_price_tolerance,
    bench_sensitivities,
    bench_spread,
    bench_strip,
);
criterion_main!(benches);

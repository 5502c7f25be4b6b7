//! Criterion benchmarks for pricer_core quadrature and root finding.
//!
//! Compares the adaptive Runge–Kutta integrator against fixed Gauss–Legendre
//! rules on a smooth and a sharply peaked integrand, and times Brent on a
//! transcendental objective.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::integrators::{GaussLegendreIntegrator, Integrator, RungeKuttaIntegrator};
use pricer_core::math::solvers::BrentSolver;

/// Smooth, slowly decaying integrand similar to an out-of-the-money option strip.
fn smooth(x: f64) -> f64 {
    (-(x - 0.03).powi(2) / 0.002).exp() * (1.0 + x).powf(-10.0)
}

/// Integrand with a narrow peak.
fn peaked(x: f64) -> f64 {
    1e-3 / ((x - 0.3).powi(2) + 1e-6)
}

fn bench_adaptive_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptive_integration");

    for abs_tol in [1e-8, 1e-10, 1e-12] {
        let integrator = RungeKuttaIntegrator::new(abs_tol, 1e-10, 6);
        group.bench_with_input(
            BenchmarkId::new("smooth", abs_tol),
            &integrator,
            |b, integrator| {
                b.iter(|| integrator.integrate(smooth, black_box(0.0), black_box(1.0)))
            },
        );
        group.bench_with_input(
            BenchmarkId::new("peaked", abs_tol),
            &integrator,
            |b, integrator| {
                b.iter(|| integrator.integrate(peaked, black_box(0.0), black_box(1.0)))
            },
        );
    }

    group.finish();
}

fn bench_gauss_legendre(c: &mut Criterion) {
    let mut group = c.benchmark_group("gauss_legendre");

    for order in [16, 32, 64] {
        group.bench_with_input(BenchmarkId::new("nodes", order), &order, |b, &order| {
            b.iter(|| GaussLegendreIntegrator::new(black_box(order), 1))
        });

        let integrator = GaussLegendreIntegrator::new(order, 50).expect("valid rule");
        group.bench_with_input(
            BenchmarkId::new("smooth_50_panels", order),
            &integrator,
            |b, integrator| {
                b.iter(|| integrator.integrate(smooth, black_box(0.0), black_box(1.0)))
            },
        );
    }

    group.finish();
}

fn bench_brent(c: &mut Criterion) {
    let solver = BrentSolver::with_defaults();
    c.bench_function("brent_cos_fixed_point", |b| {
        b.iter(|| solver.find_root(|x| x - x.cos(), black_box(0.0), black_box(1.0)))
    });
}

criterion_group!(
    benches,
    bench_adaptive_integration,
    bench_gauss_legendre,
    bench_brent
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planet_visibility::kepler::{solve_barker, solve_kepler};

/// Random (M, e) pairs, M in degrees.
fn kepler_cases(rng: &mut StdRng, samples: usize, e_min: f64, e_max: f64) -> Vec<(f64, f64)> {
    (0..samples)
        .map(|_| (rng.random_range(0.0..360.0), rng.random_range(e_min..e_max)))
        .collect()
}

/// Typical regime: e ∈ [0.0, 0.7]
fn bench_typical(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);

    c.bench_function("solve_kepler_equation/typical_e<=0.7", |b| {
        b.iter_batched(
            || kepler_cases(&mut rng, 10_000, 0.0, 0.7),
            |cases| {
                for (m, e) in cases {
                    black_box(solve_kepler(black_box(m), black_box(e)).unwrap());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Cometary regime: e ∈ [0.7, 0.99]
fn bench_cometary(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);

    c.bench_function("solve_kepler_equation/cometary_e_0.7..0.99", |b| {
        b.iter_batched(
            || kepler_cases(&mut rng, 10_000, 0.7, 0.99),
            |cases| {
                for (m, e) in cases {
                    let _ = black_box(solve_kepler(black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Parabolic orbits: Barker's equation over a year around perihelion.
fn bench_barker(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);

    c.bench_function("solve_barker_equation/one_year", |b| {
        b.iter_batched(
            || {
                (0..10_000)
                    .map(|_| 0.03649116245 * rng.random_range(-365.0..365.0))
                    .collect::<Vec<f64>>()
            },
            |cases| {
                for w in cases {
                    let _ = black_box(solve_barker(black_box(w)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_cometary, bench_barker
);
criterion_main!(benches);

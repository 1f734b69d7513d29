use criterion::{black_box, criterion_group, criterion_main, Criterion};

use planet_visibility::bodies::{PlanetKind, Target};
use planet_visibility::observers::ObserverPosition;
use planet_visibility::rise_set::solve_rise_set;
use planet_visibility::time::CivilDateTime;
use planet_visibility::time_frame::TimeFrameContext;

fn paris_ctx() -> TimeFrameContext {
    let observer = ObserverPosition::new("Paris", (2, 20, 55.0), (48, 51, 12.0), 35.0, None, None)
        .unwrap();
    let local = CivilDateTime::new(2024, 1, 1, 21, 0, 0.0).unwrap();
    TimeFrameContext::new(observer, local, 1, 0, None)
}

/// One non-iterative computation per body kind.
fn bench_compute(c: &mut Criterion) {
    let ctx = paris_ctx();
    let targets = [
        ("sun", Target::Sun),
        ("moon", Target::Moon),
        ("jupiter", Target::Planet(PlanetKind::Jupiter)),
        ("neptune", Target::Planet(PlanetKind::Neptune)),
    ];

    for (name, target) in targets {
        c.bench_function(&format!("planet_pipeline/compute/{name}"), |b| {
            b.iter(|| black_box(target.compute(black_box(&ctx), false).unwrap()))
        });
    }
}

/// Full iterative rise/set of Mars.
fn bench_iterative(c: &mut Criterion) {
    let ctx = paris_ctx();
    let mars = Target::Planet(PlanetKind::Mars);

    c.bench_function("planet_pipeline/solve_rise_set/mars", |b| {
        b.iter(|| black_box(solve_rise_set(&mars, black_box(&ctx)).unwrap()))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(30);
    targets = bench_compute, bench_iterative
);
criterion_main!(benches);

mod common;

use planet_visibility::bodies::comet::Comet;
use planet_visibility::bodies::{BodyKind, OrbitKind, PlanetKind, Target};
use planet_visibility::constants::LUNAR_DISTANCE_THRESHOLD_KM;
use planet_visibility::orbit_type::OrbitalParameters;

use crate::common::{context, init_logger, paris};

fn comet(eccentricity: f64) -> Comet {
    let parameters = OrbitalParameters::new(
        "C/test",
        1.2,
        eccentricity,
        40.0,
        120.0,
        80.0,
        (2024, 1, 10.25),
        None,
        Some(200),
    )
    .unwrap();
    Comet::new(parameters)
}

#[test]
fn test_compute_is_idempotent() {
    init_logger();
    let ctx = context(paris(), (2024, 1, 1), (21, 0), 1);
    let mut targets = vec![Target::Sun, Target::Moon];
    targets.extend(PlanetKind::ALL.into_iter().map(Target::Planet));
    targets.push("vega".parse().unwrap());
    targets.push(Target::Comet(comet(0.7)));

    for target in &targets {
        let first = target.compute(&ctx, false).unwrap();
        let second = target.compute(&ctx, false).unwrap();
        assert_eq!(first, second, "{}", target.name());
    }
}

#[test]
fn test_comet_orbit_kinds() {
    let periodic = comet(0.99);
    assert_eq!(periodic.kind(), OrbitKind::Periodic);
    assert!(periodic.period().unwrap() > 0.0);
    assert!(periodic.mean_anomaly(periodic.perihelion_jde() + 30.0).is_some());

    let parabolic = comet(1.0);
    assert_eq!(parabolic.kind(), OrbitKind::Parabolic);
    assert!(parabolic.period().is_none());
    assert!(parabolic.mean_anomaly(parabolic.perihelion_jde() + 30.0).is_none());
}

#[test]
fn test_comet_pipeline_for_both_kinds() {
    let ctx = context(paris(), (2024, 2, 1), (20, 0), 1);
    for e in [0.99, 1.0, 1.2] {
        let body = Target::Comet(comet(e)).compute(&ctx, false).unwrap();
        assert_eq!(body.kind, BodyKind::Comet(OrbitKind::from_eccentricity(e)));
        let state = body.solar_system.unwrap();
        // three weeks after a perihelion at 1.2 AU
        assert!(state.heliocentric.radius > 1.2 && state.heliocentric.radius < 1.3, "e = {e}");
        assert!(body.appearance.phase.is_none());
    }
}

#[test]
fn test_distances_and_units() {
    let ctx = context(paris(), (2024, 1, 1), (21, 0), 1);
    let moon = Target::Moon.compute(&ctx, false).unwrap();
    assert!(moon.appearance.distance.unwrap() > LUNAR_DISTANCE_THRESHOLD_KM);

    for kind in PlanetKind::ALL {
        let planet = Target::Planet(kind).compute(&ctx, false).unwrap();
        let distance = planet.appearance.distance.unwrap();
        assert!(distance > 0.2 && distance < 31.0, "{kind}: {distance}");
        let phase = planet.appearance.phase.unwrap();
        assert!((0.0..=1.0).contains(&phase), "{kind}: {phase}");
    }
}

#[test]
fn test_apparent_magnitude_with_extinction() {
    let ctx = context(paris(), (2024, 1, 1), (21, 0), 1);
    let jupiter = Target::Planet(PlanetKind::Jupiter).compute(&ctx, false).unwrap();
    // Jupiter is high in the south-west on that evening
    assert!(jupiter.is_above_horizon());
    let magnitude = jupiter.appearance.magnitude.unwrap();
    let dimmed = jupiter.apparent_magnitude_with_extinction().unwrap();
    assert!(dimmed > magnitude && dimmed - magnitude < 0.5);
}

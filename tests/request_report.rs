mod common;

use camino::Utf8Path;
use planet_visibility::display::VisibilityReport;
use planet_visibility::request::ObservationRequest;
use planet_visibility::rise_set::solve_rise_set;
use planet_visibility::time::CivilDateTime;
use planet_visibility::visibility_errors::VisibilityError;

use crate::common::init_logger;

fn load() -> ObservationRequest {
    ObservationRequest::from_path(Utf8Path::new("tests/data/paris.json")).unwrap()
}

#[test]
fn test_request_file() {
    let request = load();
    assert_eq!(request.site.name, "Paris");
    assert!(request.iterative);
    assert_eq!(request.targets().unwrap().len(), 11);

    let fallback = CivilDateTime::new(2000, 1, 1, 0, 0, 0.0).unwrap();
    let ctx = request.context(fallback).unwrap();
    assert_eq!(ctx.local(), CivilDateTime::new(2024, 1, 1, 21, 0, 0.0).unwrap());
    assert_eq!(ctx.zone(), 1);
    assert_eq!(ctx.observer().altitude(), 35.0);
}

#[test]
fn test_missing_file() {
    let err = ObservationRequest::from_path(Utf8Path::new("tests/data/missing.json"));
    assert!(matches!(err, Err(VisibilityError::IoError(_))));
}

#[test]
fn test_full_report() {
    init_logger();
    let request = load();
    let fallback = CivilDateTime::new(2000, 1, 1, 0, 0, 0.0).unwrap();
    let ctx = request.context(fallback).unwrap();

    let bodies = request
        .targets()
        .unwrap()
        .iter()
        .map(|target| solve_rise_set(target, &ctx).map(|(body, _)| body))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let report = VisibilityReport::new(&bodies).with_title("Paris").to_string();
    for name in ["Sun", "Moon", "Jupiter", "Vega", "Orion Nebula", "2P/Encke", "Albireo"] {
        assert!(report.contains(name), "{name} missing from\n{report}");
    }
    // the Sun has set at 21:00 in January
    assert!(!bodies[0].is_above_horizon());
}

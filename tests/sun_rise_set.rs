mod common;

use approx::assert_abs_diff_eq;
use planet_visibility::bodies::Target;
use planet_visibility::observers::ObserverPosition;
use planet_visibility::rise_set::solve_rise_set;

use crate::common::{assert_event_near, context, event_hours, init_logger, paris};

#[test]
fn test_paris_new_year_sunrise_and_sunset() {
    init_logger();
    let ctx = context(paris(), (2024, 1, 1), (12, 0), 1);
    let (sun, converged) = solve_rise_set(&Target::Sun, &ctx).unwrap();
    assert!(converged);

    assert_event_near(&sun.rise_set.rise, (8, 44), 3.0);
    assert_event_near(&sun.rise_set.set, (17, 3), 3.0);

    // south-east at sunrise, south-west at sunset in winter
    let rise_azimuth = sun.rise_set.rise.azimuth;
    let set_azimuth = sun.rise_set.set.azimuth;
    assert!(rise_azimuth > 120.0 && rise_azimuth < 130.0, "{rise_azimuth}");
    assert_abs_diff_eq!(rise_azimuth + set_azimuth, 360.0, epsilon = 1.0);
}

#[test]
fn test_non_iterative_estimate_is_close() {
    let ctx = context(paris(), (2024, 1, 1), (12, 0), 1);
    let sun = Target::Sun.compute(&ctx, false).unwrap();
    assert_event_near(&sun.rise_set.rise, (8, 44), 5.0);
    assert_event_near(&sun.rise_set.set, (17, 3), 5.0);
}

#[test]
fn test_equinox_day_length_on_the_equator() {
    init_logger();
    let equator =
        ObserverPosition::new("Equator", (0, 0, 0.0), (0, 0, 0.0), 0.0, None, None).unwrap();
    let ctx = context(equator, (2023, 3, 20), (12, 0), 0);
    let (sun, _) = solve_rise_set(&Target::Sun, &ctx).unwrap();

    let day_length = event_hours(&sun.rise_set.set) - event_hours(&sun.rise_set.rise);
    // refraction and the solar disk make the day a few minutes longer than 12 h
    assert!(day_length > 12.0 && day_length < 12.2, "day length = {day_length} h");
}

#[test]
fn test_midnight_sun_at_seventy_north() {
    let tromso =
        ObserverPosition::new("70N", (19, 0, 0.0), (70, 0, 0.0), 0.0, None, None).unwrap();
    let ctx = context(tromso, (2024, 6, 21), (12, 0), 1);

    let sun = Target::Sun.compute(&ctx, false).unwrap();
    assert!(sun.rise_set.rise.is_always_visible());
    assert!(sun.rise_set.set.is_always_visible());
    assert!(sun.rise_set.rise.local_time.is_none());

    let (iterated, converged) = solve_rise_set(&Target::Sun, &ctx).unwrap();
    assert!(converged);
    assert_eq!(iterated.rise_set, sun.rise_set);
}

#[test]
fn test_polar_night_at_seventy_north() {
    let tromso =
        ObserverPosition::new("70N", (19, 0, 0.0), (70, 0, 0.0), 0.0, None, None).unwrap();
    let ctx = context(tromso, (2024, 12, 21), (12, 0), 1);
    let sun = Target::Sun.compute(&ctx, false).unwrap();
    assert!(sun.rise_set.rise.is_always_invisible());
    assert!(sun.rise_set.set.is_always_invisible());
    assert!(!sun.is_above_horizon());
}

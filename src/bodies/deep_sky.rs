//! # Deep-sky objects
//!
//! Stars and deep-sky objects start from a J2000.0 catalog position. The apparent place of
//! date is obtained by applying, in order, the proper motion, the rigorous precession, the
//! nutation and the annual aberration, all in equatorial coordinates. These objects are at
//! infinity: no parallax, no light time, no apparent size.

use log::debug;

use crate::angle::mod24;
use crate::catalog::DeepSkyCatalogEntry;
use crate::constants::{
    Degree, Hour, JulianDay, ABERRATION_CONSTANT_ARCSEC, DAYS_PER_JULIAN_YEAR, J2000_JDE, RADEG,
};
use crate::earth_orientation::{
    earth_orbit_eccentricity, earth_perihelion_longitude, precess_equatorial,
};
use crate::time_frame::TimeFrameContext;

use super::horizon::{extinction_above_horizon, rise_set, topocentric_reduction};
use super::{Appearance, BodyKind, CelestialBody, EquatorialCoordinates, SolarSystemState};

/// Arcseconds of right ascension in one hour.
const ARCSEC_PER_HOUR: f64 = 15.0 * 3600.0;

/// Catalog position moved along its proper motion to `jde`.
///
/// Return
/// ----------
/// * `(α, δ)` in hours and degrees, still referred to the J2000.0 equator and equinox.
pub fn apply_proper_motion(entry: &DeepSkyCatalogEntry, jde: JulianDay) -> (Hour, Degree) {
    let years = (jde - J2000_JDE) / DAYS_PER_JULIAN_YEAR;
    let declination = entry.declination.value();
    let d_alpha = years * entry.proper_motion_ra / (1000.0 * (declination * RADEG).cos());
    let d_delta = years * entry.proper_motion_dec / 1000.0;
    (
        entry.right_ascension.value() + d_alpha / ARCSEC_PER_HOUR,
        declination + d_delta / 3600.0,
    )
}

/// Nutation correction of an equatorial position.
///
/// Arguments
/// ---------
/// * `right_ascension`, `declination`: mean position of date, hours and degrees.
/// * `ctx`: provides Δψ, Δε and ε0.
///
/// Return
/// ----------
/// * `(Δα, Δδ)` in hours and degrees.
pub fn nutation_in_equatorial(
    right_ascension: Hour,
    declination: Degree,
    ctx: &TimeFrameContext,
) -> (Hour, Degree) {
    let frame = ctx.frame();
    let dpsi = frame.nutation_longitude * 3600.0;
    let deps = frame.nutation_obliquity * 3600.0;
    let eps = frame.mean_obliquity * RADEG;
    let alpha = right_ascension * 15.0 * RADEG;
    let delta = declination * RADEG;

    let d_alpha = (eps.cos() + eps.sin() * alpha.sin() * delta.tan()) * dpsi
        - alpha.cos() * delta.tan() * deps;
    let d_delta = eps.sin() * alpha.cos() * dpsi + alpha.sin() * deps;

    (d_alpha / ARCSEC_PER_HOUR, d_delta / 3600.0)
}

/// Annual aberration of an equatorial position, including the e-terms of the Earth's orbit.
///
/// Arguments
/// ---------
/// * `right_ascension`, `declination`: position of date, hours and degrees.
/// * `sun_longitude`: geometric longitude of the Sun, degrees.
/// * `ctx`: provides the true obliquity and the epoch.
///
/// Return
/// ----------
/// * `(Δα, Δδ)` in hours and degrees.
pub fn aberration_in_equatorial(
    right_ascension: Hour,
    declination: Degree,
    sun_longitude: Degree,
    ctx: &TimeFrameContext,
) -> (Hour, Degree) {
    let t = ctx.centuries();
    let kappa = ABERRATION_CONSTANT_ARCSEC;
    let e = earth_orbit_eccentricity(t);
    let varpi = earth_perihelion_longitude(t) * RADEG;
    let eps = ctx.true_obliquity() * RADEG;
    let sun = sun_longitude * RADEG;
    let alpha = right_ascension * 15.0 * RADEG;
    let delta = declination * RADEG;

    let d_alpha = (-kappa * (alpha.cos() * sun.cos() * eps.cos() + alpha.sin() * sun.sin())
        + e * kappa * (alpha.cos() * varpi.cos() * eps.cos() + alpha.sin() * varpi.sin()))
        / delta.cos();

    let tilt = eps.tan() * delta.cos() - alpha.sin() * delta.sin();
    let d_delta = -kappa
        * (sun.cos() * eps.cos() * tilt + alpha.cos() * delta.sin() * sun.sin())
        + e * kappa * (varpi.cos() * eps.cos() * tilt + alpha.cos() * delta.sin() * varpi.sin());

    (d_alpha / ARCSEC_PER_HOUR, d_delta / 3600.0)
}

/// Geocentric apparent place of a catalog object at the instant of `ctx`.
pub fn apparent_place(
    entry: &DeepSkyCatalogEntry,
    ctx: &TimeFrameContext,
    sun: &SolarSystemState,
) -> EquatorialCoordinates {
    let jde = ctx.jde();
    let (ra_pm, dec_pm) = apply_proper_motion(entry, jde);
    let (ra, dec) = precess_equatorial(ra_pm, dec_pm, jde);
    let (nut_ra, nut_dec) = nutation_in_equatorial(ra, dec, ctx);
    let (ab_ra, ab_dec) = aberration_in_equatorial(ra, dec, sun.geometric_longitude, ctx);

    EquatorialCoordinates::new(mod24(ra + nut_ra + ab_ra), dec + nut_dec + ab_dec)
}

/// Non-iterative computation of a catalog object.
///
/// Arguments
/// ---------
/// * `entry`: the catalog position.
/// * `ctx`: observer and instant.
/// * `sun`: the Sun's state at `ctx`, for the aberration.
/// * `alternate`: use the second UT solution near 0h for the rise/set times.
///
/// Return
/// ----------
/// * The object's record, with its catalog magnitude and no distance.
pub fn compute_deep_sky(
    entry: &DeepSkyCatalogEntry,
    ctx: &TimeFrameContext,
    sun: &SolarSystemState,
    alternate: bool,
) -> CelestialBody {
    let geocentric = apparent_place(entry, ctx, sun);
    let reduction = topocentric_reduction(&geocentric, 0.0, ctx);
    let altitude = reduction.topocentric_horizontal.altitude.value();
    let rise_set = rise_set(&geocentric, 0.0, 0.0, ctx, alternate);

    debug!(
        "{}: α = {}, δ = {}, h = {altitude:.4}°",
        entry.name, geocentric.right_ascension, geocentric.declination
    );

    CelestialBody {
        name: entry.name.clone(),
        kind: BodyKind::DeepSky,
        geocentric,
        topocentric: reduction.topocentric,
        geocentric_horizontal: reduction.geocentric_horizontal,
        topocentric_horizontal: reduction.topocentric_horizontal,
        deltas: reduction.deltas,
        rise_set,
        solar_system: None,
        appearance: Appearance {
            phase: None,
            magnitude: Some(entry.magnitude),
            extinction: extinction_above_horizon(altitude),
            apparent_size: 0.0,
            distance: None,
        },
    }
}

#[cfg(test)]
mod deep_sky_test {
    use super::*;
    use crate::bodies::sun::solar_state;
    use crate::observers::ObserverPosition;
    use crate::time::CivilDateTime;
    use approx::assert_abs_diff_eq;

    fn ctx_at(local: CivilDateTime, latitude: (i32, i32, f64)) -> TimeFrameContext {
        let observer =
            ObserverPosition::new("site", (0, 0, 0.0), latitude, 0.0, None, None).unwrap();
        TimeFrameContext::new(observer, local, 0, 0, Some(0.0))
    }

    fn theta_persei() -> DeepSkyCatalogEntry {
        let dec0 = (49.0 + 13.0 / 60.0 + 42.48 / 3600.0) * RADEG;
        // 0.03425 s/yr of right ascension as a great-circle rate
        let pm_ra = 0.03425 * 15_000.0 * dec0.cos();
        DeepSkyCatalogEntry::new(
            "θ Persei",
            "",
            (2, 44, 11.986),
            (49, 13, 42.48),
            4.1,
            (pm_ra, -89.5),
        )
        .unwrap()
    }

    #[test]
    fn test_apparent_place_theta_persei() {
        // 2028 November 13.19, ΔT = 0 so that JDE = 2462088.69
        let ctx = ctx_at(
            CivilDateTime::new(2028, 11, 13, 4, 33, 36.0).unwrap(),
            (45, 0, 0.0),
        );
        assert_abs_diff_eq!(ctx.jde(), 2462088.69, epsilon = 1e-6);

        let place = apparent_place(&theta_persei(), &ctx, &solar_state(&ctx));
        assert_abs_diff_eq!(place.right_ascension.value() * 15.0, 41.5599646, epsilon = 1e-4);
        assert_abs_diff_eq!(place.declination.value(), 49.3520685, epsilon = 1e-4);
    }

    #[test]
    fn test_proper_motion_at_j2000_is_zero() {
        let entry = theta_persei();
        let (ra, dec) = apply_proper_motion(&entry, J2000_JDE);
        assert_eq!(ra, entry.right_ascension.value());
        assert_eq!(dec, entry.declination.value());

        let (_, dec_later) = apply_proper_motion(&entry, J2000_JDE + 100.0 * DAYS_PER_JULIAN_YEAR);
        assert_abs_diff_eq!(dec_later - dec, -89.5 * 100.0 / 3.6e6, epsilon = 1e-12);
    }

    #[test]
    fn test_star_has_no_parallax_and_no_size() {
        let ctx = ctx_at(CivilDateTime::new(2024, 8, 1, 22, 0, 0.0).unwrap(), (48, 51, 12.0));
        let vega = crate::catalog::find("Vega").unwrap();
        let body = compute_deep_sky(&vega, &ctx, &solar_state(&ctx), false);
        assert_eq!(body.deltas.parallax_ra, 0.0);
        assert_eq!(body.deltas.parallax_dec, 0.0);
        assert_eq!(body.appearance.apparent_size, 0.0);
        assert_eq!(body.appearance.magnitude, Some(0.03));
        assert!(body.appearance.distance.is_none());
        // Vega is high in the sky on summer evenings
        assert!(body.is_above_horizon());
        assert!(body.appearance.extinction > 0.2);
    }

    #[test]
    fn test_polaris_is_circumpolar_in_paris() {
        let ctx = ctx_at(CivilDateTime::new(2024, 1, 1, 12, 0, 0.0).unwrap(), (48, 51, 12.0));
        let polaris = crate::catalog::find("Polaris").unwrap();
        let body = compute_deep_sky(&polaris, &ctx, &solar_state(&ctx), false);
        assert!(body.rise_set.rise.is_always_visible());
        assert!(body.rise_set.set.is_always_visible());
    }
}

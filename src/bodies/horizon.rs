//! # Horizon stages
//!
//! Stage functions shared by every body once its geocentric apparent equatorial coordinates are
//! known: conversion to the local horizon, atmospheric refraction, topocentric reduction
//! (refraction and parallax deltas) and the rise/set chain down to local civil time.
//!
//! ## Overview
//!
//! ```text
//! geocentric (α, δ) ── equatorial_to_horizontal ──▶ (h, A) geocentric
//!                    ── refract ──▶ (h + R, A) ── horizontal_to_equatorial ──▶ Δ refraction
//!                    ── parallax_delta ──▶ Δ parallax
//! topocentric (α, δ) = geocentric + Δ refraction + Δ parallax ──▶ (h, A) topocentric
//!
//! rise_set_sidereal ──▶ greenwich_sidereal ──▶ universal_time ──▶ local_time
//! ```
//!
//! [`topocentric_reduction`] runs the first block in one call and [`rise_set`] the second one.

use crate::angle::{mod24, mod360};
use crate::constants::{
    Degree, Hour, ALTERNATE_UT_THRESHOLD_HOURS, HORIZON_REFRACTION_DEG, RADEG, SIDEREAL_DAY_HOURS,
    SIDEREAL_TO_SOLAR, ZENITH_EXTINCTION_MAG,
};
use crate::observers::ObserverPosition;
use crate::time::LocalTime;
use crate::time_frame::TimeFrameContext;

use super::{
    EquatorialCoordinates, EquatorialDeltas, HorizonEvent, HorizontalCoordinates, RiseSet,
};

/// `acos(numerator / denominator)` in degrees, with the ratio clamped to `[-1, 1]`.
///
/// A vanishing denominator (observer or body at a pole) gives 0.
fn acos_deg(numerator: f64, denominator: f64) -> Degree {
    if denominator.abs() < 1e-15 {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0).acos() / RADEG
}

/// Local hour angle `15·mod24(LST − α)` in degrees.
pub fn hour_angle(local_sidereal_time: Hour, right_ascension: Hour) -> Degree {
    15.0 * mod24(local_sidereal_time - right_ascension)
}

/// Equatorial → horizontal coordinates.
///
/// Arguments
/// ---------
/// * `equatorial`: right ascension and declination.
/// * `ctx`: observer and instant; the true local sidereal time and the site latitude are used.
///
/// Return
/// ----------
/// * Altitude and azimuth, the azimuth counted from North through East.
pub fn equatorial_to_horizontal(
    equatorial: &EquatorialCoordinates,
    ctx: &TimeFrameContext,
) -> HorizontalCoordinates {
    let phi = ctx.observer().latitude().radians();
    let delta = equatorial.declination.radians();
    let h = hour_angle(ctx.local_sidereal_time(), equatorial.right_ascension.value()) * RADEG;

    let altitude = (delta.sin() * phi.sin() + delta.cos() * phi.cos() * h.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let mut azimuth = acos_deg(
        delta.sin() - phi.sin() * altitude.sin(),
        phi.cos() * altitude.cos(),
    );
    if h.sin() > 0.0 {
        azimuth = 360.0 - azimuth;
    }

    HorizontalCoordinates::new(altitude / RADEG, azimuth)
}

/// Horizontal → equatorial coordinates, inverse of [`equatorial_to_horizontal`].
pub fn horizontal_to_equatorial(
    horizontal: &HorizontalCoordinates,
    ctx: &TimeFrameContext,
) -> EquatorialCoordinates {
    let phi = ctx.observer().latitude().radians();
    let alt = horizontal.altitude.radians();
    let az = horizontal.azimuth.radians();

    let delta = (alt.sin() * phi.sin() + alt.cos() * phi.cos() * az.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let mut h = acos_deg(alt.sin() - phi.sin() * delta.sin(), phi.cos() * delta.cos());
    if az.sin() > 0.0 {
        h = 360.0 - h;
    }

    EquatorialCoordinates::new(ctx.local_sidereal_time() - h / 15.0, delta / RADEG)
}

/// Atmospheric refraction in degrees for a geocentric altitude.
///
/// Arguments
/// ---------
/// * `altitude`: geocentric altitude in degrees.
/// * `pressure`: pressure in mbar.
/// * `temperature`: temperature in °C.
///
/// Return
/// ----------
/// * `0.00452·P·tan z / (273 + T)` at or above 15°, otherwise
///   `P(0.1594 + 0.0196h + 0.00002h²) / ((273 + T)(1 + 0.505h + 0.0845h²))`.
pub fn refraction(altitude: Degree, pressure: f64, temperature: f64) -> Degree {
    if altitude >= 15.0 {
        let zenith = (90.0 - altitude) * RADEG;
        0.00452 * pressure * zenith.tan() / (273.0 + temperature)
    } else {
        let h = altitude;
        pressure * (0.1594 + 0.0196 * h + 0.00002 * h * h)
            / ((273.0 + temperature) * (1.0 + 0.505 * h + 0.0845 * h * h))
    }
}

/// Raise a geocentric horizontal position by the refraction of the observer's atmosphere.
pub fn refract(
    horizontal: &HorizontalCoordinates,
    observer: &ObserverPosition,
) -> HorizontalCoordinates {
    let altitude = horizontal.altitude.value();
    HorizontalCoordinates::new(
        altitude + refraction(altitude, observer.pressure(), observer.temperature()),
        horizontal.azimuth.value(),
    )
}

/// Atmospheric extinction `0.2/cos z` in magnitudes above the horizon, 0 below.
pub fn extinction_above_horizon(altitude: Degree) -> f64 {
    if altitude > 0.0 {
        ZENITH_EXTINCTION_MAG / (altitude * RADEG).sin()
    } else {
        0.0
    }
}

/// Equatorial shift between two positions, right ascension wrapped to `[-12, 12]` hours.
pub fn equatorial_shift(
    from: &EquatorialCoordinates,
    to: &EquatorialCoordinates,
) -> (Hour, Degree) {
    let mut d_ra = to.right_ascension.value() - from.right_ascension.value();
    if d_ra > 12.0 {
        d_ra -= 24.0;
    } else if d_ra < -12.0 {
        d_ra += 24.0;
    }
    (d_ra, to.declination.value() - from.declination.value())
}

/// Diurnal parallax correction of a geocentric position.
///
/// Arguments
/// ---------
/// * `geocentric`: geocentric apparent position.
/// * `sin_parallax`: sine of the horizontal equatorial parallax (`0` for stars).
/// * `ctx`: observer and instant.
///
/// Return
/// ----------
/// * `(Δα, Δδ)` in hours and degrees to add to the geocentric position.
pub fn parallax_delta(
    geocentric: &EquatorialCoordinates,
    sin_parallax: f64,
    ctx: &TimeFrameContext,
) -> (Hour, Degree) {
    let observer = ctx.observer();
    let delta = geocentric.declination.radians();
    let h = hour_angle(ctx.local_sidereal_time(), geocentric.right_ascension.value()) * RADEG;

    let rho_cos = observer.rho_cos_phi() * sin_parallax;
    let rho_sin = observer.rho_sin_phi() * sin_parallax;

    let denominator = delta.cos() - rho_cos * h.cos();
    let d_alpha = (-rho_cos * h.sin()).atan2(denominator);
    let topo_delta = ((delta.sin() - rho_sin) * d_alpha.cos() / denominator).atan();

    (d_alpha / RADEG / 15.0, (topo_delta - delta) / RADEG)
}

/// Result of [`topocentric_reduction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopocentricReduction {
    pub geocentric_horizontal: HorizontalCoordinates,
    pub topocentric: EquatorialCoordinates,
    pub topocentric_horizontal: HorizontalCoordinates,
    pub deltas: EquatorialDeltas,
}

/// Reduce a geocentric apparent position to the observer's site.
///
/// Geocentric horizon, refraction, back to equatorial, parallax, then the topocentric horizon.
pub fn topocentric_reduction(
    geocentric: &EquatorialCoordinates,
    sin_parallax: f64,
    ctx: &TimeFrameContext,
) -> TopocentricReduction {
    let geocentric_horizontal = equatorial_to_horizontal(geocentric, ctx);
    let refracted = refract(&geocentric_horizontal, ctx.observer());
    let (refraction_ra, refraction_dec) =
        equatorial_shift(geocentric, &horizontal_to_equatorial(&refracted, ctx));
    let (parallax_ra, parallax_dec) = parallax_delta(geocentric, sin_parallax, ctx);

    let deltas = EquatorialDeltas {
        refraction_ra,
        refraction_dec,
        parallax_ra,
        parallax_dec,
    };
    let topocentric = EquatorialCoordinates::new(
        geocentric.right_ascension.value() + refraction_ra + parallax_ra,
        geocentric.declination.value() + refraction_dec + parallax_dec,
    );
    let topocentric_horizontal = equatorial_to_horizontal(&topocentric, ctx);

    TopocentricReduction {
        geocentric_horizontal,
        topocentric,
        topocentric_horizontal,
        deltas,
    }
}

/// Local sidereal times and azimuths of rise and set.
///
/// Arguments
/// ---------
/// * `geocentric`: geocentric apparent position.
/// * `parallax`: horizontal parallax in degrees (`0` for stars).
/// * `apparent_size`: apparent diameter in degrees.
/// * `latitude`: observer latitude in degrees.
///
/// Return
/// ----------
/// * A [`RiseSet`] whose local sidereal times and azimuths are filled, the other fields being
///   zero, or the sentinel pair when the body never crosses the horizon.
pub fn rise_set_sidereal(
    geocentric: &EquatorialCoordinates,
    parallax: Degree,
    apparent_size: Degree,
    latitude: Degree,
) -> RiseSet {
    let nu = (parallax - HORIZON_REFRACTION_DEG - apparent_size / 2.0) * RADEG;
    let phi = latitude * RADEG;
    let delta = geocentric.declination.radians();

    let cos_h = (nu.sin() - phi.sin() * delta.sin()) / (phi.cos() * delta.cos());
    if cos_h < -1.0 {
        return RiseSet::always_visible();
    }
    if cos_h > 1.0 || cos_h.is_nan() {
        return RiseSet::always_invisible();
    }

    let h = cos_h.acos() / RADEG / 15.0;
    let alpha = geocentric.right_ascension.value();
    let rise_azimuth = acos_deg(delta.sin() - nu.sin() * phi.sin(), nu.cos() * phi.cos());

    RiseSet {
        rise: HorizonEvent {
            local_sidereal_time: mod24(alpha - h),
            azimuth: rise_azimuth,
            ..HorizonEvent::default()
        },
        set: HorizonEvent {
            local_sidereal_time: mod24(alpha + h),
            azimuth: mod360(360.0 - rise_azimuth),
            ..HorizonEvent::default()
        },
    }
}

/// Greenwich true sidereal time of an event, `mod24(LST − λ/15)`.
pub fn greenwich_sidereal(local_sidereal_time: Hour, longitude: Degree) -> Hour {
    mod24(local_sidereal_time - longitude / 15.0)
}

/// Universal time of a Greenwich true sidereal time on the date of `ctx`.
///
/// With `alternate` set, a result within 3m56s after 0h is moved to the second solution of the
/// day, 23h56m04s later.
pub fn universal_time(
    greenwich_sidereal_time: Hour,
    ctx: &TimeFrameContext,
    alternate: bool,
) -> Hour {
    let frame = ctx.frame();
    let mean = mod24(greenwich_sidereal_time - ctx.equation_of_equinoxes());
    let ut = mod24(mean - frame.mean_sidereal_time_0h) * SIDEREAL_TO_SOLAR;
    if alternate && ut < ALTERNATE_UT_THRESHOLD_HOURS {
        mod24(ut + SIDEREAL_DAY_HOURS)
    } else {
        ut
    }
}

/// Local civil clock time of a universal time.
pub fn local_time(universal_time: Hour, ctx: &TimeFrameContext) -> LocalTime {
    LocalTime::from_hours(universal_time + f64::from(ctx.zone() + ctx.dst()))
}

fn complete_event(event: HorizonEvent, ctx: &TimeFrameContext, alternate: bool) -> HorizonEvent {
    if event.is_sentinel() {
        return event;
    }
    let gst = greenwich_sidereal(event.local_sidereal_time, ctx.observer().longitude().value());
    let ut = universal_time(gst, ctx, alternate);
    HorizonEvent {
        greenwich_sidereal_time: gst,
        universal_time: ut,
        local_time: Some(local_time(ut, ctx)),
        ..event
    }
}

/// Full rise/set chain for one instant.
///
/// Arguments
/// ---------
/// * `geocentric`: geocentric apparent position.
/// * `parallax`: horizontal parallax in degrees.
/// * `apparent_size`: apparent diameter in degrees.
/// * `ctx`: observer and instant.
/// * `alternate`: use the second UT solution near 0h, see [`universal_time`].
///
/// Return
/// ----------
/// * Rise and set events with sidereal, universal and local times. Sentinels propagate through
///   every numeric field and leave the local times empty.
///
/// See also
/// ------------
/// * [`crate::rise_set::solve_rise_set`] – Iterative refinement of these estimates.
pub fn rise_set(
    geocentric: &EquatorialCoordinates,
    parallax: Degree,
    apparent_size: Degree,
    ctx: &TimeFrameContext,
    alternate: bool,
) -> RiseSet {
    let latitude = ctx.observer().latitude().value();
    let sidereal = rise_set_sidereal(geocentric, parallax, apparent_size, latitude);
    RiseSet {
        rise: complete_event(sidereal.rise, ctx, alternate),
        set: complete_event(sidereal.set, ctx, alternate),
    }
}

#[cfg(test)]
mod horizon_test {
    use super::*;
    use crate::time::CivilDateTime;
    use approx::assert_abs_diff_eq;

    fn ctx_at(lat: (i32, i32, f64), lon: (i32, i32, f64)) -> TimeFrameContext {
        let observer = ObserverPosition::new("site", lon, lat, 0.0, None, None).unwrap();
        let local = CivilDateTime::new(2024, 3, 20, 22, 0, 0.0).unwrap();
        TimeFrameContext::new(observer, local, 0, 0, None)
    }

    #[test]
    fn test_refraction_at_horizon() {
        // about 34' with the standard atmosphere
        let r = refraction(0.0, 1013.0, 10.0);
        assert_abs_diff_eq!(r, 0.5706, epsilon = 1e-3);
        // continuity at the branch point
        let low = refraction(14.999999, 1013.0, 10.0);
        let high = refraction(15.0, 1013.0, 10.0);
        assert_abs_diff_eq!(low, high, epsilon = 2e-3);
        assert!(refraction(89.9, 1013.0, 10.0) < 1e-3);
    }

    #[test]
    fn test_extinction() {
        assert_abs_diff_eq!(extinction_above_horizon(90.0), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(extinction_above_horizon(30.0), 0.4, epsilon = 1e-12);
        assert_eq!(extinction_above_horizon(-5.0), 0.0);
    }

    #[test]
    fn test_horizontal_round_trip() {
        let ctx = ctx_at((48, 51, 12.0), (2, 20, 55.0));
        let eq = EquatorialCoordinates::new(5.5, 22.0);
        let hz = equatorial_to_horizontal(&eq, &ctx);
        let back = horizontal_to_equatorial(&hz, &ctx);
        let (d_ra, d_dec) = equatorial_shift(&eq, &back);
        assert_abs_diff_eq!(d_ra, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d_dec, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_meridian_transit_altitude() {
        let ctx = ctx_at((48, 0, 0.0), (0, 0, 0.0));
        let eq = EquatorialCoordinates::new(ctx.local_sidereal_time(), 10.0);
        let hz = equatorial_to_horizontal(&eq, &ctx);
        assert_abs_diff_eq!(hz.altitude.value(), 90.0 - 48.0 + 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hz.azimuth.value(), 180.0, epsilon = 1e-6);
    }

    #[test]
    fn test_east_west_azimuths() {
        let ctx = ctx_at((30, 0, 0.0), (0, 0, 0.0));
        let lst = ctx.local_sidereal_time();
        let east = equatorial_to_horizontal(&EquatorialCoordinates::new(lst + 3.0, 0.0), &ctx);
        let west = equatorial_to_horizontal(&EquatorialCoordinates::new(lst - 3.0, 0.0), &ctx);
        assert!(east.azimuth.value() > 0.0 && east.azimuth.value() < 180.0);
        assert!(west.azimuth.value() > 180.0 && west.azimuth.value() < 360.0);
    }

    #[test]
    fn test_star_has_no_parallax() {
        let ctx = ctx_at((48, 51, 12.0), (2, 20, 55.0));
        let (d_ra, d_dec) = parallax_delta(&EquatorialCoordinates::new(3.0, 40.0), 0.0, &ctx);
        assert_abs_diff_eq!(d_ra, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d_dec, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lunar_parallax_lowers_declination() {
        let ctx = ctx_at((48, 51, 12.0), (2, 20, 55.0));
        let eq = EquatorialCoordinates::new(ctx.local_sidereal_time(), 10.0);
        let (_, d_dec) = parallax_delta(&eq, 6378.14 / 384_400.0, &ctx);
        // on the meridian the shift is close to sin(π)·sin(z) ≈ 0.95° · sin(38.9°)
        assert!(d_dec < -0.5 && d_dec > -0.7);
    }

    #[test]
    fn test_rise_set_sentinels() {
        let eq = EquatorialCoordinates::new(6.0, 23.4);
        assert!(rise_set_sidereal(&eq, 0.0, 0.0, 70.0).rise.is_always_visible());
        let south = EquatorialCoordinates::new(6.0, -23.4);
        assert!(rise_set_sidereal(&south, 0.0, 0.0, 70.0).set.is_always_invisible());
    }

    #[test]
    fn test_equator_star_rise_set_symmetry() {
        let eq = EquatorialCoordinates::new(6.0, 0.0);
        let rs = rise_set_sidereal(&eq, 0.0, 0.0, 0.0);
        let half_arc = mod24(rs.set.local_sidereal_time - rs.rise.local_sidereal_time) / 2.0;
        // slightly more than 6 h because of refraction
        assert!(half_arc > 6.0 && half_arc < 6.05);
        assert_abs_diff_eq!(rs.rise.azimuth + rs.set.azimuth, 360.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rs.rise.azimuth, 90.0, epsilon = 1.0);
    }

    #[test]
    fn test_sidereal_to_local_time() {
        let ctx = ctx_at((48, 0, 0.0), (0, 0, 0.0));
        // the sidereal time of the context maps back to its own clock reading
        let gst = ctx.frame().greenwich_sidereal_time;
        let ut = universal_time(gst, &ctx, false);
        assert_abs_diff_eq!(ut, 22.0, epsilon = 1e-4);
        assert_eq!(local_time(ut, &ctx), LocalTime { hour: 22, minute: 0 });
    }

    #[test]
    fn test_alternate_solution_near_midnight() {
        let ctx = ctx_at((48, 0, 0.0), (0, 0, 0.0));
        let frame = ctx.frame();
        let sidereal_at = |ut: Hour| {
            let mean = frame.mean_sidereal_time_0h + ut / SIDEREAL_TO_SOLAR;
            mod24(mean + ctx.equation_of_equinoxes())
        };

        // 36 s after 0h UT: the same sidereal time comes back 23h56m04s later
        let early = sidereal_at(0.01);
        assert_abs_diff_eq!(universal_time(early, &ctx, false), 0.01, epsilon = 1e-9);
        assert_abs_diff_eq!(
            universal_time(early, &ctx, true),
            0.01 + SIDEREAL_DAY_HOURS,
            epsilon = 1e-9
        );

        // past 3m56s there is a single solution
        let later = sidereal_at(0.1);
        assert_abs_diff_eq!(universal_time(later, &ctx, true), 0.1, epsilon = 1e-9);
    }
}

//! # Moon
//!
//! Geocentric position from the truncated ELP2000-82B theory, apparent longitude from nutation
//! alone (the lunar aberration is below the precision of the series). The phase comes from the
//! elongation and the Earth–Sun and Earth–Moon distances; the apparent diameter includes the
//! augmentation of a body seen from the Earth's surface rather than its centre.

use log::debug;

use crate::angle::mod360;
use crate::constants::{
    Degree, Kilometer, AU_KM, EARTH_EQUATORIAL_RADIUS_KM, MOON_RADIUS_KM, RADEG,
};
use crate::theories::elp2000::lunar_position;
use crate::theories::vsop87::HeliocentricPosition;
use crate::time_frame::TimeFrameContext;

use super::horizon::{extinction_above_horizon, rise_set, topocentric_reduction};
use super::solar_system::ecliptic_to_equatorial;
use super::{Appearance, BodyKind, CelestialBody, SolarSystemState};

/// Phase angle of the Moon in degrees.
///
/// Arguments
/// ---------
/// * `longitude`, `latitude`: geocentric geometric ecliptic position of the Moon, degrees.
/// * `distance`: Earth–Moon distance, km.
/// * `sun`: the Sun's state (geometric longitude and distance R in AU).
///
/// Return
/// ----------
/// * `i = atan2(R sin ψ, Δ − R cos ψ)` with the elongation `ψ = acos(cos β cos(λ − ⊙))` and
///   both distances in km.
pub fn lunar_phase_angle(
    longitude: Degree,
    latitude: Degree,
    distance: Kilometer,
    sun: &SolarSystemState,
) -> Degree {
    let elongation = ((latitude * RADEG).cos()
        * ((longitude - sun.geometric_longitude) * RADEG).cos())
    .clamp(-1.0, 1.0)
    .acos();
    let sun_km = AU_KM * sun.earth_distance;
    let y = sun_km * elongation.sin();
    let x = distance - sun_km * elongation.cos();
    y.atan2(x) / RADEG
}

/// Apparent diameter of the Moon in degrees.
///
/// Arguments
/// ---------
/// * `distance`: Earth–Moon distance, km.
/// * `topocentric_altitude`: altitude of the Moon above the observer's horizon, degrees.
pub fn lunar_apparent_diameter(distance: Kilometer, topocentric_altitude: Degree) -> Degree {
    let geocentric = 2.0 * (MOON_RADIUS_KM / distance).asin() / RADEG;
    let augmentation = (topocentric_altitude * RADEG).sin() * EARTH_EQUATORIAL_RADIUS_KM / distance;
    geocentric * (1.0 + augmentation)
}

/// Non-iterative computation of the Moon.
///
/// Arguments
/// ---------
/// * `ctx`: observer and instant.
/// * `sun`: the Sun's state at `ctx`.
/// * `alternate`: use the second UT solution near 0h for the rise/set times.
///
/// Return
/// ----------
/// * The Moon's record, distance in km. The magnitude is not modelled.
pub fn compute_moon(
    ctx: &TimeFrameContext,
    sun: &SolarSystemState,
    alternate: bool,
) -> CelestialBody {
    let position = lunar_position(ctx.jde());
    let distance = position.distance;
    let apparent_longitude = mod360(position.longitude + ctx.frame().nutation_longitude);

    let geocentric =
        ecliptic_to_equatorial(apparent_longitude, position.latitude, ctx.true_obliquity());
    let sin_parallax = EARTH_EQUATORIAL_RADIUS_KM / distance;
    let reduction = topocentric_reduction(&geocentric, sin_parallax, ctx);
    let altitude = reduction.topocentric_horizontal.altitude.value();

    let i = lunar_phase_angle(position.longitude, position.latitude, distance, sun);
    let apparent_size = lunar_apparent_diameter(distance, altitude);
    let rise_set = rise_set(
        &geocentric,
        sin_parallax.asin() / RADEG,
        apparent_size,
        ctx,
        alternate,
    );

    debug!(
        "Moon: λ = {apparent_longitude:.6}°, β = {:.6}°, Δ = {distance:.1} km, i = {i:.3}°",
        position.latitude
    );

    CelestialBody {
        name: "Moon".to_string(),
        kind: BodyKind::Moon,
        geocentric,
        topocentric: reduction.topocentric,
        geocentric_horizontal: reduction.geocentric_horizontal,
        topocentric_horizontal: reduction.topocentric_horizontal,
        deltas: reduction.deltas,
        rise_set,
        solar_system: Some(SolarSystemState {
            heliocentric: HeliocentricPosition {
                longitude: position.longitude,
                latitude: position.latitude,
                radius: distance / AU_KM,
            },
            geometric_longitude: position.longitude,
            geometric_latitude: position.latitude,
            apparent_longitude,
            apparent_latitude: position.latitude,
            earth_distance: distance,
        }),
        appearance: Appearance {
            phase: Some((1.0 + (i * RADEG).cos()) / 2.0),
            magnitude: None,
            extinction: extinction_above_horizon(altitude),
            apparent_size,
            distance: Some(distance),
        },
    }
}

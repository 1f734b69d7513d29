//! # Solar-system reduction
//!
//! Heliocentric → geocentric apparent reduction shared by planets and comets.
//!
//! ## Overview
//!
//! 1. [`converge_earth_distance`]: light-time fixed point on the Earth–body distance.
//! 2. [`geocentric_ecliptic`]: geocentric geometric λ, β from the heliocentric position of the
//!    body and of the Earth.
//! 3. [`aberration`] then nutation in longitude: apparent λ, β.
//! 4. [`ecliptic_to_equatorial`] with the true obliquity.
//!
//! [`reduce_heliocentric`] chains the four steps.

use log::trace;

use crate::angle::{mod24, mod360};
use crate::constants::{
    AstronomicalUnit, Degree, ABERRATION_CONSTANT_ARCSEC, ARCSEC_TO_DEG, RADEG,
    SOLAR_PARALLAX_ARCSEC,
};
use crate::earth_orientation::{earth_orbit_eccentricity, earth_perihelion_longitude};
use crate::theories::vsop87::HeliocentricPosition;
use crate::time_frame::TimeFrameContext;
use crate::visibility_errors::VisibilityError;

use super::{EquatorialCoordinates, SolarSystemState};

/// Convergence threshold of the light-time iteration, AU.
pub const EARTH_DISTANCE_TOLERANCE: f64 = 1e-10;

/// Maximum number of light-time iterations.
pub const EARTH_DISTANCE_MAX_ITERATIONS: usize = 50;

/// Earth–body distance by the law of cosines, `sqrt(R² + r² − 2Rr cos b cos(l − L))`.
pub fn earth_distance(
    body: &HeliocentricPosition,
    earth: &HeliocentricPosition,
) -> AstronomicalUnit {
    let b = body.latitude * RADEG;
    let dl = (body.longitude - earth.longitude) * RADEG;
    (earth.radius * earth.radius + body.radius * body.radius
        - 2.0 * earth.radius * body.radius * b.cos() * dl.cos())
    .sqrt()
}

/// Iterate the heliocentric position of a body on the light-time corrected epoch.
///
/// Arguments
/// ---------
/// * `earth`: heliocentric position of the Earth at the observation epoch.
/// * `position_at`: heliocentric position of the body for a given Earth distance (the closure
///   applies the light-time shift `0.0057755183·Δ` days).
///
/// Return
/// ----------
/// * The heliocentric position at the converged epoch and the Earth–body distance.
///
/// Errors
/// ----------
/// * [`VisibilityError::EarthDistanceNoConvergence`] after 50 iterations.
/// * Any error raised by `position_at`.
pub fn converge_earth_distance<F>(
    earth: &HeliocentricPosition,
    mut position_at: F,
) -> Result<(HeliocentricPosition, AstronomicalUnit), VisibilityError>
where
    F: FnMut(AstronomicalUnit) -> Result<HeliocentricPosition, VisibilityError>,
{
    let mut distance = 0.0;
    for iteration in 0..EARTH_DISTANCE_MAX_ITERATIONS {
        let position = position_at(distance)?;
        let next = earth_distance(&position, earth);
        trace!("light-time iteration {iteration}: Δ = {next:.12} AU");
        if (next - distance).abs() <= EARTH_DISTANCE_TOLERANCE {
            return Ok((position, next));
        }
        distance = next;
    }

    Err(VisibilityError::EarthDistanceNoConvergence(format!(
        "last distance {distance} AU after {EARTH_DISTANCE_MAX_ITERATIONS} iterations"
    )))
}

/// Geocentric geometric ecliptic longitude and latitude.
///
/// Arguments
/// ---------
/// * `body`: heliocentric position of the body.
/// * `earth`: heliocentric position of the Earth.
///
/// Return
/// ----------
/// * `(λ, β)` in degrees, with
///   `λ = 180° + L + atan2(r cos b sin(L − l), R − r cos b cos(L − l))` and
///   `β = atan(r cos b tan b sin(λ − l) / (R sin(l − L)))`. Near conjunction or opposition,
///   where that quotient degenerates, β comes from the rectangular components instead.
pub fn geocentric_ecliptic(
    body: &HeliocentricPosition,
    earth: &HeliocentricPosition,
) -> (Degree, Degree) {
    let l = body.longitude * RADEG;
    let b = body.latitude * RADEG;
    let big_l = earth.longitude * RADEG;
    let (r, big_r) = (body.radius, earth.radius);

    let y = r * b.cos() * (big_l - l).sin();
    let x = big_r - r * b.cos() * (big_l - l).cos();
    let lambda = mod360(180.0 + earth.longitude + y.atan2(x) / RADEG);

    let denominator = big_r * (l - big_l).sin();
    let beta = if denominator.abs() > 1e-9 {
        (r * b.cos() * b.tan() * (lambda * RADEG - l).sin() / denominator).atan()
    } else {
        (r * b.sin()).atan2(x.hypot(y))
    };

    (lambda, beta / RADEG)
}

/// Annual aberration in ecliptic coordinates.
///
/// Arguments
/// ---------
/// * `longitude`, `latitude`: geocentric ecliptic position, degrees.
/// * `sun_longitude`: geometric longitude of the Sun, degrees.
/// * `t`: Julian centuries from J2000.0.
///
/// Return
/// ----------
/// * `(Δλ, Δβ)` in degrees, with κ = 20.49552″ and the eccentricity and perihelion of the
///   Earth's orbit at `t`.
pub fn aberration(
    longitude: Degree,
    latitude: Degree,
    sun_longitude: Degree,
    t: f64,
) -> (Degree, Degree) {
    let e = earth_orbit_eccentricity(t);
    let varpi = earth_perihelion_longitude(t) * RADEG;
    let lambda = longitude * RADEG;
    let beta = latitude * RADEG;
    let sun = sun_longitude * RADEG;
    let kappa = ABERRATION_CONSTANT_ARCSEC;

    let d_lambda =
        (-kappa * (sun - lambda).cos() + kappa * e * (varpi - lambda).cos()) / beta.cos();
    let d_beta = -kappa * beta.sin() * ((sun - lambda).sin() - e * (varpi - lambda).sin());

    (d_lambda * ARCSEC_TO_DEG, d_beta * ARCSEC_TO_DEG)
}

/// Ecliptic → equatorial coordinates for an obliquity ε (degrees).
pub fn ecliptic_to_equatorial(
    longitude: Degree,
    latitude: Degree,
    obliquity: Degree,
) -> EquatorialCoordinates {
    let lambda = longitude * RADEG;
    let beta = latitude * RADEG;
    let eps = obliquity * RADEG;

    let declination = (beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin())
        .clamp(-1.0, 1.0)
        .asin();
    let right_ascension =
        (lambda.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lambda.cos()) / RADEG;

    EquatorialCoordinates::new(mod24(mod360(right_ascension) / 15.0), declination / RADEG)
}

/// Sine of the horizontal parallax of a body at `distance` AU.
pub fn sin_parallax(distance: AstronomicalUnit) -> f64 {
    (SOLAR_PARALLAX_ARCSEC * ARCSEC_TO_DEG * RADEG).sin() / distance
}

/// Horizontal parallax in degrees of a body at `distance` AU.
pub fn horizontal_parallax(distance: AstronomicalUnit) -> Degree {
    sin_parallax(distance).clamp(-1.0, 1.0).asin() / RADEG
}

/// Geocentric apparent position of a heliocentric body.
///
/// Arguments
/// ---------
/// * `ctx`: observer and instant.
/// * `sun`: state of the Sun at the same instant (its heliocentric position is the Earth's).
/// * `position_at`: heliocentric position of the body for a given light-time distance.
///
/// Return
/// ----------
/// * The body's [`SolarSystemState`] and its geocentric apparent equatorial coordinates.
///
/// Errors
/// ----------
/// * See [`converge_earth_distance`].
pub fn reduce_heliocentric<F>(
    ctx: &TimeFrameContext,
    sun: &SolarSystemState,
    position_at: F,
) -> Result<(SolarSystemState, EquatorialCoordinates), VisibilityError>
where
    F: FnMut(AstronomicalUnit) -> Result<HeliocentricPosition, VisibilityError>,
{
    let earth = &sun.heliocentric;
    let (heliocentric, distance) = converge_earth_distance(earth, position_at)?;
    let (geometric_longitude, geometric_latitude) = geocentric_ecliptic(&heliocentric, earth);

    let (d_lambda, d_beta) = aberration(
        geometric_longitude,
        geometric_latitude,
        sun.geometric_longitude,
        ctx.centuries(),
    );
    let apparent_longitude =
        mod360(geometric_longitude + ctx.frame().nutation_longitude + d_lambda);
    let apparent_latitude = geometric_latitude + d_beta;

    let geocentric =
        ecliptic_to_equatorial(apparent_longitude, apparent_latitude, ctx.true_obliquity());

    Ok((
        SolarSystemState {
            heliocentric,
            geometric_longitude,
            geometric_latitude,
            apparent_longitude,
            apparent_latitude,
            earth_distance: distance,
        },
        geocentric,
    ))
}

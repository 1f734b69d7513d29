//! # VSOP87D heliocentric positions
//!
//! Heliocentric ecliptic longitude, latitude and radius vector of the Earth and of the seven
//! planets, referred to the mean ecliptic and equinox of date. The periodic series themselves
//! are evaluated by the [`vsop87`] crate; this module applies the light-time shift of the epoch
//! and the reduction to the FK5 frame.
//!
//! ## Overview
//!
//! - [`SeriesBody`]: the eight bodies covered by VSOP87D.
//! - [`raw_series`]: L, B, R straight from the theory.
//! - [`fk5_correction`]: VSOP87 dynamical ecliptic → FK5.
//! - [`heliocentric_position`]: light-time shifted, FK5-corrected position used by the pipeline.

use vsop87::vsop87d;

use crate::angle::mod360;
use crate::constants::{
    AstronomicalUnit, Degree, JulianDay, ARCSEC_TO_DEG, DAYS_PER_JULIAN_MILLENNIUM, J2000_JDE,
    LIGHT_TIME_DAYS_PER_AU, RADEG,
};

/// Bodies whose heliocentric position is given by VSOP87D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesBody {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Heliocentric ecliptic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricPosition {
    /// Longitude L in degrees, `[0, 360)`
    pub longitude: Degree,
    /// Latitude B in degrees
    pub latitude: Degree,
    /// Radius vector R in AU
    pub radius: AstronomicalUnit,
}

/// Evaluate VSOP87D at a given Julian Ephemeris Day, without any correction.
pub fn raw_series(body: SeriesBody, jde: JulianDay) -> HeliocentricPosition {
    let coords = match body {
        SeriesBody::Mercury => vsop87d::mercury(jde),
        SeriesBody::Venus => vsop87d::venus(jde),
        SeriesBody::Earth => vsop87d::earth(jde),
        SeriesBody::Mars => vsop87d::mars(jde),
        SeriesBody::Jupiter => vsop87d::jupiter(jde),
        SeriesBody::Saturn => vsop87d::saturn(jde),
        SeriesBody::Uranus => vsop87d::uranus(jde),
        SeriesBody::Neptune => vsop87d::neptune(jde),
    };

    HeliocentricPosition {
        longitude: mod360(coords.longitude().to_degrees()),
        latitude: coords.latitude().to_degrees(),
        radius: coords.distance(),
    }
}

/// Convert a VSOP87 position to the FK5 system.
///
/// Arguments
/// ---------
/// * `position`: position from [`raw_series`].
/// * `t`: Julian centuries since J2000.0 of the evaluation epoch.
///
/// Return
/// ----------
/// * The position with `ΔL = −0.09033″ + 0.03916″(cos L′ + sin L′) tan B` and
///   `ΔB = 0.03916″(cos L′ − sin L′)` applied, where `L′ = L − 1.397T − 0.00031T²`.
pub fn fk5_correction(position: HeliocentricPosition, t: f64) -> HeliocentricPosition {
    let l_prime = (position.longitude - 1.397 * t - 0.00031 * t * t) * RADEG;
    let tan_b = (position.latitude * RADEG).tan();

    let delta_l = -0.09033 + 0.03916 * (l_prime.cos() + l_prime.sin()) * tan_b;
    let delta_b = 0.03916 * (l_prime.cos() - l_prime.sin());

    HeliocentricPosition {
        longitude: mod360(position.longitude + delta_l * ARCSEC_TO_DEG),
        latitude: position.latitude + delta_b * ARCSEC_TO_DEG,
        radius: position.radius,
    }
}

/// Heliocentric position of `body` as seen from Earth at `jde`, light travel time included.
///
/// Arguments
/// ---------
/// * `body`: series to evaluate.
/// * `jde`: Julian Ephemeris Day of the observation.
/// * `light_time_distance`: current estimate of the Earth–body distance in AU (`0` for the Earth
///   itself).
///
/// Return
/// ----------
/// * The FK5 position at `jde − 0.0057755183·Δ`.
pub fn heliocentric_position(
    body: SeriesBody,
    jde: JulianDay,
    light_time_distance: AstronomicalUnit,
) -> HeliocentricPosition {
    let shifted = jde - LIGHT_TIME_DAYS_PER_AU * light_time_distance;
    let tau = (shifted - J2000_JDE) / DAYS_PER_JULIAN_MILLENNIUM;
    fk5_correction(raw_series(body, shifted), 10.0 * tau)
}

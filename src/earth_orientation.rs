//! # Earth orientation: obliquity, nutation, precession
//!
//! Orientation quantities of the equator and of the ecliptic needed to go from a mean J2000.0
//! place, or a geometric position of date, to an apparent place.
//!
//! ## Overview
//!
//! - [`mean_obliquity`]: IAU 1976 mean obliquity of the ecliptic.
//! - [`nutation`]: IAU 1980 nutation in longitude and obliquity (106 terms).
//! - [`rotation_matrix`]: active rotation about one of the principal axes.
//! - [`equatorial_precession_matrix`] / [`precess_equatorial`]: rigorous precession of
//!   equatorial coordinates from J2000.0 to the date.
//! - [`precess_ecliptic`]: precession of ecliptic coordinates from J2000.0 to the date.
//! - [`earth_orbit_eccentricity`] / [`earth_perihelion_longitude`]: Earth orbit model used by
//!   the annual aberration.
//!
//! All epochs are Julian Ephemeris Days (TT).

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::angle::{mod24, mod360};
use crate::constants::{Degree, Hour, JulianDay, Radian, ARCSEC_TO_DEG, RADEG};
use crate::theories::iau1980::NUTATION_TERMS;
use crate::time::julian_centuries;

/// Mean obliquity of the ecliptic (IAU 1976).
///
/// Arguments
/// ---------
/// * `jde`: Julian Ephemeris Day.
///
/// Return
/// ----------
/// * `ε0 = 23.4392911° − (46.8150T + 0.00059T² − 0.001813T³)″`, in degrees.
pub fn mean_obliquity(jde: JulianDay) -> Degree {
    let t = julian_centuries(jde);
    23.4392911 - (46.8150 * t + 0.00059 * t * t - 0.001813 * t * t * t) * ARCSEC_TO_DEG
}

/// The five fundamental arguments of the nutation theory, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationArguments {
    /// Mean elongation of the Moon from the Sun
    pub d: Degree,
    /// Mean anomaly of the Sun
    pub m: Degree,
    /// Mean anomaly of the Moon
    pub m_prime: Degree,
    /// Moon's argument of latitude
    pub f: Degree,
    /// Longitude of the ascending node of the lunar orbit
    pub omega: Degree,
}

impl NutationArguments {
    pub fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        NutationArguments {
            d: 297.85036 + 445267.111480 * t - 0.0019142 * t2 + t3 / 189474.0,
            m: 357.52772 + 35999.050340 * t - 0.0001603 * t2 - t3 / 300000.0,
            m_prime: 134.96298 + 477198.867398 * t + 0.0086972 * t2 + t3 / 56250.0,
            f: 93.27191 + 483202.017538 * t - 0.0036825 * t2 + t3 / 327270.0,
            omega: 125.04452 - 1934.136261 * t + 0.0020708 * t2 + t3 / 450000.0,
        }
    }
}

/// Nutation in longitude and in obliquity, IAU 1980 theory.
///
/// Arguments
/// ---------
/// * `jde`: Julian Ephemeris Day.
///
/// Return
/// ----------
/// * `(Δψ, Δε)` in degrees.
///
/// See also
/// ------------
/// * [`NUTATION_TERMS`] – the 106 periodic terms.
pub fn nutation(jde: JulianDay) -> (Degree, Degree) {
    let t = julian_centuries(jde);
    let args = NutationArguments::at(t);

    let (dpsi, deps) = NUTATION_TERMS.iter().fold(
        (0.0, 0.0),
        |(dpsi, deps), &(d, m, mp, f, om, s, st, c, ct)| {
            let arg = (d as f64 * args.d
                + m as f64 * args.m
                + mp as f64 * args.m_prime
                + f as f64 * args.f
                + om as f64 * args.omega)
                * RADEG;
            (dpsi + (s + st * t) * arg.sin(), deps + (c + ct * t) * arg.cos())
        },
    );

    // 0.0001″ → degrees
    (dpsi * 1e-4 * ARCSEC_TO_DEG, deps * 1e-4 * ARCSEC_TO_DEG)
}

/// Principal axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// Right-handed active rotation of `alpha` radians about a principal axis.
///
/// The returned matrix rotates a vector in a fixed frame (`x' = R·x`); it is not a change of
/// basis.
pub fn rotation_matrix(alpha: Radian, axis: RotationAxis) -> Matrix3<f64> {
    let axis = match axis {
        RotationAxis::X => Vector3::x_axis(),
        RotationAxis::Y => Vector3::y_axis(),
        RotationAxis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rigorous precession matrix from the mean equator and equinox of J2000.0 to those of `jde`.
///
/// Arguments
/// ---------
/// * `jde`: target epoch.
///
/// Return
/// ----------
/// * `P = Rz(z) · Ry(−θ) · Rz(ζ)` with the IAU 1976 angles
///   `ζ = 2306.2181″T + 0.30188″T² + 0.017998″T³`,
///   `z = 2306.2181″T + 1.09468″T² + 0.018203″T³`,
///   `θ = 2004.3109″T − 0.42665″T² − 0.041833″T³`.
pub fn equatorial_precession_matrix(jde: JulianDay) -> Matrix3<f64> {
    let t = julian_centuries(jde);
    let t2 = t * t;
    let t3 = t2 * t;

    let zeta = (2306.2181 * t + 0.30188 * t2 + 0.017998 * t3) * ARCSEC_TO_DEG * RADEG;
    let z = (2306.2181 * t + 1.09468 * t2 + 0.018203 * t3) * ARCSEC_TO_DEG * RADEG;
    let theta = (2004.3109 * t - 0.42665 * t2 - 0.041833 * t3) * ARCSEC_TO_DEG * RADEG;

    rotation_matrix(z, RotationAxis::Z)
        * rotation_matrix(-theta, RotationAxis::Y)
        * rotation_matrix(zeta, RotationAxis::Z)
}

/// Precess a J2000.0 equatorial place to the mean equinox of `jde`.
///
/// Arguments
/// ---------
/// * `right_ascension`: J2000.0 right ascension in hours.
/// * `declination`: J2000.0 declination in degrees.
/// * `jde`: target epoch.
///
/// Return
/// ----------
/// * `(α, δ)` of date, in hours and degrees.
pub fn precess_equatorial(
    right_ascension: Hour,
    declination: Degree,
    jde: JulianDay,
) -> (Hour, Degree) {
    let alpha = right_ascension * 15.0 * RADEG;
    let delta = declination * RADEG;
    let direction = Vector3::new(
        delta.cos() * alpha.cos(),
        delta.cos() * alpha.sin(),
        delta.sin(),
    );

    let precessed = equatorial_precession_matrix(jde) * direction;

    let ra = mod24(precessed.y.atan2(precessed.x) / RADEG / 15.0);
    let dec = precessed.z.clamp(-1.0, 1.0).asin() / RADEG;
    (ra, dec)
}

/// Angles of the precession of the ecliptic from J2000.0, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPrecession {
    /// Inclination of the ecliptic of date on the J2000.0 ecliptic
    pub eta: Degree,
    /// Longitude of the node of the ecliptic of date on the J2000.0 ecliptic
    pub pi: Degree,
    /// General precession in longitude
    pub p: Degree,
}

impl EclipticPrecession {
    pub fn at(jde: JulianDay) -> Self {
        let t = julian_centuries(jde);
        let t2 = t * t;
        let t3 = t2 * t;
        EclipticPrecession {
            eta: (47.0029 * t - 0.03302 * t2 + 0.000060 * t3) * ARCSEC_TO_DEG,
            pi: 174.876384 + (-869.8089 * t + 0.03536 * t2) * ARCSEC_TO_DEG,
            p: (5029.0966 * t + 1.11113 * t2 - 0.000006 * t3) * ARCSEC_TO_DEG,
        }
    }
}

/// Precess ecliptic coordinates referred to J2000.0 to the ecliptic and equinox of `jde`.
///
/// Arguments
/// ---------
/// * `longitude`, `latitude`: J2000.0 ecliptic coordinates in degrees.
/// * `jde`: target epoch.
///
/// Return
/// ----------
/// * `(λ, β)` of date in degrees, λ in `[0, 360)`.
pub fn precess_ecliptic(longitude: Degree, latitude: Degree, jde: JulianDay) -> (Degree, Degree) {
    let angles = EclipticPrecession::at(jde);
    let eta = angles.eta * RADEG;
    let beta = latitude * RADEG;
    let node = (angles.pi - longitude) * RADEG;

    let a = eta.cos() * beta.cos() * node.sin() - eta.sin() * beta.sin();
    let b = beta.cos() * node.cos();
    let c = eta.cos() * beta.sin() + eta.sin() * beta.cos() * node.sin();

    (
        mod360(angles.p + angles.pi - a.atan2(b) / RADEG),
        c.clamp(-1.0, 1.0).asin() / RADEG,
    )
}

/// Eccentricity of the Earth's orbit, `t` in Julian centuries from J2000.0.
pub fn earth_orbit_eccentricity(t: f64) -> f64 {
    0.016708617 - 0.000042037 * t - 0.0000001236 * t * t
}

/// Longitude of the perihelion of the Earth's orbit in degrees, `t` in Julian centuries.
pub fn earth_perihelion_longitude(t: f64) -> Degree {
    102.937348 + 1.7195269 * t + 0.00045962 * t * t + 0.000000499 * t * t * t
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_obliquity() {
        assert_abs_diff_eq!(mean_obliquity(2451545.0), 23.4392911, epsilon = 1e-12);
        // 1987-04-10 0h TD: 23°26'27.407"
        assert_abs_diff_eq!(
            mean_obliquity(2446895.5),
            23.0 + 26.0 / 60.0 + 27.407 / 3600.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_nutation_1987_april_10() {
        let (dpsi, deps) = nutation(2446895.5);
        assert_abs_diff_eq!(dpsi * 3600.0, -3.788, epsilon = 0.01);
        assert_abs_diff_eq!(deps * 3600.0, 9.443, epsilon = 0.01);
    }

    #[test]
    fn test_nutation_amplitude() {
        for step in 0..200 {
            let (dpsi, deps) = nutation(2451545.0 + step as f64 * 37.0);
            assert!(dpsi.abs() * 3600.0 < 19.0);
            assert!(deps.abs() * 3600.0 < 10.5);
        }
    }

    #[test]
    fn test_rotation_matrix_quarter_turn() {
        let r = rotation_matrix(std::f64::consts::FRAC_PI_2, RotationAxis::Z);
        let v = r * Vector3::x();
        assert_abs_diff_eq!(v, Vector3::y(), epsilon = 1e-15);
        assert_abs_diff_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_precess_theta_persei() {
        // J2000.0 place with proper motion applied, precessed to 2028-11-13.19 TD
        let (ra, dec) = precess_equatorial(41.054063 / 15.0, 49.227750, 2462088.69);
        assert_abs_diff_eq!(ra * 15.0, 41.547214, epsilon = 1e-5);
        assert_abs_diff_eq!(dec, 49.348483, epsilon = 1e-5);
    }

    #[test]
    fn test_precession_is_identity_at_j2000() {
        let (ra, dec) = precess_equatorial(5.5, -12.25, 2451545.0);
        assert_abs_diff_eq!(ra, 5.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dec, -12.25, epsilon = 1e-12);
    }

    #[test]
    fn test_precess_ecliptic_venus() {
        // Venus, J2000.0 → -214 June 30
        let (lambda, beta) = precess_ecliptic(149.48194, 1.76549, 1643074.5);
        assert_abs_diff_eq!(lambda, 118.704, epsilon = 1e-3);
        assert_abs_diff_eq!(beta, 1.615, epsilon = 1e-3);
    }

    #[test]
    fn test_earth_orbit_at_j2000() {
        assert_abs_diff_eq!(earth_orbit_eccentricity(0.0), 0.016708617);
        assert_abs_diff_eq!(earth_perihelion_longitude(0.0), 102.937348);
    }
}

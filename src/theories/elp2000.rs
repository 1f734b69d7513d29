//! # ELP2000-82B truncated lunar theory
//!
//! Geocentric ecliptic longitude, latitude and distance of the Moon from the 60 + 60 periodic
//! terms of the truncated ELP2000-82B theory, referred to the mean equinox of date.
//!
//! ## Overview
//!
//! - [`LONGITUDE_DISTANCE_TERMS`]: `(D, M, M', F, Σl, Σr)` rows, Σl in 1e-6 degree, Σr in 1e-3 km.
//! - [`LATITUDE_TERMS`]: `(D, M, M', F, Σb)` rows, Σb in 1e-6 degree.
//! - [`lunar_position`]: evaluate the series at a Julian Ephemeris Day.
//!
//! Terms involving the Sun's mean anomaly `M` are weighted by the decreasing eccentricity of the
//! Earth's orbit (`E` for `|M| = 1`, `E²` for `|M| = 2`).

use crate::constants::{Degree, JulianDay, Kilometer, MOON_MEAN_DISTANCE_KM, RADEG};
use crate::time::julian_centuries;

pub type LunarTerm = (i32, i32, i32, i32, f64, f64);
pub type LunarLatitudeTerm = (i32, i32, i32, i32, f64);

/// Fundamental arguments of the lunar theory, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    /// Moon's mean longitude L′
    pub mean_longitude: Degree,
    /// Mean elongation of the Moon D
    pub elongation: Degree,
    /// Sun's mean anomaly M
    pub sun_anomaly: Degree,
    /// Moon's mean anomaly M′
    pub moon_anomaly: Degree,
    /// Moon's argument of latitude F
    pub latitude_argument: Degree,
}

impl LunarArguments {
    /// Evaluate the fundamental arguments at `t` Julian centuries from J2000.0.
    pub fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        LunarArguments {
            mean_longitude: 218.316654361 + 481267.88134240 * t - 0.00132675 * t2
                + t3 / 538841.0
                - t4 / 65193770.0,
            elongation: 297.85020420 + 445267.11151675 * t - 0.001630028 * t2 + t3 / 545868.0
                - t4 / 113065327.0,
            sun_anomaly: 357.52910918 + 35999.05029094 * t - 0.000153583 * t2
                + t3 / 24489796.0,
            moon_anomaly: 134.96341138 + 477198.86763133 * t + 0.008997028 * t2 + t3 / 69699.0
                - t4 / 14711892.0,
            latitude_argument: 93.27209932 + 483202.01752731 * t - 0.003402917 * t2
                - t3 / 3525955.0
                + t4 / 863309353.0,
        }
    }

    fn combine(&self, d: i32, m: i32, mp: i32, f: i32) -> f64 {
        (d as f64 * self.elongation
            + m as f64 * self.sun_anomaly
            + mp as f64 * self.moon_anomaly
            + f as f64 * self.latitude_argument)
            * RADEG
    }
}

/// Geometric geocentric position of the Moon, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Ecliptic longitude in degrees, `[0, 360)`
    pub longitude: Degree,
    /// Ecliptic latitude in degrees
    pub latitude: Degree,
    /// Earth–Moon distance in kilometers
    pub distance: Kilometer,
}

/// Evaluate the truncated ELP2000-82B series.
///
/// Arguments
/// ---------
/// * `jde`: Julian Ephemeris Day.
///
/// Return
/// ----------
/// * The geometric [`LunarPosition`]. Nutation is not included: the apparent longitude is
///   obtained by adding Δψ.
pub fn lunar_position(jde: JulianDay) -> LunarPosition {
    let t = julian_centuries(jde);
    let args = LunarArguments::at(t);
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;
    let weight = |m: i32| match m.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for &(d, m, mp, f, l, r) in LONGITUDE_DISTANCE_TERMS.iter() {
        let arg = args.combine(d, m, mp, f);
        let w = weight(m);
        sum_l += l * w * arg.sin();
        sum_r += r * w * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(d, m, mp, f, b) in LATITUDE_TERMS.iter() {
        sum_b += b * weight(m) * args.combine(d, m, mp, f).sin();
    }

    // Venus (A1), Jupiter (A2) and the flattening of the Earth
    let a1 = (119.75 + 131.849 * t) * RADEG;
    let a2 = (53.09 + 479264.290 * t) * RADEG;
    let a3 = (313.45 + 481266.484 * t) * RADEG;
    let ll = args.mean_longitude * RADEG;
    let mp = args.moon_anomaly * RADEG;
    let f = args.latitude_argument * RADEG;

    sum_l += 3958.0 * a1.sin() + 1962.0 * (ll - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * ll.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (ll - mp).sin()
        - 115.0 * (ll + mp).sin();

    LunarPosition {
        longitude: crate::angle::mod360(args.mean_longitude + sum_l / 1e6),
        latitude: sum_b / 1e6,
        distance: MOON_MEAN_DISTANCE_KM + sum_r / 1000.0,
    }
}

pub static LONGITUDE_DISTANCE_TERMS: [LunarTerm; 60] = [
    (0, 0, 1, 0, 6288774.0, -20905355.0),
    (2, 0, -1, 0, 1274027.0, -3699111.0),
    (2, 0, 0, 0, 658314.0, -2955968.0),
    (0, 0, 2, 0, 213618.0, -569925.0),
    (0, 1, 0, 0, -185116.0, 48888.0),
    (0, 0, 0, 2, -114332.0, -3149.0),
    (2, 0, -2, 0, 58793.0, 246158.0),
    (2, -1, -1, 0, 57066.0, -152138.0),
    (2, 0, 1, 0, 53322.0, -170733.0),
    (2, -1, 0, 0, 45758.0, -204586.0),
    (0, 1, -1, 0, -40923.0, -129620.0),
    (1, 0, 0, 0, -34720.0, 108743.0),
    (0, 1, 1, 0, -30383.0, 104755.0),
    (2, 0, 0, -2, 15327.0, 10321.0),
    (0, 0, 1, 2, -12528.0, 0.0),
    (0, 0, 1, -2, 10980.0, 79661.0),
    (4, 0, -1, 0, 10675.0, -34782.0),
    (0, 0, 3, 0, 10034.0, -23210.0),
    (4, 0, -2, 0, 8548.0, -21636.0),
    (2, 1, -1, 0, -7888.0, 24208.0),
    (2, 1, 0, 0, -6766.0, 30824.0),
    (1, 0, -1, 0, -5163.0, -8379.0),
    (1, 1, 0, 0, 4987.0, -16675.0),
    (2, -1, 1, 0, 4036.0, -12831.0),
    (2, 0, 2, 0, 3994.0, -10445.0),
    (4, 0, 0, 0, 3861.0, -11650.0),
    (2, 0, -3, 0, 3665.0, 14403.0),
    (0, 1, -2, 0, -2689.0, -7003.0),
    (2, 0, -1, 2, -2602.0, 0.0),
    (2, -1, -2, 0, 2390.0, 10056.0),
    (1, 0, 1, 0, -2348.0, 6322.0),
    (2, -2, 0, 0, 2236.0, -9884.0),
    (0, 1, 2, 0, -2120.0, 5751.0),
    (0, 2, 0, 0, -2069.0, 0.0),
    (2, -2, -1, 0, 2048.0, -4950.0),
    (2, 0, 1, -2, -1773.0, 4130.0),
    (2, 0, 0, 2, -1595.0, 0.0),
    (4, -1, -1, 0, 1215.0, -3958.0),
    (0, 0, 2, 2, -1110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3258.0),
    (2, 1, 1, 0, -810.0, 2616.0),
    (4, -1, -2, 0, 759.0, -1897.0),
    (0, 2, -1, 0, -713.0, -2117.0),
    (2, 2, -1, 0, -700.0, 2354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1423.0),
    (0, 0, 4, 0, 537.0, -1117.0),
    (4, -1, 0, 0, 520.0, -1571.0),
    (1, 0, -2, 0, -487.0, -1739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8752.0),
];

pub static LATITUDE_TERMS: [LunarLatitudeTerm; 60] = [
    (0, 0, 0, 1, 5128122.0),
    (0, 0, 1, 1, 280602.0),
    (0, 0, 1, -1, 277693.0),
    (2, 0, 0, -1, 173237.0),
    (2, 0, -1, 1, 55413.0),
    (2, 0, -1, -1, 46271.0),
    (2, 0, 0, 1, 32573.0),
    (0, 0, 2, 1, 17198.0),
    (2, 0, 1, -1, 9266.0),
    (0, 0, 2, -1, 8822.0),
    (2, -1, 0, -1, 8216.0),
    (2, 0, -2, -1, 4324.0),
    (2, 0, 1, 1, 4200.0),
    (2, 1, 0, -1, -3359.0),
    (2, -1, -1, 1, 2463.0),
    (2, -1, 0, 1, 2211.0),
    (2, -1, -1, -1, 2065.0),
    (0, 1, -1, -1, -1870.0),
    (4, 0, -1, -1, 1828.0),
    (0, 1, 0, 1, -1794.0),
    (0, 0, 0, 3, -1749.0),
    (0, 1, -1, 1, -1565.0),
    (1, 0, 0, 1, -1491.0),
    (0, 1, 1, 1, -1475.0),
    (0, 1, 1, -1, -1410.0),
    (0, 1, 0, -1, -1344.0),
    (1, 0, 0, -1, -1335.0),
    (0, 0, 3, 1, 1107.0),
    (4, 0, 0, -1, 1021.0),
    (4, 0, -1, 1, 833.0),
    (0, 0, 1, -3, 777.0),
    (4, 0, -2, 1, 671.0),
    (2, 0, 0, -3, 607.0),
    (2, 0, 2, -1, 596.0),
    (2, -1, 1, -1, 491.0),
    (2, 0, -2, 1, -451.0),
    (0, 0, 3, -1, 439.0),
    (2, 0, 2, 1, 422.0),
    (2, 0, -3, -1, 421.0),
    (2, 1, -1, 1, -366.0),
    (2, 1, 0, 1, -351.0),
    (4, 0, 0, 1, 331.0),
    (2, -1, 1, 1, 315.0),
    (2, -2, 0, -1, 302.0),
    (0, 0, 1, 3, -283.0),
    (2, 1, 1, -1, -229.0),
    (1, 1, 0, -1, 223.0),
    (1, 1, 0, 1, 223.0),
    (0, 1, -2, -1, -220.0),
    (2, 1, -1, -1, -220.0),
    (1, 0, 1, 1, -185.0),
    (2, -1, -2, -1, 181.0),
    (0, 1, 2, 1, -177.0),
    (4, 0, -2, -1, 176.0),
    (4, -1, -1, -1, 166.0),
    (1, 0, 1, -1, -164.0),
    (4, 0, 1, -1, 132.0),
    (1, 0, -1, -1, -119.0),
    (4, -1, 0, -1, 115.0),
    (2, -2, 0, 1, 107.0),
];

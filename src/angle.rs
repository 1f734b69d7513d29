//! # Angles and angular domains
//!
//! Every angular quantity of the pipeline is stored as an [`Angle`]: a decimal value paired with
//! the [`AngleDomain`] it lives in. The domain decides how out-of-range values are folded back
//! and how the sexagesimal form is validated and printed.
//!
//! ## Overview
//!
//! | Domain                     | Range        | Typical use                          |
//! |----------------------------|--------------|--------------------------------------|
//! | [`AngleDomain::Degrees360`] | `[0, 360)`   | azimuth, ecliptic longitude          |
//! | [`AngleDomain::Degrees180`] | `(-180, 180]`| geographic longitude and latitude    |
//! | [`AngleDomain::Degrees90`]  | `[-90, 90]`  | declination, altitude (clamped)      |
//! | [`AngleDomain::Hours24`]    | `[0, 24)`    | right ascension, sidereal time       |
//!
//! Sexagesimal components carry the sign on the outermost non-zero component only:
//! `-0°30'00"` is stored as `(0, -30, 0.0)`.
//!
//! ## See also
//! ------------
//! * [`normalize`] – Fold a decimal value into a domain.
//! * [`decimal_from_sexagesimal`] – Signed (d, m, s) → decimal.
//! * [`Angle::from_sexagesimal`] – Validated construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Radian, RADEG};
use crate::visibility_errors::VisibilityError;

/// Angular domain of an [`Angle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleDomain {
    /// `[0, 360)` degrees
    Degrees360,
    /// `(-180, 180]` degrees
    Degrees180,
    /// `[-90, 90]` degrees, clamped rather than wrapped
    Degrees90,
    /// `[0, 24)` hours
    Hours24,
}

impl AngleDomain {
    /// Length of a full turn expressed in the unit of the domain.
    pub fn full_turn(self) -> f64 {
        match self {
            AngleDomain::Hours24 => 24.0,
            _ => 360.0,
        }
    }

    fn degrees_per_unit(self) -> f64 {
        match self {
            AngleDomain::Hours24 => 15.0,
            _ => 1.0,
        }
    }
}

/// Sexagesimal decomposition of an angle, sign on the outermost non-zero component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    /// Degrees or hours
    pub units: i32,
    pub minutes: i32,
    pub seconds: f64,
}

fn wrap(value: f64, full: f64) -> f64 {
    let wrapped = if value < 0.0 {
        value + full * (1.0 + (value / full).trunc().abs())
    } else {
        value - full * (value / full).trunc()
    };
    // exact negative multiples land on `full`
    if wrapped >= full {
        wrapped - full
    } else {
        wrapped
    }
}

/// Fold a decimal value into the given angular domain.
///
/// Arguments
/// ---------
/// * `value`: decimal degrees (or hours for [`AngleDomain::Hours24`]).
/// * `domain`: target domain.
///
/// Return
/// ----------
/// * The equivalent value inside the domain. `[0, 360)` and `[0, 24)` wrap, `(-180, 180]` wraps
///   around zero and `[-90, 90]` clamps.
pub fn normalize(value: f64, domain: AngleDomain) -> f64 {
    match domain {
        AngleDomain::Degrees360 | AngleDomain::Hours24 => wrap(value, domain.full_turn()),
        AngleDomain::Degrees180 => {
            let folded = wrap(value + 180.0, 360.0) - 180.0;
            if folded == -180.0 {
                180.0
            } else {
                folded
            }
        }
        AngleDomain::Degrees90 => value.clamp(-90.0, 90.0),
    }
}

/// Shorthand for `normalize(value, AngleDomain::Degrees360)`.
#[inline]
pub fn mod360(value: Degree) -> Degree {
    normalize(value, AngleDomain::Degrees360)
}

/// Shorthand for `normalize(value, AngleDomain::Hours24)`.
#[inline]
pub fn mod24(value: f64) -> f64 {
    normalize(value, AngleDomain::Hours24)
}

/// Convert signed sexagesimal components into a decimal value.
///
/// The sign is read from the outermost non-zero component and applied to the magnitude of the
/// whole triple, so `(-12, 30, 0)` is `-12.5` and `(0, -30, 0)` is `-0.5`.
///
/// Arguments
/// ---------
/// * `units`: degrees or hours.
/// * `minutes`: minutes of arc or of time.
/// * `seconds`: seconds of arc or of time.
///
/// Return
/// ----------
/// * The decimal value (degrees or hours).
pub fn decimal_from_sexagesimal(units: i32, minutes: i32, seconds: f64) -> f64 {
    let negative = units < 0
        || (units == 0 && minutes < 0)
        || (units == 0 && minutes == 0 && seconds < 0.0);
    let magnitude =
        units.unsigned_abs() as f64 + minutes.unsigned_abs() as f64 / 60.0 + seconds.abs() / 3600.0;
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Split a decimal value into sexagesimal components.
///
/// Arguments
/// ---------
/// * `value`: decimal degrees or hours.
///
/// Return
/// ----------
/// * A [`Sexagesimal`] whose sign sits on the outermost non-zero component.
pub fn sexagesimal_from_decimal(value: f64) -> Sexagesimal {
    let magnitude = value.abs();
    let units = magnitude.trunc();
    let fraction = (magnitude - units) * 60.0;
    let minutes = fraction.trunc();
    let seconds = (fraction - minutes) * 60.0;

    let (mut units, mut minutes, mut seconds) = (units as i32, minutes as i32, seconds);
    if value < 0.0 {
        if units != 0 {
            units = -units;
        } else if minutes != 0 {
            minutes = -minutes;
        } else {
            seconds = -seconds;
        }
    }
    Sexagesimal {
        units,
        minutes,
        seconds,
    }
}

fn validate_sexagesimal(
    units: i32,
    minutes: i32,
    seconds: f64,
    domain: AngleDomain,
) -> Result<(), VisibilityError> {
    let unsigned_ok = (0..=59).contains(&minutes) && (0.0..60.0).contains(&seconds);
    let signed_ok = (-59..=59).contains(&minutes) && seconds > -60.0 && seconds < 60.0;

    let valid = match domain {
        AngleDomain::Degrees360 => (0..=359).contains(&units) && unsigned_ok,
        AngleDomain::Hours24 => (0..=23).contains(&units) && unsigned_ok,
        AngleDomain::Degrees180 => match units {
            180 => minutes == 0 && seconds == 0.0,
            0 => signed_ok,
            u => (-179..=179).contains(&u) && unsigned_ok,
        },
        AngleDomain::Degrees90 => match units {
            90 | -90 => minutes == 0 && seconds == 0.0,
            0 => signed_ok,
            u => (-89..=89).contains(&u) && unsigned_ok,
        },
    };

    if valid && seconds.is_finite() {
        Ok(())
    } else {
        Err(VisibilityError::AngleOutOfRange {
            domain,
            value: format!("{units}°{minutes}'{seconds}\""),
        })
    }
}

/// A decimal angle bound to its [`AngleDomain`].
///
/// The stored value always lies inside the domain. Values are immutable: every stage of the
/// pipeline builds new angles rather than mutating existing ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    value: f64,
    domain: AngleDomain,
}

impl Angle {
    /// Build an angle from a decimal value, folding it into the domain.
    pub fn new(value: f64, domain: AngleDomain) -> Self {
        Angle {
            value: normalize(value, domain),
            domain,
        }
    }

    /// Build a validated angle from sexagesimal components.
    ///
    /// Arguments
    /// ---------
    /// * `units`, `minutes`, `seconds`: components, the sign on the outermost non-zero one.
    /// * `domain`: target domain.
    ///
    /// Return
    /// ----------
    /// * The angle, or [`VisibilityError::AngleOutOfRange`] when a component falls outside the
    ///   ranges allowed by the domain (for instance `180°01'` in `(-180, 180]`, or a negative
    ///   minute with a non-zero degree).
    pub fn from_sexagesimal(
        units: i32,
        minutes: i32,
        seconds: f64,
        domain: AngleDomain,
    ) -> Result<Self, VisibilityError> {
        validate_sexagesimal(units, minutes, seconds, domain)?;
        Ok(Angle {
            value: decimal_from_sexagesimal(units, minutes, seconds),
            domain,
        })
    }

    /// Decimal value in the unit of the domain (degrees, or hours for `Hours24`).
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn domain(&self) -> AngleDomain {
        self.domain
    }

    /// Value converted to degrees (hours are multiplied by 15).
    pub fn degrees(&self) -> Degree {
        self.value * self.domain.degrees_per_unit()
    }

    pub fn radians(&self) -> Radian {
        self.degrees() * RADEG
    }

    pub fn sexagesimal(&self) -> Sexagesimal {
        sexagesimal_from_decimal(self.value)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.value < 0.0 { "-" } else { "" };
        let magnitude = self.value.abs();
        let mut units = magnitude.trunc() as i64;
        let fraction = (magnitude - magnitude.trunc()) * 60.0;
        let mut minutes = fraction.trunc() as i64;
        let mut seconds = ((fraction - fraction.trunc()) * 600.0).round() / 10.0;

        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes -= 60;
            units += 1;
        }

        match self.domain {
            AngleDomain::Hours24 => write!(f, "{sign}{units:02}h{minutes:02}'{seconds:04.1}\""),
            AngleDomain::Degrees90 => write!(f, "{sign}{units:02}°{minutes:02}'{seconds:04.1}\""),
            AngleDomain::Degrees360 | AngleDomain::Degrees180 => {
                write!(f, "{sign}{units:03}°{minutes:02}'{seconds:04.1}\"")
            }
        }
    }
}

#[cfg(test)]
mod angle_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_wrapping_domains() {
        assert_relative_eq!(normalize(-30.0, AngleDomain::Degrees360), 330.0);
        assert_relative_eq!(normalize(725.0, AngleDomain::Degrees360), 5.0);
        assert_eq!(normalize(-360.0, AngleDomain::Degrees360), 0.0);
        assert_eq!(normalize(360.0, AngleDomain::Degrees360), 0.0);
        assert_relative_eq!(normalize(25.5, AngleDomain::Hours24), 1.5);
        assert_relative_eq!(normalize(-0.5, AngleDomain::Hours24), 23.5);
    }

    #[test]
    fn test_normalize_signed_domains() {
        assert_relative_eq!(normalize(190.0, AngleDomain::Degrees180), -170.0);
        assert_relative_eq!(normalize(-190.0, AngleDomain::Degrees180), 170.0);
        assert_eq!(normalize(180.0, AngleDomain::Degrees180), 180.0);
        assert_eq!(normalize(-180.0, AngleDomain::Degrees180), 180.0);
        assert_eq!(normalize(100.0, AngleDomain::Degrees90), 90.0);
        assert_eq!(normalize(-91.0, AngleDomain::Degrees90), -90.0);
    }

    #[test]
    fn test_decimal_from_sexagesimal_sign() {
        assert_relative_eq!(decimal_from_sexagesimal(-12, 30, 0.0), -12.5);
        assert_relative_eq!(decimal_from_sexagesimal(0, -30, 0.0), -0.5);
        assert_relative_eq!(decimal_from_sexagesimal(0, 0, -36.0), -0.01);
        assert_relative_eq!(decimal_from_sexagesimal(2, 20, 55.0), 2.348611111111111);
    }

    #[test]
    fn test_sexagesimal_round_trip_all_domains() {
        let cases = [
            (123, 45, 30.5, AngleDomain::Degrees360),
            (-179, 59, 59.9, AngleDomain::Degrees180),
            (0, -30, 12.0, AngleDomain::Degrees90),
            (0, 0, -42.5, AngleDomain::Degrees180),
            (23, 59, 1.25, AngleDomain::Hours24),
            (-48, 51, 12.0, AngleDomain::Degrees90),
        ];
        for (d, m, s, domain) in cases {
            let angle = Angle::from_sexagesimal(d, m, s, domain).unwrap();
            let parts = angle.sexagesimal();
            assert_eq!(parts.units, d);
            assert_eq!(parts.minutes, m);
            assert_relative_eq!(parts.seconds, s, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_invalid_sexagesimal_components() {
        assert!(Angle::from_sexagesimal(360, 0, 0.0, AngleDomain::Degrees360).is_err());
        assert!(Angle::from_sexagesimal(180, 1, 0.0, AngleDomain::Degrees180).is_err());
        assert!(Angle::from_sexagesimal(-90, 0, 1.0, AngleDomain::Degrees90).is_err());
        assert!(Angle::from_sexagesimal(12, 60, 0.0, AngleDomain::Hours24).is_err());
        assert!(Angle::from_sexagesimal(24, 0, 0.0, AngleDomain::Hours24).is_err());
        assert!(Angle::from_sexagesimal(10, -5, 0.0, AngleDomain::Degrees90).is_err());

        let err = Angle::from_sexagesimal(0, 0, 60.0, AngleDomain::Degrees360).unwrap_err();
        assert!(matches!(
            err,
            VisibilityError::AngleOutOfRange {
                domain: AngleDomain::Degrees360,
                ..
            }
        ));

        assert!(Angle::from_sexagesimal(180, 0, 0.0, AngleDomain::Degrees180).is_ok());
        assert!(Angle::from_sexagesimal(-90, 0, 0.0, AngleDomain::Degrees90).is_ok());
    }

    #[test]
    fn test_hours_to_degrees() {
        let ra = Angle::new(6.0, AngleDomain::Hours24);
        assert_relative_eq!(ra.degrees(), 90.0);
        assert_relative_eq!(ra.radians(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Angle::new(12.5, AngleDomain::Hours24).to_string(),
            "12h30'00.0\""
        );
        assert_eq!(
            Angle::from_sexagesimal(-48, 51, 12.0, AngleDomain::Degrees90)
                .unwrap()
                .to_string(),
            "-48°51'12.0\""
        );
        assert_eq!(
            Angle::from_sexagesimal(2, 20, 55.0, AngleDomain::Degrees180)
                .unwrap()
                .to_string(),
            "002°20'55.0\""
        );
        // seconds rounding carries into the minutes
        assert_eq!(
            Angle::new(10.0 + 59.0 / 60.0 + 59.97 / 3600.0, AngleDomain::Degrees360).to_string(),
            "011°00'00.0\""
        );
    }
}

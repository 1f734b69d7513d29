//! # Civil calendar, Julian Day and ΔT
//!
//! Calendar arithmetic shared by the time-frame context and the comet perihelion epoch.
//!
//! ## Overview
//!
//! - [`CivilDateTime`]: validated Gregorian date and time with hour shifting across day, month
//!   and year boundaries, convertible to and from a `hifitime` [`Epoch`].
//! - [`julian_day`]: Meeus' Julian Day algorithm, Julian calendar before 1582-10-15 and
//!   Gregorian calendar afterwards.
//! - [`estimate_delta_t`] / [`resolve_delta_t`]: TT − UT, either user-supplied or estimated.
//! - [`mean_sidereal_time_0h`]: Greenwich mean sidereal time at 0h UT.
//! - [`LocalTime`]: a civil clock reading rounded to the minute, as reported for rise and set.

use std::fmt;

use hifitime::Epoch;

use crate::angle::mod24;
use crate::constants::{Hour, JulianDay, DAYS_PER_JULIAN_CENTURY, J2000_JDE};
use crate::visibility_errors::VisibilityError;

/// Estimate ΔT = TT − UT in seconds with a parabola fitted on 1950–2150.
///
/// Arguments
/// ---------
/// * `year`: civil year.
///
/// Return
/// ----------
/// * `62.92 + 0.32217·(y − 2000) + 0.005589·(y − 2000)²` for years 1950 to 2150, `0` elsewhere.
pub fn estimate_delta_t(year: i32) -> f64 {
    if (1950..=2150).contains(&year) {
        let t = (year - 2000) as f64;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else {
        0.0
    }
}

/// Resolve the ΔT used for a given year.
///
/// Arguments
/// ---------
/// * `year`: civil year the ΔT applies to.
/// * `provided`: optional user value in seconds.
///
/// Return
/// ----------
/// * For 1950 to 2100: the provided value when it lies in `[0, 100]` s, otherwise
///   [`estimate_delta_t`]. Outside 1950–2100: `0`.
pub fn resolve_delta_t(year: i32, provided: Option<f64>) -> f64 {
    if !(1950..=2100).contains(&year) {
        return 0.0;
    }
    match provided {
        Some(value) if (0.0..=100.0).contains(&value) => value,
        _ => estimate_delta_t(year),
    }
}

/// Year of the Gregorian reform: 1582-10-04 is followed by 1582-10-15.
const REFORM_YEAR: i32 = 1582;

/// Leap-year rule of the calendar in force: Julian before the reform, Gregorian after.
pub fn is_leap_year(year: i32) -> bool {
    if year < REFORM_YEAR {
        year.rem_euclid(4) == 0
    } else {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }
}

/// Days 5 to 14 of October 1582 were skipped by the reform.
fn is_reform_gap(year: i32, month: u32, day: u32) -> bool {
    year == REFORM_YEAR && month == 10 && (5..=14).contains(&day)
}

/// Number of days of a month, Julian calendar before 1582 and Gregorian after.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Julian Day of a calendar date (Meeus, chapter 7).
///
/// Arguments
/// ---------
/// * `year`, `month`: calendar year and month (1–12).
/// * `day`: day of the month with its fraction (`1.5` is noon on the first).
///
/// Return
/// ----------
/// * The Julian Day. Dates from 1582-10-15 onwards use the Gregorian correction
///   `B = 2 − A + A/4`, earlier dates are read in the Julian calendar.
pub fn julian_day(year: i32, month: u32, day: f64) -> JulianDay {
    let (a, m) = if month < 3 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let gregorian = (year, month) > (1582, 10) || ((year, month) == (1582, 10) && day >= 15.0);
    let b = if gregorian {
        let century = a.div_euclid(100);
        (2 - century + century.div_euclid(4)) as f64
    } else {
        0.0
    };

    let c = if a < 0 {
        (365.25 * a as f64 - 0.75).trunc()
    } else {
        (365.25 * a as f64).trunc()
    };
    let d = (30.6001 * (m + 1) as f64).trunc();

    1_720_994.5 + day + b + c + d
}

/// Julian centuries elapsed since J2000.0.
#[inline]
pub fn julian_centuries(jd: JulianDay) -> f64 {
    (jd - J2000_JDE) / DAYS_PER_JULIAN_CENTURY
}

/// Greenwich mean sidereal time at 0h UT.
///
/// Arguments
/// ---------
/// * `jd0h`: Julian Day at 0h UT of the Greenwich date.
///
/// Return
/// ----------
/// * `T0` in hours, `[0, 24)`.
pub fn mean_sidereal_time_0h(jd0h: JulianDay) -> Hour {
    let t = julian_centuries(jd0h);
    mod24(6.697_374_558_3 + 2_400.051_336_907_2 * t + 0.000_025_862_2 * t * t
        - t * t * t / 580_645_161.0)
}

/// A Gregorian civil date and time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilDateTime {
    /// Build a validated civil date and time.
    ///
    /// Return
    /// ----------
    /// * [`VisibilityError::InvalidDate`] when a component does not exist in the Gregorian
    ///   calendar (month 13, February 30th, minute 60, …).
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, VisibilityError> {
        let valid = (1..=12).contains(&month)
            && day >= 1
            && day <= days_in_month(year, month)
            && !is_reform_gap(year, month, day)
            && hour < 24
            && minute < 60
            && (0.0..60.0).contains(&second);
        if !valid {
            return Err(VisibilityError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:05.2}"
            )));
        }
        Ok(CivilDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Time of day in decimal hours.
    pub fn hours(&self) -> Hour {
        self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3600.0
    }

    /// Day of the month with the time of day as fraction.
    pub fn day_fraction(&self) -> f64 {
        self.day as f64 + self.hours() / 24.0
    }

    /// Same instant expressed `hours` later (negative values go back in time), rolling over days,
    /// months and years with the Gregorian calendar.
    pub fn shifted_by_hours(&self, hours: i32) -> Self {
        let total = self.hour as i32 + hours;
        let mut shifted = *self;
        shifted.hour = total.rem_euclid(24) as u32;
        shifted.add_days(total.div_euclid(24));
        shifted
    }

    fn add_days(&mut self, days: i32) {
        for _ in 0..days.max(0) {
            if is_reform_gap(self.year, self.month, self.day + 1) {
                self.day = 15;
            } else if self.day < days_in_month(self.year, self.month) {
                self.day += 1;
            } else if self.month < 12 {
                self.day = 1;
                self.month += 1;
            } else {
                self.day = 1;
                self.month = 1;
                self.year += 1;
            }
        }
        for _ in 0..(-days).max(0) {
            if is_reform_gap(self.year, self.month, self.day - 1) {
                self.day = 4;
            } else if self.day > 1 {
                self.day -= 1;
            } else if self.month > 1 {
                self.month -= 1;
                self.day = days_in_month(self.year, self.month);
            } else {
                self.year -= 1;
                self.month = 12;
                self.day = 31;
            }
        }
    }

    /// Same date with another time of day.
    pub fn with_time(&self, hour: u32, minute: u32, second: f64) -> Result<Self, VisibilityError> {
        CivilDateTime::new(self.year, self.month, self.day, hour, minute, second)
    }

    /// Read the civil date and time of a `hifitime` epoch in the UTC scale.
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
        CivilDateTime {
            year,
            month: month as u32,
            day: day as u32,
            hour: hour as u32,
            minute: minute as u32,
            second: second as f64 + nanos as f64 * 1e-9,
        }
    }

    /// Convert into a `hifitime` epoch, reading the fields as UTC.
    pub fn to_epoch(&self) -> Epoch {
        let whole = self.second.trunc();
        Epoch::from_gregorian_utc(
            self.year,
            self.month as u8,
            self.day as u8,
            self.hour as u8,
            self.minute as u8,
            whole as u8,
            ((self.second - whole) * 1e9).round() as u32,
        )
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second.trunc() as u32
        )
    }
}

/// A local civil clock reading, rounded to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    pub hour: u32,
    pub minute: u32,
}

impl LocalTime {
    /// Round decimal hours to the nearest minute.
    ///
    /// The value is first folded into `[0, 24)`; 60 minutes carry into the next hour and
    /// 24 h wraps to midnight.
    pub fn from_hours(hours: Hour) -> Self {
        let hours = mod24(hours);
        let mut hour = hours.trunc() as u32;
        let mut minute = ((hours - hours.trunc()) * 60.0).round() as u32;
        if minute == 60 {
            minute = 0;
            hour += 1;
        }
        if hour == 24 {
            hour = 0;
        }
        LocalTime { hour, minute }
    }

    pub fn hours(&self) -> Hour {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

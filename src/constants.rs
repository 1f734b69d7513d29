//! # Constants and type definitions for planet_visibility
//!
//! This module centralizes the **physical constants**, **conversion factors**, **sentinel
//! values** and **unit aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants (Earth radius and flattening, AU, light-time)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ degrees, sidereal ↔ solar time)
//! - Rise/set sentinels for circumpolar and never-rising bodies
//! - Core type aliases used across the crate
//!
//! The numeric values follow the classical positional astronomy conventions (IAU 1976 and
//! VSOP87/ELP2000-82B era constants) so that the series and corrections built on top of them
//! remain mutually consistent.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → degrees
pub const ARCSEC_TO_DEG: f64 = 1.0 / 3600.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Ephemeris Day of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const J2000_JDE: f64 = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Days in a Julian millennium (VSOP87 time argument)
pub const DAYS_PER_JULIAN_MILLENNIUM: f64 = 365_250.0;

/// Days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Days in a tropical year, used to turn an orbital period in years into a mean motion
pub const DAYS_PER_TROPICAL_YEAR: f64 = 365.242191;

/// Seconds in a year, used by Kepler's third law for comet periods
pub const SECONDS_PER_YEAR: f64 = 31_556_925.3;

/// Light travel time for one astronomical unit, in days
pub const LIGHT_TIME_DAYS_PER_AU: f64 = 0.0057755183;

/// Astronomical Unit in kilometers, as used by the lunar phase geometry
pub const AU_KM: f64 = 149_598_500.0;

/// Earth equatorial radius in kilometers
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;

/// Earth equatorial radius in meters
pub const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_140.0;

/// Ratio between the polar and the equatorial radius of the Earth (b/a)
pub const EARTH_POLAR_TO_EQUATORIAL: f64 = 0.99664719;

/// Highest altitude accepted for an observing site, in meters
pub const MAX_SITE_ALTITUDE: f64 = 8848.0;

/// Heliocentric gravitational parameter in km³/s²
pub const GM_SUN_KM3_S2: f64 = 1.327e11;

/// Gaussian factor of Barker's equation, `k·3/√2` expressed per day
pub const PARABOLIC_MOTION_FACTOR: f64 = 0.03649116245;

/// Equatorial horizontal parallax of the Sun at 1 AU, in arcseconds
pub const SOLAR_PARALLAX_ARCSEC: f64 = 8.794;

/// Constant of annual aberration, in arcseconds
pub const ABERRATION_CONSTANT_ARCSEC: f64 = 20.49552;

/// Aberration term of the apparent solar longitude, in arcseconds (for R in AU)
pub const SOLAR_ABERRATION_ARCSEC: f64 = 20.4898;

/// Apparent diameter of the Sun seen from 1 AU, in arcseconds
pub const SUN_DIAMETER_1AU_ARCSEC: f64 = 1919.26;

/// Lunar equatorial radius in kilometers
pub const MOON_RADIUS_KM: f64 = 1737.92196534;

/// Mean Earth–Moon distance of the ELP2000-82B truncated theory, in kilometers
pub const MOON_MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Any raw distance above this value is a lunar distance expressed in kilometers
pub const LUNAR_DISTANCE_THRESHOLD_KM: f64 = 300_000.0;

/// Standard horizon refraction used for rise and set, in degrees (34′)
pub const HORIZON_REFRACTION_DEG: f64 = 34.0 / 60.0;

/// Extinction coefficient at the zenith, in magnitudes
pub const ZENITH_EXTINCTION_MAG: f64 = 0.2;

// -------------------------------------------------------------------------------------------------
// Sidereal time
// -------------------------------------------------------------------------------------------------

/// Sidereal hours elapsed per solar hour
pub const SOLAR_TO_SIDEREAL: f64 = 1.00273790935;

/// Solar hours elapsed per sidereal hour
pub const SIDEREAL_TO_SOLAR: f64 = 0.9972695663;

/// Length of a sidereal day in solar hours (23h56m04s)
pub const SIDEREAL_DAY_HOURS: f64 = 23.0 + 56.0 / 60.0 + 4.0 / 3600.0;

/// A UT below this value (3m56s) may have a second solution later the same day
pub const ALTERNATE_UT_THRESHOLD_HOURS: f64 = 3.0 / 60.0 + 56.0 / 3600.0;

// -------------------------------------------------------------------------------------------------
// Rise/set sentinels
// -------------------------------------------------------------------------------------------------

/// Stored in every numeric rise/set field of a body that never sets
pub const ALWAYS_VISIBLE: f64 = 1000.0;

/// Stored in every numeric rise/set field of a body that never rises
pub const ALWAYS_INVISIBLE: f64 = -1000.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Time or right ascension in hours
pub type Hour = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Julian Day (UT or TT depending on context)
pub type JulianDay = f64;

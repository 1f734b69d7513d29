//! # Observing site
//!
//! A ground site described by its geographic coordinates, altitude and local atmosphere, and
//! its reduction to the geocentric parallax factors used by the topocentric correction.
//!
//! ## Overview
//!
//! - [`ObserverPosition`]: name, longitude/latitude as [`Angle`]s, altitude, pressure and
//!   temperature, plus the precomputed `ρ·cos φ′` and `ρ·sin φ′`.
//! - [`geodetic_to_parallax`]: geodetic latitude and altitude → `(ρ·cos φ′, ρ·sin φ′)`.
//! - [`to_opt_notnan`]: lift an optional float into a NaN-free value.
//!
//! ## Conventions
//!
//! - Longitude is east positive, in the `(-180, 180]` domain.
//! - Latitude is north positive, in the `[-90, 90]` domain.
//! - Altitude is clamped to `[0, 8848]` m, pressure to `[700, 1300]` mbar (default 1013) and
//!   temperature to `[-60, 60]` °C (default 10). A clamped input is reported with `warn!`.
//! - `ρ` is expressed in Earth equatorial radii.
//!
//! ## See also
//! ------------
//! * [`TimeFrameContext`](crate::time_frame::TimeFrameContext) – Owns an observer and adds the
//!   time-dependent frame quantities.

use log::warn;
use ordered_float::NotNan;

use crate::angle::{Angle, AngleDomain};
use crate::constants::{
    Degree, Meter, EARTH_EQUATORIAL_RADIUS_M, EARTH_POLAR_TO_EQUATORIAL, MAX_SITE_ALTITUDE,
};
use crate::visibility_errors::VisibilityError;

/// Default atmospheric pressure in millibars.
pub const DEFAULT_PRESSURE: f64 = 1013.0;

/// Default air temperature in degrees Celsius.
pub const DEFAULT_TEMPERATURE: f64 = 10.0;

/// Convert an `Option<f64>` into an `Option<NotNan<f64>>`, propagating `NaN` as an error.
///
/// Errors
/// ----------
/// * `ordered_float::FloatIsNan` if `x` is `Some(NaN)`.
pub fn to_opt_notnan(x: Option<f64>) -> Result<Option<NotNan<f64>>, ordered_float::FloatIsNan> {
    x.map(NotNan::new).transpose()
}

/// Convert a geodetic latitude and an altitude into geocentric parallax factors.
///
/// Arguments
/// ---------
/// * `latitude`: geodetic latitude in degrees.
/// * `altitude`: height above sea level in meters.
///
/// Return
/// ----------
/// * `(ρ·cos φ′, ρ·sin φ′)` in Earth equatorial radii, from
///
/// ```text
/// u         = atan(b/a · tan φ)
/// ρ·sin φ′  = b/a · sin u + h/a · sin φ
/// ρ·cos φ′  = cos u + h/a · cos φ
/// ```
pub fn geodetic_to_parallax(latitude: Degree, altitude: Meter) -> (f64, f64) {
    let phi = latitude.to_radians();
    let u = (EARTH_POLAR_TO_EQUATORIAL * phi.tan()).atan();
    let height_ratio = altitude / EARTH_EQUATORIAL_RADIUS_M;

    let rho_cos_phi = u.cos() + height_ratio * phi.cos();
    let rho_sin_phi = EARTH_POLAR_TO_EQUATORIAL * u.sin() + height_ratio * phi.sin();
    (rho_cos_phi, rho_sin_phi)
}

fn clamp_reported(what: &str, value: f64, min: f64, max: f64) -> f64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("{what} {value} out of [{min}, {max}], clamped to {clamped}");
    }
    clamped
}

/// A ground observing site.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverPosition {
    name: String,
    longitude: Angle,
    latitude: Angle,
    altitude: NotNan<f64>,
    pressure: NotNan<f64>,
    temperature: NotNan<f64>,
    rho_cos_phi: NotNan<f64>,
    rho_sin_phi: NotNan<f64>,
}

impl ObserverPosition {
    /// Build a site from sexagesimal coordinates.
    ///
    /// Arguments
    /// ---------
    /// * `name`: site name.
    /// * `longitude`: `(degrees, minutes, seconds)`, east positive, sign on the outermost
    ///   non-zero component.
    /// * `latitude`: `(degrees, minutes, seconds)`, north positive.
    /// * `altitude`: meters above sea level (clamped).
    /// * `pressure`: millibars, `None` for the default 1013 mbar (clamped).
    /// * `temperature`: °C, `None` for the default 10 °C (clamped).
    ///
    /// Return
    /// ----------
    /// * The site with its parallax factors computed once.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::AngleOutOfRange`] for an invalid sexagesimal component.
    /// * [`VisibilityError::NanValue`] when a numeric input is NaN.
    pub fn new(
        name: impl Into<String>,
        longitude: (i32, i32, f64),
        latitude: (i32, i32, f64),
        altitude: Meter,
        pressure: Option<f64>,
        temperature: Option<f64>,
    ) -> Result<Self, VisibilityError> {
        let (d, m, s) = longitude;
        let longitude = Angle::from_sexagesimal(d, m, s, AngleDomain::Degrees180)?;
        let latitude =
            Angle::from_sexagesimal(latitude.0, latitude.1, latitude.2, AngleDomain::Degrees90)?;
        Self::from_angles(name, longitude, latitude, altitude, pressure, temperature)
    }

    /// Build a site from decimal degrees.
    ///
    /// The longitude is folded into `(-180, 180]`, the latitude must lie in `[-90, 90]`.
    pub fn from_degrees(
        name: impl Into<String>,
        longitude: Degree,
        latitude: Degree,
        altitude: Meter,
        pressure: Option<f64>,
        temperature: Option<f64>,
    ) -> Result<Self, VisibilityError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(VisibilityError::AngleOutOfRange {
                domain: AngleDomain::Degrees90,
                value: latitude.to_string(),
            });
        }
        Self::from_angles(
            name,
            Angle::new(NotNan::new(longitude)?.into_inner(), AngleDomain::Degrees180),
            Angle::new(latitude, AngleDomain::Degrees90),
            altitude,
            pressure,
            temperature,
        )
    }

    fn from_angles(
        name: impl Into<String>,
        longitude: Angle,
        latitude: Angle,
        altitude: Meter,
        pressure: Option<f64>,
        temperature: Option<f64>,
    ) -> Result<Self, VisibilityError> {
        let altitude = clamp_reported(
            "altitude",
            NotNan::new(altitude)?.into_inner(),
            0.0,
            MAX_SITE_ALTITUDE,
        );
        let pressure = clamp_reported(
            "pressure",
            to_opt_notnan(pressure)?.map_or(DEFAULT_PRESSURE, NotNan::into_inner),
            700.0,
            1300.0,
        );
        let temperature = clamp_reported(
            "temperature",
            to_opt_notnan(temperature)?.map_or(DEFAULT_TEMPERATURE, NotNan::into_inner),
            -60.0,
            60.0,
        );

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude.degrees(), altitude);

        Ok(ObserverPosition {
            name: name.into(),
            longitude,
            latitude,
            altitude: NotNan::new(altitude)?,
            pressure: NotNan::new(pressure)?,
            temperature: NotNan::new(temperature)?,
            rho_cos_phi: NotNan::new(rho_cos_phi)?,
            rho_sin_phi: NotNan::new(rho_sin_phi)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic longitude, east positive.
    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    /// Geodetic latitude, north positive.
    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    /// Altitude in meters.
    pub fn altitude(&self) -> Meter {
        self.altitude.into_inner()
    }

    /// Atmospheric pressure in millibars.
    pub fn pressure(&self) -> f64 {
        self.pressure.into_inner()
    }

    /// Air temperature in °C.
    pub fn temperature(&self) -> f64 {
        self.temperature.into_inner()
    }

    /// `ρ·cos φ′` in Earth equatorial radii.
    pub fn rho_cos_phi(&self) -> f64 {
        self.rho_cos_phi.into_inner()
    }

    /// `ρ·sin φ′` in Earth equatorial radii.
    pub fn rho_sin_phi(&self) -> f64 {
        self.rho_sin_phi.into_inner()
    }
}

//! # Comets
//!
//! Heliocentric positions from perihelion-based elements. A periodic orbit (`e < 1`) goes
//! through the mean anomaly and Kepler's equation; a parabolic one (`e ≥ 1`) through Barker's
//! equation. The position is referred to the J2000.0 ecliptic, precessed to the equinox of
//! date and then reduced exactly like a planet, except that a comet has no modelled size,
//! phase or magnitude.

use log::{debug, warn};

use crate::angle::mod360;
use crate::constants::{
    AstronomicalUnit, Degree, JulianDay, DAYS_PER_TROPICAL_YEAR, LIGHT_TIME_DAYS_PER_AU,
    PARABOLIC_MOTION_FACTOR, RADEG,
};
use crate::earth_orientation::precess_ecliptic;
use crate::kepler::{solve_barker, solve_kepler};
use crate::orbit_type::OrbitalParameters;
use crate::theories::vsop87::HeliocentricPosition;
use crate::time_frame::TimeFrameContext;
use crate::visibility_errors::VisibilityError;

use super::horizon::{extinction_above_horizon, rise_set, topocentric_reduction};
use super::solar_system::{horizontal_parallax, reduce_heliocentric, sin_parallax};
use super::{Appearance, BodyKind, CelestialBody, OrbitKind, SolarSystemState};

/// A comet ready to be followed.
///
/// Wraps validated [`OrbitalParameters`] with the quantities derived once from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Comet {
    parameters: OrbitalParameters,
    perihelion_jde: JulianDay,
    kind: OrbitKind,
}

impl Comet {
    pub fn new(parameters: OrbitalParameters) -> Self {
        Comet {
            perihelion_jde: parameters.perihelion_jde(),
            kind: parameters.orbit_kind(),
            parameters,
        }
    }

    pub fn name(&self) -> &str {
        self.parameters.name()
    }

    pub fn kind(&self) -> OrbitKind {
        self.kind
    }

    pub fn parameters(&self) -> &OrbitalParameters {
        &self.parameters
    }

    pub fn perihelion_jde(&self) -> JulianDay {
        self.perihelion_jde
    }

    /// Orbital period in years, `None` for a parabolic orbit.
    pub fn period(&self) -> Option<f64> {
        self.parameters.period()
    }

    /// Semi-major axis in AU, `None` for a parabolic orbit.
    pub fn semi_major_axis(&self) -> Option<AstronomicalUnit> {
        self.parameters.semi_major_axis()
    }

    /// Mean anomaly at `jde` in degrees, `[0, 360)`; `None` for a parabolic orbit.
    pub fn mean_anomaly(&self, jde: JulianDay) -> Option<Degree> {
        let days = jde - self.perihelion_jde;
        self.period()
            .map(|period| mod360(360.0 / DAYS_PER_TROPICAL_YEAR * days / period))
    }

    /// True anomaly (degrees) and Sun–comet distance (AU) at `jde`.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::KeplerNoConvergence`] or [`VisibilityError::BarkerNoConvergence`].
    pub fn true_anomaly_and_radius(
        &self,
        jde: JulianDay,
    ) -> Result<(Degree, AstronomicalUnit), VisibilityError> {
        let q = self.parameters.perihelion_distance();
        let e = self.parameters.eccentricity();

        match self.mean_anomaly(jde) {
            Some(mean_anomaly) => {
                let eccentric_anomaly = solve_kepler(mean_anomaly, e)?;
                let nu = 2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (eccentric_anomaly / 2.0).tan())
                    .atan();
                let radius = q / (1.0 - e) * (1.0 - e * e) / (1.0 + e * nu.cos());
                Ok((nu / RADEG, radius))
            }
            None => {
                let days = jde - self.perihelion_jde;
                let s = solve_barker(PARABOLIC_MOTION_FACTOR * days / (q * q.sqrt()))?;
                Ok((2.0 * s.atan() / RADEG, q * (1.0 + s * s)))
            }
        }
    }

    /// Heliocentric ecliptic position at `jde`, referred to the ecliptic and equinox J2000.0.
    ///
    /// Arguments
    /// -----------------
    /// * `jde`: Julian Ephemeris Day, already corrected for light time if needed.
    ///
    /// Return
    /// ----------
    /// * `(l, b, r)` with `b = asin(sin u sin i)` and `l = atan2(sin u cos i, cos u) + Ω`,
    ///   `u = ν + ω` being the argument of latitude.
    ///
    /// Errors
    /// ----------
    /// * See [`Comet::true_anomaly_and_radius`].
    pub fn heliocentric_position(
        &self,
        jde: JulianDay,
    ) -> Result<HeliocentricPosition, VisibilityError> {
        let (nu, radius) = self.true_anomaly_and_radius(jde)?;
        let u = (nu + self.parameters.perihelion_argument()) * RADEG;
        let i = self.parameters.inclination() * RADEG;

        let latitude = (u.sin() * i.sin()).clamp(-1.0, 1.0).asin() / RADEG;
        let longitude = mod360(
            (u.sin() * i.cos()).atan2(u.cos()) / RADEG + self.parameters.ascending_node_longitude(),
        );

        Ok(HeliocentricPosition {
            longitude,
            latitude,
            radius,
        })
    }

    /// Non-iterative computation of the comet.
    ///
    /// Arguments
    /// -----------------
    /// * `ctx`: observer and instant.
    /// * `sun`: the Sun's state at `ctx`.
    /// * `alternate`: use the second UT solution near 0h for the rise/set times.
    ///
    /// Return
    /// ----------
    /// * The comet's record. Outside the validity window of the elements a warning is
    ///   logged and the position is still computed.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::KeplerNoConvergence`], [`VisibilityError::BarkerNoConvergence`] or
    ///   [`VisibilityError::EarthDistanceNoConvergence`].
    pub fn compute(
        &self,
        ctx: &TimeFrameContext,
        sun: &SolarSystemState,
        alternate: bool,
    ) -> Result<CelestialBody, VisibilityError> {
        let jde = ctx.jde();
        if !self.parameters.is_valid_at(jde) {
            warn!(
                "{}: JDE {jde:.3} is more than {} days away from perihelion {:.3}",
                self.name(),
                self.parameters.validity_days(),
                self.perihelion_jde
            );
        }

        let (state, geocentric) = reduce_heliocentric(ctx, sun, |distance| {
            let j2000 = self.heliocentric_position(jde - LIGHT_TIME_DAYS_PER_AU * distance)?;
            let (longitude, latitude) = precess_ecliptic(j2000.longitude, j2000.latitude, jde);
            Ok(HeliocentricPosition {
                longitude,
                latitude,
                radius: j2000.radius,
            })
        })?;

        let distance = state.earth_distance;
        let reduction = topocentric_reduction(&geocentric, sin_parallax(distance), ctx);
        let altitude = reduction.topocentric_horizontal.altitude.value();
        let rise_set = rise_set(&geocentric, horizontal_parallax(distance), 0.0, ctx, alternate);

        debug!(
            "{}: r = {:.6} AU, Δ = {distance:.6} AU, α = {}, δ = {}",
            self.name(),
            state.heliocentric.radius,
            geocentric.right_ascension,
            geocentric.declination
        );

        Ok(CelestialBody {
            name: self.name().to_string(),
            kind: BodyKind::Comet(self.kind),
            geocentric,
            topocentric: reduction.topocentric,
            geocentric_horizontal: reduction.geocentric_horizontal,
            topocentric_horizontal: reduction.topocentric_horizontal,
            deltas: reduction.deltas,
            rise_set,
            solar_system: Some(state),
            appearance: Appearance {
                phase: None,
                magnitude: None,
                extinction: extinction_above_horizon(altitude),
                apparent_size: 0.0,
                distance: Some(distance),
            },
        })
    }
}

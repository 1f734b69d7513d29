//! # Celestial bodies
//!
//! Computation records and per-kind pipelines for every body the crate can observe.
//!
//! ## Overview
//!
//! A body is computed for one [`TimeFrameContext`] by a kind-specific pipeline which fills a
//! [`CelestialBody`] record:
//!
//! | Kind                | Position source                     | Module          |
//! |---------------------|-------------------------------------|-----------------|
//! | [`BodyKind::Sun`]    | VSOP87D Earth series                | [`sun`]         |
//! | [`BodyKind::Planet`] | VSOP87D planet series               | [`planet`]      |
//! | [`BodyKind::Moon`]   | ELP2000-82B truncated series        | [`moon`]        |
//! | [`BodyKind::Comet`]  | Kepler or Barker equation           | [`comet`]       |
//! | [`BodyKind::DeepSky`]| J2000 catalog position              | [`deep_sky`]    |
//!
//! Everything downstream of the geocentric apparent position (horizon, refraction, parallax,
//! rise/set chain) lives in [`horizon`]; the heliocentric → geocentric reduction common to
//! planets and comets lives in [`solar_system`].
//!
//! [`Target`] is the entry point used by callers and by the iterative rise/set solver: it owns
//! whatever a kind needs (orbit, catalog entry) and recomputes a fresh Sun before each run.
//!
//! ## See also
//! ------------
//! * [`crate::rise_set::solve_rise_set`] – Iterative rise/set refinement.
//! * [`crate::display`] – Tabular report of computed bodies.

pub mod comet;
pub mod deep_sky;
pub mod horizon;
pub mod moon;
pub mod planet;
pub mod solar_system;
pub mod sun;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angle::{Angle, AngleDomain};
use crate::catalog::DeepSkyCatalogEntry;
use crate::constants::{ArcSec, AstronomicalUnit, Degree, Hour, ALWAYS_INVISIBLE, ALWAYS_VISIBLE};
use crate::theories::vsop87::{HeliocentricPosition, SeriesBody};
use crate::time::LocalTime;
use crate::time_frame::TimeFrameContext;
use crate::visibility_errors::VisibilityError;

use self::comet::Comet;

/// The seven planets covered by VSOP87D, Earth excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetKind {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl PlanetKind {
    pub const ALL: [PlanetKind; 7] = [
        PlanetKind::Mercury,
        PlanetKind::Venus,
        PlanetKind::Mars,
        PlanetKind::Jupiter,
        PlanetKind::Saturn,
        PlanetKind::Uranus,
        PlanetKind::Neptune,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlanetKind::Mercury => "Mercury",
            PlanetKind::Venus => "Venus",
            PlanetKind::Mars => "Mars",
            PlanetKind::Jupiter => "Jupiter",
            PlanetKind::Saturn => "Saturn",
            PlanetKind::Uranus => "Uranus",
            PlanetKind::Neptune => "Neptune",
        }
    }

    pub fn series(self) -> SeriesBody {
        match self {
            PlanetKind::Mercury => SeriesBody::Mercury,
            PlanetKind::Venus => SeriesBody::Venus,
            PlanetKind::Mars => SeriesBody::Mars,
            PlanetKind::Jupiter => SeriesBody::Jupiter,
            PlanetKind::Saturn => SeriesBody::Saturn,
            PlanetKind::Uranus => SeriesBody::Uranus,
            PlanetKind::Neptune => SeriesBody::Neptune,
        }
    }

    /// Apparent equatorial diameter at 1 AU, arcseconds.
    pub fn diameter_at_1au(self) -> ArcSec {
        match self {
            PlanetKind::Mercury => 6.72,
            PlanetKind::Venus => 16.82,
            PlanetKind::Mars => 9.36,
            PlanetKind::Jupiter => 196.88,
            PlanetKind::Saturn => 165.40,
            PlanetKind::Uranus => 70.04,
            PlanetKind::Neptune => 67.00,
        }
    }

    /// Visual magnitude from the Sun and Earth distances and the phase angle.
    ///
    /// Arguments
    /// ---------
    /// * `sun_distance`: heliocentric distance r, AU.
    /// * `earth_distance`: geocentric distance Δ, AU.
    /// * `phase_angle`: phase angle i, degrees.
    ///
    /// Return
    /// ----------
    /// * `V0 + 5 log10(rΔ)` plus the planet's phase-angle polynomial.
    pub fn magnitude(
        self,
        sun_distance: AstronomicalUnit,
        earth_distance: AstronomicalUnit,
        phase_angle: Degree,
    ) -> f64 {
        let i = phase_angle;
        let distance_term = 5.0 * (sun_distance * earth_distance).log10();
        let phase_term = match self {
            PlanetKind::Mercury => -0.42 + 0.0380 * i - 0.000273 * i * i + 0.000002 * i * i * i,
            PlanetKind::Venus => -4.40 + 0.0009 * i + 0.000239 * i * i - 0.00000065 * i * i * i,
            PlanetKind::Mars => -1.52 + 0.016 * i,
            PlanetKind::Jupiter => -9.40 + 0.005 * i,
            PlanetKind::Saturn => -8.88 + 0.044 * i,
            PlanetKind::Uranus => -7.19,
            PlanetKind::Neptune => -6.87,
        };
        distance_term + phase_term
    }
}

impl fmt::Display for PlanetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanetKind {
    type Err = VisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanetKind::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VisibilityError::UnknownBody(s.to_string()))
    }
}

/// Orbit family of a comet, decided by its eccentricity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitKind {
    /// `e < 1`
    Periodic,
    /// `e ≥ 1`, treated with the parabolic (Barker) solution
    Parabolic,
}

impl OrbitKind {
    pub fn from_eccentricity(eccentricity: f64) -> Self {
        if eccentricity < 1.0 {
            OrbitKind::Periodic
        } else {
            OrbitKind::Parabolic
        }
    }
}

/// Kind tag of a computed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Sun,
    Planet(PlanetKind),
    Moon,
    Comet(OrbitKind),
    DeepSky,
}

/// Right ascension (`[0, 24)` h) and declination (`[-90, 90]`°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoordinates {
    pub right_ascension: Angle,
    pub declination: Angle,
}

impl EquatorialCoordinates {
    /// Build from decimal hours and degrees, both normalized into their domains.
    pub fn new(right_ascension: Hour, declination: Degree) -> Self {
        EquatorialCoordinates {
            right_ascension: Angle::new(right_ascension, AngleDomain::Hours24),
            declination: Angle::new(declination, AngleDomain::Degrees90),
        }
    }
}

/// Altitude (`[-90, 90]`°) and azimuth from North through East (`[0, 360)`°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoordinates {
    pub altitude: Angle,
    pub azimuth: Angle,
}

impl HorizontalCoordinates {
    pub fn new(altitude: Degree, azimuth: Degree) -> Self {
        HorizontalCoordinates {
            altitude: Angle::new(altitude, AngleDomain::Degrees90),
            azimuth: Angle::new(azimuth, AngleDomain::Degrees360),
        }
    }
}

/// Corrections added to the geocentric position to obtain the topocentric one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EquatorialDeltas {
    /// Refraction shift in right ascension, hours
    pub refraction_ra: Hour,
    /// Refraction shift in declination, degrees
    pub refraction_dec: Degree,
    /// Parallax shift in right ascension, hours
    pub parallax_ra: Hour,
    /// Parallax shift in declination, degrees
    pub parallax_dec: Degree,
}

/// One horizon crossing (rise or set).
///
/// When the body never crosses the horizon every numeric field holds [`ALWAYS_VISIBLE`] or
/// [`ALWAYS_INVISIBLE`] and `local_time` is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HorizonEvent {
    /// Local true sidereal time, hours
    pub local_sidereal_time: Hour,
    /// Greenwich true sidereal time, hours
    pub greenwich_sidereal_time: Hour,
    /// Universal time, hours
    pub universal_time: Hour,
    /// Azimuth at the crossing, degrees
    pub azimuth: Degree,
    /// Local civil clock time, rounded to the minute
    pub local_time: Option<LocalTime>,
}

impl HorizonEvent {
    fn sentinel(value: f64) -> Self {
        HorizonEvent {
            local_sidereal_time: value,
            greenwich_sidereal_time: value,
            universal_time: value,
            azimuth: value,
            local_time: None,
        }
    }

    pub fn always_visible() -> Self {
        Self::sentinel(ALWAYS_VISIBLE)
    }

    pub fn always_invisible() -> Self {
        Self::sentinel(ALWAYS_INVISIBLE)
    }

    pub fn is_always_visible(&self) -> bool {
        self.local_sidereal_time == ALWAYS_VISIBLE
    }

    pub fn is_always_invisible(&self) -> bool {
        self.local_sidereal_time == ALWAYS_INVISIBLE
    }

    pub fn is_sentinel(&self) -> bool {
        self.is_always_visible() || self.is_always_invisible()
    }
}

/// Rise and set of a body on the requested date.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiseSet {
    pub rise: HorizonEvent,
    pub set: HorizonEvent,
}

impl RiseSet {
    pub fn always_visible() -> Self {
        RiseSet {
            rise: HorizonEvent::always_visible(),
            set: HorizonEvent::always_visible(),
        }
    }

    pub fn always_invisible() -> Self {
        RiseSet {
            rise: HorizonEvent::always_invisible(),
            set: HorizonEvent::always_invisible(),
        }
    }
}

/// Heliocentric and geocentric ecliptic state of a solar-system body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSystemState {
    /// Heliocentric position at the light-time corrected epoch
    pub heliocentric: HeliocentricPosition,
    /// Geocentric geometric ecliptic longitude, degrees
    pub geometric_longitude: Degree,
    /// Geocentric geometric ecliptic latitude, degrees
    pub geometric_latitude: Degree,
    /// Apparent ecliptic longitude (aberration and nutation applied), degrees
    pub apparent_longitude: Degree,
    /// Apparent ecliptic latitude, degrees
    pub apparent_latitude: Degree,
    /// Distance to the Earth: AU, or km for the Moon
    pub earth_distance: f64,
}

/// Photometric and geometric appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Illuminated fraction of the disk, `None` when not applicable
    pub phase: Option<f64>,
    /// Visual magnitude, `None` when not applicable
    pub magnitude: Option<f64>,
    /// Atmospheric extinction in magnitudes
    pub extinction: f64,
    /// Apparent diameter, degrees
    pub apparent_size: Degree,
    /// Distance to the Earth: km for the Moon, AU otherwise
    pub distance: Option<f64>,
}

/// The computation record of one body at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,
    pub geocentric: EquatorialCoordinates,
    pub topocentric: EquatorialCoordinates,
    pub geocentric_horizontal: HorizontalCoordinates,
    pub topocentric_horizontal: HorizontalCoordinates,
    pub deltas: EquatorialDeltas,
    pub rise_set: RiseSet,
    pub solar_system: Option<SolarSystemState>,
    pub appearance: Appearance,
}

impl CelestialBody {
    /// `true` when the topocentric altitude is strictly positive.
    pub fn is_above_horizon(&self) -> bool {
        self.topocentric_horizontal.altitude.value() > 0.0
    }

    /// Magnitude dimmed by the atmosphere, extinction only counted above the horizon.
    pub fn apparent_magnitude_with_extinction(&self) -> Option<f64> {
        let magnitude = self.appearance.magnitude?;
        if self.is_above_horizon() {
            Some(magnitude + self.appearance.extinction)
        } else {
            Some(magnitude)
        }
    }
}

/// A body to observe, with whatever its pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Sun,
    Moon,
    Planet(PlanetKind),
    Comet(Comet),
    DeepSky(DeepSkyCatalogEntry),
}

impl Target {
    pub fn name(&self) -> String {
        match self {
            Target::Sun => "Sun".to_string(),
            Target::Moon => "Moon".to_string(),
            Target::Planet(kind) => kind.name().to_string(),
            Target::Comet(comet) => comet.name().to_string(),
            Target::DeepSky(entry) => entry.name.clone(),
        }
    }

    /// Run the non-iterative pipeline of the body at `ctx`.
    ///
    /// Arguments
    /// ---------
    /// * `ctx`: observer and instant.
    /// * `alternate`: use the second UT solution near 0h for the rise/set times.
    ///
    /// Return
    /// ----------
    /// * The filled [`CelestialBody`].
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::EarthDistanceNoConvergence`], [`VisibilityError::KeplerNoConvergence`]
    ///   or [`VisibilityError::BarkerNoConvergence`] when a solver is exhausted.
    pub fn compute(
        &self,
        ctx: &TimeFrameContext,
        alternate: bool,
    ) -> Result<CelestialBody, VisibilityError> {
        let sun = sun::solar_state(ctx);
        match self {
            Target::Sun => Ok(sun::compute_sun(ctx, &sun, alternate)),
            Target::Moon => Ok(moon::compute_moon(ctx, &sun, alternate)),
            Target::Planet(kind) => planet::compute_planet(*kind, ctx, &sun, alternate),
            Target::Comet(comet) => comet.compute(ctx, &sun, alternate),
            Target::DeepSky(entry) => {
                Ok(deep_sky::compute_deep_sky(entry, ctx, &sun, alternate))
            }
        }
    }
}

impl FromStr for Target {
    type Err = VisibilityError;

    /// `"sun"`, `"moon"`, a planet name or a built-in catalog object, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("sun") {
            return Ok(Target::Sun);
        }
        if name.eq_ignore_ascii_case("moon") {
            return Ok(Target::Moon);
        }
        if let Ok(kind) = name.parse::<PlanetKind>() {
            return Ok(Target::Planet(kind));
        }
        crate::catalog::find(name)
            .map(Target::DeepSky)
            .ok_or_else(|| VisibilityError::UnknownBody(s.to_string()))
    }
}

#[cfg(test)]
mod bodies_test {
    use super::*;

    #[test]
    fn test_planet_from_str() {
        assert_eq!("jupiter".parse::<PlanetKind>().unwrap(), PlanetKind::Jupiter);
        assert_eq!(" Venus ".parse::<PlanetKind>().unwrap(), PlanetKind::Venus);
        assert_eq!(
            "pluto".parse::<PlanetKind>(),
            Err(VisibilityError::UnknownBody("pluto".into()))
        );
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("SUN".parse::<Target>().unwrap(), Target::Sun);
        assert_eq!("moon".parse::<Target>().unwrap(), Target::Moon);
        assert_eq!(
            "saturn".parse::<Target>().unwrap(),
            Target::Planet(PlanetKind::Saturn)
        );
        assert!(matches!("vega".parse::<Target>(), Ok(Target::DeepSky(_))));
        assert!("vulcan".parse::<Target>().is_err());
    }

    #[test]
    fn test_orbit_kind_from_eccentricity() {
        assert_eq!(OrbitKind::from_eccentricity(0.99), OrbitKind::Periodic);
        assert_eq!(OrbitKind::from_eccentricity(1.0), OrbitKind::Parabolic);
        assert_eq!(OrbitKind::from_eccentricity(1.2), OrbitKind::Parabolic);
    }

    #[test]
    fn test_sentinel_events() {
        let visible = RiseSet::always_visible();
        assert!(visible.rise.is_always_visible() && visible.set.is_always_visible());
        assert_eq!(visible.rise.azimuth, ALWAYS_VISIBLE);
        assert!(visible.rise.local_time.is_none());

        let invisible = HorizonEvent::always_invisible();
        assert!(invisible.is_sentinel());
        assert!(!HorizonEvent::default().is_sentinel());
    }

    #[test]
    fn test_planet_magnitude_at_unit_distances() {
        // r = Δ = 1 AU, i = 0: only V0 remains
        assert_eq!(PlanetKind::Uranus.magnitude(1.0, 1.0, 0.0), -7.19);
        let jupiter = PlanetKind::Jupiter.magnitude(5.2, 4.2, 10.0);
        assert!((jupiter - (-9.40 + 0.05 + 5.0 * (5.2f64 * 4.2).log10())).abs() < 1e-12);
    }
}

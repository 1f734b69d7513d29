use std::fmt;

use crate::bodies::OrbitKind;
use crate::constants::{
    AstronomicalUnit, Degree, JulianDay, AU_KM, DPI, GM_SUN_KM3_S2, SECONDS_PER_DAY,
    SECONDS_PER_YEAR,
};
use crate::time::{julian_day, resolve_delta_t};
use crate::visibility_errors::VisibilityError;

/// Default validity window of an element set around its perihelion, days.
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;

/// # Cometary orbital parameters
///
/// Perihelion-based elements of a comet, referred to the ecliptic and equinox J2000.0.
///
/// Units & conventions
/// --------------------
/// - Perihelion distance in **AU**; angles in **degrees**.
/// - The perihelion passage is a calendar date; ΔT, resolved against the perihelion year, is
///   added when converting it to a Julian Ephemeris Day.
/// - `e < 1` gives a periodic orbit, `e ≥ 1` a parabolic one.
///
/// See also
/// ------------
/// * [`OrbitalParameters::new`] – Validated construction.
/// * [`crate::bodies::comet::Comet`] – Position of the comet at an instant.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalParameters {
    name: String,
    perihelion_distance: AstronomicalUnit,
    eccentricity: f64,
    inclination: Degree,
    perihelion_argument: Degree,
    ascending_node_longitude: Degree,
    perihelion_year: i32,
    perihelion_month: u32,
    perihelion_day: f64,
    delta_t: f64,
    validity_days: u32,
}

fn out_of_range(what: &str, value: impl fmt::Display, range: &str) -> VisibilityError {
    VisibilityError::InvalidOrbitalParameter(format!("{what} = {value} outside {range}"))
}

impl OrbitalParameters {
    /// Build and validate a set of cometary elements.
    ///
    /// Arguments
    /// -----------------
    /// * `name` – Designation of the comet.
    /// * `perihelion_distance` – `q` in AU, `> 0`.
    /// * `eccentricity` – `e` in `[0, 2)`.
    /// * `inclination` – `i` in degrees, `[-90, 90]`.
    /// * `perihelion_argument` – `ω` in degrees, `[0, 360)`.
    /// * `ascending_node_longitude` – `Ω` in degrees, `[0, 360)`.
    /// * `perihelion_date` – `(year, month, fractional day)` of the perihelion passage, with
    ///   `year > 0`, `month` in `1..=12` and the day in `[0, 32)`.
    /// * `delta_t` – Optional TT − UT in seconds at the perihelion date.
    /// * `validity_days` – Half-width of the validity window around perihelion, `None` for
    ///   365 days.
    ///
    /// Return
    /// ----------
    /// * The validated elements.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::InvalidOrbitalParameter`] naming the first offending field.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        perihelion_distance: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        perihelion_argument: Degree,
        ascending_node_longitude: Degree,
        perihelion_date: (i32, u32, f64),
        delta_t: Option<f64>,
        validity_days: Option<u32>,
    ) -> Result<Self, VisibilityError> {
        let (year, month, day) = perihelion_date;

        if perihelion_distance.is_nan() || perihelion_distance <= 0.0 {
            return Err(out_of_range("perihelion distance", perihelion_distance, "(0, ∞) AU"));
        }
        if !(0.0..2.0).contains(&eccentricity) {
            return Err(out_of_range("eccentricity", eccentricity, "[0, 2)"));
        }
        if !(-90.0..=90.0).contains(&inclination) {
            return Err(out_of_range("inclination", inclination, "[-90°, 90°]"));
        }
        if !(0.0..360.0).contains(&perihelion_argument) {
            return Err(out_of_range("argument of perihelion", perihelion_argument, "[0°, 360°)"));
        }
        if !(0.0..360.0).contains(&ascending_node_longitude) {
            return Err(out_of_range(
                "longitude of the ascending node",
                ascending_node_longitude,
                "[0°, 360°)",
            ));
        }
        if year <= 0 {
            return Err(out_of_range("perihelion year", year, "[1, ∞)"));
        }
        if !(1..=12).contains(&month) {
            return Err(out_of_range("perihelion month", month, "[1, 12]"));
        }
        if !(0.0..32.0).contains(&day) {
            return Err(out_of_range("perihelion day", day, "[0, 32)"));
        }

        Ok(OrbitalParameters {
            name: name.into(),
            perihelion_distance,
            eccentricity,
            inclination,
            perihelion_argument,
            ascending_node_longitude,
            perihelion_year: year,
            perihelion_month: month,
            perihelion_day: day,
            delta_t: resolve_delta_t(year, delta_t),
            validity_days: validity_days.unwrap_or(DEFAULT_VALIDITY_DAYS),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn perihelion_distance(&self) -> AstronomicalUnit {
        self.perihelion_distance
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> Degree {
        self.inclination
    }

    pub fn perihelion_argument(&self) -> Degree {
        self.perihelion_argument
    }

    pub fn ascending_node_longitude(&self) -> Degree {
        self.ascending_node_longitude
    }

    /// `(year, month, fractional day)` of the perihelion passage.
    pub fn perihelion_date(&self) -> (i32, u32, f64) {
        (self.perihelion_year, self.perihelion_month, self.perihelion_day)
    }

    /// ΔT resolved against the perihelion year, seconds.
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    pub fn validity_days(&self) -> u32 {
        self.validity_days
    }

    pub fn orbit_kind(&self) -> OrbitKind {
        OrbitKind::from_eccentricity(self.eccentricity)
    }

    /// Julian Ephemeris Day of the perihelion passage.
    pub fn perihelion_jde(&self) -> JulianDay {
        julian_day(self.perihelion_year, self.perihelion_month, self.perihelion_day)
            + self.delta_t / SECONDS_PER_DAY
    }

    /// Semi-major axis `q / (1 − e)` in AU, `None` for a parabolic orbit.
    pub fn semi_major_axis(&self) -> Option<AstronomicalUnit> {
        match self.orbit_kind() {
            OrbitKind::Periodic => Some(self.perihelion_distance / (1.0 - self.eccentricity)),
            OrbitKind::Parabolic => None,
        }
    }

    /// Orbital period in years from Kepler's third law, `None` for a parabolic orbit.
    ///
    /// `P = 2π a^1.5 / √GM☉` with `a` in km and GM☉ = 1.327e11 km³/s², converted with
    /// years of 31 556 925.3 s.
    pub fn period(&self) -> Option<f64> {
        self.semi_major_axis().map(|a| {
            let a_km = a * AU_KM;
            DPI * a_km.powf(1.5) / GM_SUN_KM3_S2.sqrt() / SECONDS_PER_YEAR
        })
    }

    /// `true` when `jde` lies within the validity window around perihelion.
    pub fn is_valid_at(&self, jde: JulianDay) -> bool {
        (jde - self.perihelion_jde()).abs() <= f64::from(self.validity_days)
    }
}

impl fmt::Display for OrbitalParameters {
    /// Pretty-print the elements, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.perihelion_date();
        writeln!(f, "Orbital parameters of {} ({:?})", self.name, self.orbit_kind())?;
        writeln!(f, "------------------------------------------------")?;
        writeln!(
            f,
            "  q   (perihelion distance)     = {:.6} AU",
            self.perihelion_distance
        )?;
        writeln!(f, "  e   (eccentricity)            = {:.6}", self.eccentricity)?;
        writeln!(f, "  i   (inclination)             = {:.6}°", self.inclination)?;
        writeln!(
            f,
            "  ω   (argument of perihelion)  = {:.6}°",
            self.perihelion_argument
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)       = {:.6}°",
            self.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  T   (perihelion passage)      = {year:04}-{month:02}-{day:09.6} (ΔT = {:.1} s)",
            self.delta_t
        )?;
        if let Some(period) = self.period() {
            writeln!(f, "  P   (period)                  = {period:.3} yr")?;
        }
        Ok(())
    }
}

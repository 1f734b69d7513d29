//! # Observation requests
//!
//! A JSON description of one run: where, when, and what to look at.
//!
//! ```json
//! {
//!   "site": { "name": "Paris", "longitude": [2, 20, 55.0], "latitude": [48, 51, 12.0] },
//!   "date": "2024-01-01",
//!   "time": "12:00",
//!   "zone": 1,
//!   "bodies": ["sun", "moon", "jupiter", "vega"],
//!   "comets": [{
//!     "name": "2P/Encke", "perihelion_distance": 0.3393, "eccentricity": 0.8471,
//!     "inclination": 11.35, "perihelion_argument": 187.1,
//!     "ascending_node_longitude": 334.2, "perihelion_date": [2023, 10, 22.6]
//!   }]
//! }
//! ```
//!
//! Everything but the site may be omitted: the date and time then come from the caller
//! (the binary uses the current UTC clock), the zone defaults to UTC+1, and an empty body
//! list means the Sun, the Moon and the seven planets.

use std::fs;

use camino::Utf8Path;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::bodies::comet::Comet;
use crate::bodies::{PlanetKind, Target};
use crate::catalog::DeepSkyCatalogEntry;
use crate::constants::Meter;
use crate::observers::ObserverPosition;
use crate::orbit_type::OrbitalParameters;
use crate::time::CivilDateTime;
use crate::time_frame::TimeFrameContext;
use crate::visibility_errors::VisibilityError;

/// Observing site, longitude east and latitude north as signed `(d, m, s)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub longitude: (i32, i32, f64),
    pub latitude: (i32, i32, f64),
    #[serde(default)]
    pub altitude: Meter,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// Elements of a comet, see [`OrbitalParameters::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CometConfig {
    pub name: String,
    pub perihelion_distance: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub perihelion_argument: f64,
    pub ascending_node_longitude: f64,
    pub perihelion_date: (i32, u32, f64),
    #[serde(default)]
    pub delta_t: Option<f64>,
    #[serde(default)]
    pub validity_days: Option<u32>,
}

/// A J2000.0 catalog position, see [`DeepSkyCatalogEntry::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepSkyConfig {
    pub name: String,
    #[serde(default)]
    pub catalog_name: String,
    pub right_ascension: (i32, i32, f64),
    pub declination: (i32, i32, f64),
    pub magnitude: f64,
    /// `(μα cos δ, μδ)` in mas/yr
    #[serde(default)]
    pub proper_motion: (f64, f64),
}

fn default_zone() -> i32 {
    1
}

/// One observation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRequest {
    pub site: SiteConfig,
    /// Local date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// Local time, `HH:MM` or `HH:MM:SS`
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default = "default_zone")]
    pub zone: i32,
    #[serde(default)]
    pub dst: i32,
    /// TT − UT in seconds
    #[serde(default)]
    pub delta_t: Option<f64>,
    /// `"sun"`, `"moon"`, planet names or built-in catalog names
    #[serde(default)]
    pub bodies: Vec<String>,
    #[serde(default)]
    pub comets: Vec<CometConfig>,
    #[serde(default)]
    pub deep_sky: Vec<DeepSkyConfig>,
    /// Refine rise and set times iteratively
    #[serde(default)]
    pub iterative: bool,
}

impl ObservationRequest {
    /// Parse a request from a JSON string.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::RequestParseError`] for malformed JSON or missing fields.
    pub fn from_json(json: &str) -> Result<Self, VisibilityError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a request file.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::IoError`] when the file cannot be read.
    /// * [`VisibilityError::RequestParseError`] for malformed JSON.
    pub fn from_path(path: &Utf8Path) -> Result<Self, VisibilityError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, VisibilityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated observing site.
    pub fn observer(&self) -> Result<ObserverPosition, VisibilityError> {
        let site = &self.site;
        ObserverPosition::new(
            site.name.clone(),
            site.longitude,
            site.latitude,
            site.altitude,
            site.pressure,
            site.temperature,
        )
    }

    /// Local civil instant of the request.
    ///
    /// Arguments
    /// -----------------
    /// * `fallback`: instant whose date and/or time fill the fields missing from the request.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::InvalidDate`] for a malformed or impossible date or time.
    pub fn local_datetime(
        &self,
        fallback: CivilDateTime,
    ) -> Result<CivilDateTime, VisibilityError> {
        let (year, month, day) = match &self.date {
            Some(date) => parse_date(date)?,
            None => (fallback.year, fallback.month, fallback.day),
        };
        let (hour, minute, second) = match &self.time {
            Some(time) => parse_time(time)?,
            None => (fallback.hour, fallback.minute, fallback.second),
        };
        CivilDateTime::new(year, month, day, hour, minute, second)
    }

    /// Build the time-frame context of the request.
    pub fn context(&self, fallback: CivilDateTime) -> Result<TimeFrameContext, VisibilityError> {
        Ok(TimeFrameContext::new(
            self.observer()?,
            self.local_datetime(fallback)?,
            self.zone,
            self.dst,
            self.delta_t,
        ))
    }

    /// Every body of the request: named bodies, then comets, then deep-sky entries.
    ///
    /// Return
    /// ----------
    /// * The targets, the Sun, the Moon and the planets when the request names none.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::UnknownBody`], [`VisibilityError::InvalidOrbitalParameter`] or
    ///   [`VisibilityError::AngleOutOfRange`] for the first invalid entry.
    pub fn targets(&self) -> Result<Vec<Target>, VisibilityError> {
        let named = self.bodies.iter().map(|name| name.parse::<Target>());

        let comets = self.comets.iter().map(|c| {
            OrbitalParameters::new(
                c.name.clone(),
                c.perihelion_distance,
                c.eccentricity,
                c.inclination,
                c.perihelion_argument,
                c.ascending_node_longitude,
                c.perihelion_date,
                c.delta_t,
                c.validity_days,
            )
            .map(|parameters| Target::Comet(Comet::new(parameters)))
        });

        let deep_sky = self.deep_sky.iter().map(|d| {
            DeepSkyCatalogEntry::new(
                d.name.clone(),
                d.catalog_name.clone(),
                d.right_ascension,
                d.declination,
                d.magnitude,
                d.proper_motion,
            )
            .map(Target::DeepSky)
        });

        let targets = named
            .chain(comets)
            .chain(deep_sky)
            .collect::<Result<Vec<_>, _>>()?;
        if targets.is_empty() {
            return Ok(default_targets());
        }
        Ok(targets)
    }
}

/// The Sun, the Moon and the seven planets.
pub fn default_targets() -> Vec<Target> {
    [Target::Sun, Target::Moon]
        .into_iter()
        .chain(PlanetKind::ALL.into_iter().map(Target::Planet))
        .collect()
}

fn invalid(what: &str, value: &str) -> VisibilityError {
    VisibilityError::InvalidDate(format!("{what} '{value}'"))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Result<(i32, u32, u32), VisibilityError> {
    let (year, month, day) = date
        .trim()
        .split('-')
        .collect_tuple()
        .ok_or_else(|| invalid("date", date))?;
    Ok((
        year.parse().map_err(|_| invalid("year", year))?,
        month.parse().map_err(|_| invalid("month", month))?,
        day.parse().map_err(|_| invalid("day", day))?,
    ))
}

/// Parse a `HH:MM` or `HH:MM:SS` time.
pub fn parse_time(time: &str) -> Result<(u32, u32, f64), VisibilityError> {
    let parts = time.trim().split(':').collect_vec();
    let (hour, minute, second) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid("time", time)),
    };
    Ok((
        hour.parse().map_err(|_| invalid("hour", hour))?,
        minute.parse().map_err(|_| invalid("minute", minute))?,
        second.parse().map_err(|_| invalid("second", second))?,
    ))
}

#[cfg(test)]
mod request_test {
    use super::*;

    const PARIS: &str = r#"{
        "site": { "name": "Paris", "longitude": [2, 20, 55.0], "latitude": [48, 51, 12.0] },
        "date": "2024-01-01",
        "time": "12:00",
        "bodies": ["Sun", "jupiter", "M31"],
        "comets": [{
            "name": "2P/Encke", "perihelion_distance": 0.3393, "eccentricity": 0.8471,
            "inclination": 11.35, "perihelion_argument": 187.1,
            "ascending_node_longitude": 334.2, "perihelion_date": [2023, 10, 22.6]
        }],
        "deep_sky": [{
            "name": "Albireo", "right_ascension": [19, 30, 43.3],
            "declination": [27, 57, 34.8], "magnitude": 3.1
        }]
    }"#;

    fn fallback() -> CivilDateTime {
        CivilDateTime::new(2000, 6, 15, 8, 30, 0.0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let request = ObservationRequest::from_json(PARIS).unwrap();
        assert_eq!(request.zone, 1);
        assert_eq!(request.dst, 0);
        assert_eq!(request.site.altitude, 0.0);
        assert!(request.site.pressure.is_none());
        assert!(!request.iterative);
        assert_eq!(request.deep_sky[0].proper_motion, (0.0, 0.0));
    }

    #[test]
    fn test_targets_in_order() {
        let request = ObservationRequest::from_json(PARIS).unwrap();
        let names = request.targets().unwrap().iter().map(Target::name).collect_vec();
        assert_eq!(names, ["Sun", "Jupiter", "Andromeda Galaxy", "2P/Encke", "Albireo"]);
    }

    #[test]
    fn test_empty_body_list() {
        let json = r#"{ "site": { "name": "x", "longitude": [0, 0, 0], "latitude": [1, 0, 0] } }"#;
        let request = ObservationRequest::from_json(json).unwrap();
        assert_eq!(request.targets().unwrap().len(), 9);
        // date and time come from the fallback
        assert_eq!(request.local_datetime(fallback()).unwrap(), fallback());
    }

    #[test]
    fn test_local_datetime() {
        let request = ObservationRequest::from_json(PARIS).unwrap();
        let local = request.local_datetime(fallback()).unwrap();
        assert_eq!(local, CivilDateTime::new(2024, 1, 1, 12, 0, 0.0).unwrap());
        assert_eq!(parse_time("21:15:30").unwrap(), (21, 15, 30.0));
        assert!(parse_time("21h15").is_err());
        assert!(parse_date("2024/01/01").is_err());
        assert!(matches!(parse_date("2024-xx-01"), Err(VisibilityError::InvalidDate(_))));
    }

    #[test]
    fn test_invalid_entries() {
        let mut request = ObservationRequest::from_json(PARIS).unwrap();
        request.bodies.push("pluto".into());
        assert_eq!(
            request.targets().unwrap_err(),
            VisibilityError::UnknownBody("pluto".into())
        );

        let mut request = ObservationRequest::from_json(PARIS).unwrap();
        request.comets[0].eccentricity = 2.5;
        assert!(matches!(
            request.targets(),
            Err(VisibilityError::InvalidOrbitalParameter(_))
        ));

        assert!(matches!(
            ObservationRequest::from_json("{ \"site\": 3 }"),
            Err(VisibilityError::RequestParseError(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let request = ObservationRequest::from_json(PARIS).unwrap();
        let again = ObservationRequest::from_json(&request.to_json().unwrap()).unwrap();
        assert_eq!(request, again);
    }
}

//! # Deep-sky catalog
//!
//! J2000.0 positions of stars and deep-sky objects, with their annual proper motion and
//! apparent magnitude. A handful of bright objects are built in and can be looked up by their
//! common or catalog name.
//!
//! ## Overview
//!
//! - [`DeepSkyCatalogEntry`] – Validated catalog position of an object.
//! - [`builtin`] – Every built-in object.
//! - [`find`] – Case-insensitive lookup among the built-in objects.
//!
//! Proper motions are in milliarcseconds per year; the motion in right ascension is the
//! great-circle rate `μα cos δ`.

use std::fmt;

use crate::angle::{Angle, AngleDomain};
use crate::visibility_errors::VisibilityError;

/// A J2000.0 catalog position.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepSkyCatalogEntry {
    /// Common name
    pub name: String,
    /// Designation in a catalog (Messier, Hipparcos…), may be empty
    pub catalog_name: String,
    pub right_ascension: Angle,
    pub declination: Angle,
    /// Annual proper motion in right ascension (`μα cos δ`), mas/yr
    pub proper_motion_ra: f64,
    /// Annual proper motion in declination, mas/yr
    pub proper_motion_dec: f64,
    pub magnitude: f64,
}

impl DeepSkyCatalogEntry {
    /// Build a catalog entry from sexagesimal J2000.0 coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `name`, `catalog_name`: common and catalog names.
    /// * `right_ascension`: `(h, m, s)`.
    /// * `declination`: `(d, m, s)`, sign on the outermost non-zero component.
    /// * `magnitude`: apparent visual magnitude.
    /// * `proper_motion`: `(μα cos δ, μδ)` in mas/yr.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::AngleOutOfRange`] when a component is out of range.
    pub fn new(
        name: impl Into<String>,
        catalog_name: impl Into<String>,
        right_ascension: (i32, i32, f64),
        declination: (i32, i32, f64),
        magnitude: f64,
        proper_motion: (f64, f64),
    ) -> Result<Self, VisibilityError> {
        let (h, m, s) = right_ascension;
        let (d, dm, ds) = declination;
        Ok(DeepSkyCatalogEntry {
            name: name.into(),
            catalog_name: catalog_name.into(),
            right_ascension: Angle::from_sexagesimal(h, m, s, AngleDomain::Hours24)?,
            declination: Angle::from_sexagesimal(d, dm, ds, AngleDomain::Degrees90)?,
            proper_motion_ra: proper_motion.0,
            proper_motion_dec: proper_motion.1,
            magnitude,
        })
    }

    /// `true` when `name` is the common or the catalog name, ignoring case and spaces.
    pub fn matches(&self, name: &str) -> bool {
        let key = squash(name);
        !key.is_empty() && (squash(&self.name) == key || squash(&self.catalog_name) == key)
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for DeepSkyCatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.catalog_name.is_empty() {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "{} ({})", self.name, self.catalog_name)?;
        }
        write!(
            f,
            " α = {}, δ = {}, m = {:.2}",
            self.right_ascension, self.declination, self.magnitude
        )
    }
}

type RawEntry = (&'static str, &'static str, (i32, i32, f64), (i32, i32, f64), f64, (f64, f64));

const BUILTIN: [RawEntry; 8] = [
    ("Andromeda Galaxy", "M31", (0, 42, 44.3), (41, 16, 9.0), 3.44, (0.0, 0.0)),
    ("Orion Nebula", "M42", (5, 35, 17.3), (-5, 23, 28.0), 4.0, (0.0, 0.0)),
    ("Pleiades", "M45", (3, 47, 24.0), (24, 7, 0.0), 1.6, (0.0, 0.0)),
    ("Hercules Cluster", "M13", (16, 41, 41.24), (36, 27, 35.5), 5.8, (0.0, 0.0)),
    ("Sirius", "HIP 32349", (6, 45, 8.917), (-16, 42, 58.02), -1.46, (-546.01, -1223.07)),
    ("Polaris", "HIP 11767", (2, 31, 49.09), (89, 15, 50.8), 1.98, (44.48, -11.85)),
    ("Vega", "HIP 91262", (18, 36, 56.336), (38, 47, 1.28), 0.03, (200.94, 286.23)),
    ("Betelgeuse", "HIP 27989", (5, 55, 10.305), (7, 24, 25.43), 0.5, (27.54, 11.30)),
];

/// Every built-in object.
pub fn builtin() -> Vec<DeepSkyCatalogEntry> {
    BUILTIN
        .iter()
        .filter_map(|&(name, catalog, ra, dec, magnitude, proper_motion)| {
            DeepSkyCatalogEntry::new(name, catalog, ra, dec, magnitude, proper_motion).ok()
        })
        .collect()
}

/// Look up a built-in object by common or catalog name.
pub fn find(name: &str) -> Option<DeepSkyCatalogEntry> {
    builtin().into_iter().find(|entry| entry.matches(name))
}

#[cfg(test)]
mod catalog_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builtin_entries_are_valid() {
        assert_eq!(builtin().len(), BUILTIN.len());
    }

    #[test]
    fn test_find_by_either_name() {
        let m31 = find("m 31").unwrap();
        assert_eq!(m31.name, "Andromeda Galaxy");
        assert_eq!(find("andromeda galaxy").unwrap(), m31);
        assert!(find("Proxima Centauri").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_signed_declination() {
        let orion = find("M42").unwrap();
        assert_abs_diff_eq!(orion.declination.value(), -(5.0 + 23.0 / 60.0 + 28.0 / 3600.0));
        let polaris = find("polaris").unwrap();
        assert!(polaris.declination.value() > 89.2);
        assert_abs_diff_eq!(
            find("vega").unwrap().right_ascension.value(),
            18.0 + 36.0 / 60.0 + 56.336 / 3600.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_component() {
        let err = DeepSkyCatalogEntry::new("x", "", (24, 0, 0.0), (0, 0, 0.0), 0.0, (0.0, 0.0));
        assert!(matches!(err, Err(VisibilityError::AngleOutOfRange { .. })));
        let err = DeepSkyCatalogEntry::new("x", "", (1, 0, 0.0), (91, 0, 0.0), 0.0, (0.0, 0.0));
        assert!(err.is_err());
    }
}

use thiserror::Error;

use crate::angle::AngleDomain;

#[derive(Error, Debug)]
pub enum VisibilityError {
    #[error("Angle component out of range for {domain:?}: {value}")]
    AngleOutOfRange { domain: AngleDomain, value: String },

    #[error("Invalid orbital parameter: {0}")]
    InvalidOrbitalParameter(String),

    #[error("Invalid civil date or time: {0}")]
    InvalidDate(String),

    #[error("Kepler's equation did not converge (M = {mean_anomaly}°, e = {eccentricity})")]
    KeplerNoConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
    },

    #[error("Barker's equation did not converge (W = {0})")]
    BarkerNoConvergence(f64),

    #[error("Light-time iteration on the Earth distance did not converge for {0}")]
    EarthDistanceNoConvergence(String),

    #[error("Unknown body name: {0}")]
    UnknownBody(String),

    #[error("NaN encountered in observer geometry")]
    NanValue(#[from] ordered_float::FloatIsNan),

    #[error("System clock unavailable: {0}")]
    ClockUnavailable(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to parse the observation request: {0}")]
    RequestParseError(#[from] serde_json::Error),
}

impl PartialEq for VisibilityError {
    fn eq(&self, other: &Self) -> bool {
        use VisibilityError::*;
        match (self, other) {
            (
                AngleOutOfRange {
                    domain: d1,
                    value: v1,
                },
                AngleOutOfRange {
                    domain: d2,
                    value: v2,
                },
            ) => d1 == d2 && v1 == v2,
            (InvalidOrbitalParameter(a), InvalidOrbitalParameter(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (
                KeplerNoConvergence {
                    mean_anomaly: m1,
                    eccentricity: e1,
                },
                KeplerNoConvergence {
                    mean_anomaly: m2,
                    eccentricity: e2,
                },
            ) => m1 == m2 && e1 == e2,
            (BarkerNoConvergence(a), BarkerNoConvergence(b)) => a == b,
            (EarthDistanceNoConvergence(a), EarthDistanceNoConvergence(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (ClockUnavailable(a), ClockUnavailable(b)) => a == b,

            // Foreign errors are not comparable: equal when the variant matches
            (NanValue(_), NanValue(_)) => true,
            (IoError(_), IoError(_)) => true,
            (RequestParseError(_), RequestParseError(_)) => true,

            _ => false,
        }
    }
}

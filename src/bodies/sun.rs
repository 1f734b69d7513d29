//! # Sun
//!
//! The Sun is the Earth seen from the other side: its geometric geocentric longitude is the
//! heliocentric longitude of the Earth plus 180° and its latitude is the opposite of the Earth's.
//! The apparent longitude adds nutation and the solar aberration `−20.4898″/R`.
//!
//! [`solar_state`] is also the input of every other body: it carries the Earth's heliocentric
//! position and the Sun's geometric longitude used by aberration, elongation and phase.

use crate::angle::mod360;
use crate::constants::{
    AstronomicalUnit, Degree, ARCSEC_TO_DEG, SOLAR_ABERRATION_ARCSEC, SUN_DIAMETER_1AU_ARCSEC,
};
use crate::theories::vsop87::{heliocentric_position, SeriesBody};
use crate::time_frame::TimeFrameContext;

use super::horizon::{extinction_above_horizon, rise_set, topocentric_reduction};
use super::solar_system::{ecliptic_to_equatorial, horizontal_parallax, sin_parallax};
use super::{Appearance, BodyKind, CelestialBody, SolarSystemState};

/// Apparent diameter of the Sun at `distance` AU, degrees.
pub fn apparent_diameter(distance: AstronomicalUnit) -> Degree {
    SUN_DIAMETER_1AU_ARCSEC * ARCSEC_TO_DEG / distance
}

/// Geometric and apparent ecliptic state of the Sun at the instant of `ctx`.
pub fn solar_state(ctx: &TimeFrameContext) -> SolarSystemState {
    let earth = heliocentric_position(SeriesBody::Earth, ctx.jde(), 0.0);
    let geometric_longitude = mod360(earth.longitude + 180.0);
    let geometric_latitude = -earth.latitude;
    let apparent_longitude = mod360(
        geometric_longitude + ctx.frame().nutation_longitude
            - SOLAR_ABERRATION_ARCSEC * ARCSEC_TO_DEG / earth.radius,
    );

    SolarSystemState {
        heliocentric: earth,
        geometric_longitude,
        geometric_latitude,
        apparent_longitude,
        apparent_latitude: geometric_latitude,
        earth_distance: earth.radius,
    }
}

/// Non-iterative computation of the Sun.
///
/// Arguments
/// ---------
/// * `ctx`: observer and instant.
/// * `state`: the Sun's state at `ctx`, from [`solar_state`].
/// * `alternate`: use the second UT solution near 0h for the rise/set times.
///
/// Return
/// ----------
/// * The Sun's record. Phase and magnitude are not defined for the Sun.
pub fn compute_sun(
    ctx: &TimeFrameContext,
    state: &SolarSystemState,
    alternate: bool,
) -> CelestialBody {
    let distance = state.earth_distance;
    let geocentric = ecliptic_to_equatorial(
        state.apparent_longitude,
        state.apparent_latitude,
        ctx.true_obliquity(),
    );
    let reduction = topocentric_reduction(&geocentric, sin_parallax(distance), ctx);
    let apparent_size = apparent_diameter(distance);
    let altitude = reduction.topocentric_horizontal.altitude.value();
    let rise_set = rise_set(
        &geocentric,
        horizontal_parallax(distance),
        apparent_size,
        ctx,
        alternate,
    );

    CelestialBody {
        name: "Sun".to_string(),
        kind: BodyKind::Sun,
        geocentric,
        topocentric: reduction.topocentric,
        geocentric_horizontal: reduction.geocentric_horizontal,
        topocentric_horizontal: reduction.topocentric_horizontal,
        deltas: reduction.deltas,
        rise_set,
        solar_system: Some(*state),
        appearance: Appearance {
            phase: None,
            magnitude: None,
            extinction: extinction_above_horizon(altitude),
            apparent_size,
            distance: Some(distance),
        },
    }
}

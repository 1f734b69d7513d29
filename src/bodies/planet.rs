//! # Planets
//!
//! Mercury to Neptune from the VSOP87D series. The heliocentric position is iterated on the
//! light-time corrected epoch, reduced to a geocentric apparent position and then to the
//! observer's site. The appearance (phase, magnitude, apparent size) follows from the
//! Sun–planet distance r, the Earth–planet distance Δ and the Sun–Earth distance R.

use log::debug;

use crate::constants::{AstronomicalUnit, Degree, ARCSEC_TO_DEG, RADEG, ZENITH_EXTINCTION_MAG};
use crate::theories::vsop87::heliocentric_position;
use crate::time_frame::TimeFrameContext;
use crate::visibility_errors::VisibilityError;

use super::horizon::{rise_set, topocentric_reduction};
use super::solar_system::{horizontal_parallax, reduce_heliocentric, sin_parallax};
use super::{Appearance, BodyKind, CelestialBody, PlanetKind, SolarSystemState};

/// Phase angle Sun–body–Earth in degrees, `acos((r² + Δ² − R²) / (2rΔ))`.
///
/// Arguments
/// ---------
/// * `sun_distance`: r, AU.
/// * `earth_distance`: Δ, AU.
/// * `earth_sun_distance`: R, AU.
pub fn phase_angle(
    sun_distance: AstronomicalUnit,
    earth_distance: AstronomicalUnit,
    earth_sun_distance: AstronomicalUnit,
) -> Degree {
    let (r, delta, big_r) = (sun_distance, earth_distance, earth_sun_distance);
    ((r * r + delta * delta - big_r * big_r) / (2.0 * r * delta))
        .clamp(-1.0, 1.0)
        .acos()
        / RADEG
}

/// Illuminated fraction of the disk for a phase angle in degrees.
pub fn illuminated_fraction(phase_angle: Degree) -> f64 {
    (1.0 + (phase_angle * RADEG).cos()) / 2.0
}

/// Non-iterative computation of a planet.
///
/// Arguments
/// ---------
/// * `kind`: which planet.
/// * `ctx`: observer and instant.
/// * `sun`: the Sun's state at `ctx`.
/// * `alternate`: use the second UT solution near 0h for the rise/set times.
///
/// Return
/// ----------
/// * The planet's record. The extinction is `0.2/cos z` whatever the altitude; use
///   [`CelestialBody::apparent_magnitude_with_extinction`] to apply it.
///
/// Errors
/// ----------
/// * [`VisibilityError::EarthDistanceNoConvergence`] when the light-time iteration fails.
pub fn compute_planet(
    kind: PlanetKind,
    ctx: &TimeFrameContext,
    sun: &SolarSystemState,
    alternate: bool,
) -> Result<CelestialBody, VisibilityError> {
    let jde = ctx.jde();
    let (state, geocentric) = reduce_heliocentric(ctx, sun, |distance| {
        Ok(heliocentric_position(kind.series(), jde, distance))
    })?;

    let distance = state.earth_distance;
    let reduction = topocentric_reduction(&geocentric, sin_parallax(distance), ctx);

    let i = phase_angle(state.heliocentric.radius, distance, sun.earth_distance);
    let apparent_size = kind.diameter_at_1au() * ARCSEC_TO_DEG / distance;
    let altitude = reduction.topocentric_horizontal.altitude.value();
    let appearance = Appearance {
        phase: Some(illuminated_fraction(i)),
        magnitude: Some(kind.magnitude(state.heliocentric.radius, distance, i)),
        extinction: ZENITH_EXTINCTION_MAG / ((90.0 - altitude) * RADEG).cos(),
        apparent_size,
        distance: Some(distance),
    };

    let rise_set = rise_set(
        &geocentric,
        horizontal_parallax(distance),
        apparent_size,
        ctx,
        alternate,
    );

    debug!(
        "{kind}: Δ = {distance:.6} AU, α = {}, δ = {}, h = {altitude:.4}°",
        geocentric.right_ascension, geocentric.declination
    );

    Ok(CelestialBody {
        name: kind.name().to_string(),
        kind: BodyKind::Planet(kind),
        geocentric,
        topocentric: reduction.topocentric,
        geocentric_horizontal: reduction.geocentric_horizontal,
        topocentric_horizontal: reduction.topocentric_horizontal,
        deltas: reduction.deltas,
        rise_set,
        solar_system: Some(state),
        appearance,
    })
}

#[cfg(test)]
mod planet_test {
    use super::*;
    use crate::bodies::sun::solar_state;
    use crate::observers::ObserverPosition;
    use crate::time::CivilDateTime;
    use approx::assert_abs_diff_eq;

    fn greenwich_at(local: CivilDateTime) -> TimeFrameContext {
        let observer =
            ObserverPosition::new("Greenwich", (0, 0, 0.0), (51, 28, 38.0), 0.0, None, None)
                .unwrap();
        TimeFrameContext::new(observer, local, 0, 0, Some(0.0))
    }

    #[test]
    fn test_venus_1992_december_20() {
        let ctx = greenwich_at(CivilDateTime::new(1992, 12, 20, 0, 0, 0.0).unwrap());
        let sun = solar_state(&ctx);
        let venus = compute_planet(PlanetKind::Venus, &ctx, &sun, false).unwrap();

        let state = venus.solar_system.unwrap();
        // light-time corrected distance, one step past the first geometric pass
        assert_abs_diff_eq!(state.earth_distance, 0.910947, epsilon = 1e-5);
        assert_abs_diff_eq!(
            venus.geocentric.right_ascension.value() * 15.0,
            316.172725,
            epsilon = 5e-3
        );
        assert_abs_diff_eq!(venus.geocentric.declination.value(), -18.888011, epsilon = 5e-3);

        assert_abs_diff_eq!(venus.appearance.phase.unwrap(), 0.6465, epsilon = 1e-3);
        assert_abs_diff_eq!(venus.appearance.magnitude.unwrap(), -4.217, epsilon = 0.02);
        assert_abs_diff_eq!(
            venus.appearance.apparent_size * 3600.0,
            16.82 / 0.910947,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_phase_angle_geometry() {
        // full phase at opposition, half phase at quadrature seen from the planet
        assert_abs_diff_eq!(phase_angle(5.0, 4.0, 1.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(phase_angle(1.0, 2f64.sqrt(), 1.0), 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(illuminated_fraction(0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(illuminated_fraction(90.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(illuminated_fraction(180.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_outer_planets_stay_nearly_full() {
        let ctx = greenwich_at(CivilDateTime::new(2024, 1, 1, 21, 0, 0.0).unwrap());
        let sun = solar_state(&ctx);
        let outer = [
            PlanetKind::Jupiter,
            PlanetKind::Saturn,
            PlanetKind::Uranus,
            PlanetKind::Neptune,
        ];
        for kind in outer {
            let body = compute_planet(kind, &ctx, &sun, false).unwrap();
            assert!(body.appearance.phase.unwrap() > 0.98, "{kind}");
            assert!(body.appearance.distance.unwrap() > 3.0, "{kind}");
        }
    }

    #[test]
    fn test_planet_extinction_follows_altitude() {
        let ctx = greenwich_at(CivilDateTime::new(2024, 1, 1, 21, 0, 0.0).unwrap());
        let sun = solar_state(&ctx);
        let jupiter = compute_planet(PlanetKind::Jupiter, &ctx, &sun, false).unwrap();
        let altitude = jupiter.topocentric_horizontal.altitude.value();
        assert_abs_diff_eq!(
            jupiter.appearance.extinction,
            0.2 / (altitude * RADEG).sin(),
            epsilon = 1e-9
        );
    }
}

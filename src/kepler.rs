//! # Kepler and Barker equation solvers
//!
//! Iterative solvers used by the comet pipeline to turn a time since perihelion into a
//! position on the orbit.
//!
//! ## Overview
//!
//! - [`solve_kepler`]: elliptic orbits, `E − e·sin E = M`, Newton–Raphson seeded at `E = M`.
//! - [`solve_barker`]: parabolic orbits, `s³ + 3s − W = 0`, fixed-point refinement seeded at
//!   `s = W/3`.
//!
//! Both loops are capped and report non-convergence through
//! [`VisibilityError`](crate::visibility_errors::VisibilityError).

use crate::constants::{Degree, Radian, RADEG};
use crate::visibility_errors::VisibilityError;

/// Maximum number of Newton iterations on Kepler's equation.
const KEPLER_MAX_ITERATIONS: usize = 100;

/// Residual below which Kepler's equation is considered solved (radians).
const KEPLER_TOLERANCE: f64 = 1e-7;

/// Maximum number of refinements on Barker's equation.
const BARKER_MAX_ITERATIONS: usize = 200;

/// Residual below which Barker's equation is considered solved.
const BARKER_TOLERANCE: f64 = 1e-10;

/// Solve Kepler's equation for the eccentric anomaly.
///
/// Newton–Raphson seeded at `E = M`, each iterate kept inside `[M − e, M + e]` so that
/// near-parabolic orbits close to perihelion do not overshoot.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in degrees.
/// * `eccentricity`: orbital eccentricity, `0 ≤ e < 1`.
///
/// Return
/// ----------
/// * The eccentric anomaly `E` in radians such that `|E − e·sin E − M| < 1e-7`.
///
/// Errors
/// ----------
/// * [`VisibilityError::KeplerNoConvergence`] after 100 iterations without reaching the tolerance.
pub fn solve_kepler(mean_anomaly: Degree, eccentricity: f64) -> Result<Radian, VisibilityError> {
    let m = mean_anomaly * RADEG;
    let mut e_anomaly = m;

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let residual = e_anomaly - eccentricity * e_anomaly.sin() - m;
        if residual.abs() < KEPLER_TOLERANCE {
            return Ok(e_anomaly);
        }
        e_anomaly -= residual / (1.0 - eccentricity * e_anomaly.cos());
        // the root always lies within [M − e, M + e]
        e_anomaly = e_anomaly.clamp(m - eccentricity, m + eccentricity);
    }

    Err(VisibilityError::KeplerNoConvergence {
        mean_anomaly,
        eccentricity,
    })
}

/// Solve Barker's cubic `s³ + 3s − W = 0` for a parabolic orbit.
///
/// The root is refined with `s ← (2s³ + W) / (3(s² + 1))`, which is Newton's step written for
/// this cubic.
///
/// Arguments
/// ---------
/// * `w`: Barker parameter `W = 0.03649116245·D / q^1.5` (D in days since perihelion).
///
/// Return
/// ----------
/// * `s = tan(ν/2)`, ν being the true anomaly.
///
/// Errors
/// ----------
/// * [`VisibilityError::BarkerNoConvergence`] when the residual stays above `1e-10`.
pub fn solve_barker(w: f64) -> Result<f64, VisibilityError> {
    let mut s = w / 3.0;

    for _ in 0..BARKER_MAX_ITERATIONS {
        let residual = s * s * s + 3.0 * s - w;
        if residual.abs() < BARKER_TOLERANCE {
            return Ok(s);
        }
        s = (2.0 * s * s * s + w) / (3.0 * (s * s + 1.0));
    }

    Err(VisibilityError::BarkerNoConvergence(w))
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kepler_residual_over_eccentricities() {
        for &e in &[0.0, 0.1, 0.5, 0.9, 0.99, 0.9999] {
            for step in 0..36 {
                let m_deg = step as f64 * 10.0;
                let e_anomaly = solve_kepler(m_deg, e).unwrap();
                let residual = e_anomaly - e * e_anomaly.sin() - m_deg * RADEG;
                assert!(residual.abs() < 1e-7, "e = {e}, M = {m_deg}");
            }
        }
    }

    #[test]
    fn test_kepler_meeus_example() {
        // Meeus, example 30.a: e = 0.100, M = 5°
        let e_anomaly = solve_kepler(5.0, 0.1).unwrap();
        assert_abs_diff_eq!(e_anomaly / RADEG, 5.554589, epsilon = 1e-5);
    }

    #[test]
    fn test_kepler_circular_orbit() {
        let e_anomaly = solve_kepler(123.0, 0.0).unwrap();
        assert_abs_diff_eq!(e_anomaly, 123.0 * RADEG, epsilon = 1e-12);
    }

    #[test]
    fn test_barker_roots() {
        for &w in &[0.0, 0.01, 1.0, 10.0, -3.5, 250.0] {
            let s = solve_barker(w).unwrap();
            assert_abs_diff_eq!(s * s * s + 3.0 * s, w, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_barker_known_root() {
        // s = 1 → 1 + 3 = 4
        assert_abs_diff_eq!(solve_barker(4.0).unwrap(), 1.0, epsilon = 1e-10);
    }
}

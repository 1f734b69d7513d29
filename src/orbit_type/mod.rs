//! # Cometary orbits
//!
//! Orbital elements of the comets the crate can follow. Planets and the Moon come from their
//! analytical theories (see [`crate::theories`]); comets are described by a perihelion-based
//! element set and propagated with Kepler's equation (`e < 1`) or Barker's equation (`e ≥ 1`).
//!
//! - [`orbital_parameters`](crate::orbit_type::orbital_parameters): validated elements
//!   `(q, e, i, ω, Ω, T)` with the derived semi-major axis and period.
//!
//! ## Typical workflow
//!
//! ```rust, no_run
//! use planet_visibility::orbit_type::OrbitalParameters;
//!
//! let encke = OrbitalParameters::new(
//!     "2P/Encke", 0.3393, 0.8471, 11.35, 187.1, 334.2, (2023, 10, 22.6), None, None,
//! )?;
//! println!("{encke}");
//! # Ok::<(), planet_visibility::visibility_errors::VisibilityError>(())
//! ```

/// Perihelion-based cometary elements.
pub mod orbital_parameters;

pub use orbital_parameters::{OrbitalParameters, DEFAULT_VALIDITY_DAYS};

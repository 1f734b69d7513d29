//! # Analytical theories
//!
//! Series used by the pipeline:
//!
//! - [`iau1980`]: 106-term nutation series (Δψ, Δε).
//! - [`elp2000`]: truncated ELP2000-82B lunar theory.
//! - [`vsop87`]: VSOP87D heliocentric positions of the Earth and planets.

pub mod elp2000;
pub mod iau1980;
pub mod vsop87;

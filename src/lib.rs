//! Apparent positions, rise and set times of the Sun, the Moon, the planets, comets and
//! deep-sky objects for an observer on the Earth.
//!
//! ```rust, no_run
//! use planet_visibility::{ObserverPosition, Target, TimeFrameContext};
//! use planet_visibility::time::CivilDateTime;
//!
//! let paris = ObserverPosition::new("Paris", (2, 20, 55.0), (48, 51, 12.0), 35.0, None, None)?;
//! let local = CivilDateTime::new(2024, 1, 1, 12, 0, 0.0)?;
//! let ctx = TimeFrameContext::new(paris, local, 1, 0, None);
//!
//! let sun = Target::Sun.compute(&ctx, false)?;
//! println!("{sun}");
//! # Ok::<(), planet_visibility::visibility_errors::VisibilityError>(())
//! ```

pub mod angle;
pub mod bodies;
pub mod catalog;
pub mod constants;
pub mod display;
pub mod earth_orientation;
pub mod kepler;
pub mod observers;
pub mod orbit_type;
pub mod request;
pub mod rise_set;
pub mod theories;
pub mod time;
pub mod time_frame;
pub mod visibility_errors;

pub use bodies::{CelestialBody, PlanetKind, Target};
pub use observers::ObserverPosition;
pub use request::ObservationRequest;
pub use rise_set::solve_rise_set;
pub use time_frame::TimeFrameContext;

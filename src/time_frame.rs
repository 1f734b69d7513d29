//! # Time and frame context
//!
//! [`TimeFrameContext`] binds an [`ObserverPosition`] to a local civil instant and derives every
//! time-dependent quantity the body pipelines need: Greenwich civil time, Julian Ephemeris Day,
//! Julian Day at 0h UT, mean obliquity, nutation and sidereal times.
//!
//! ## Overview
//!
//! The derived block ([`FrameQuantities`]) is recomputed by a single entry point at construction
//! and every time the local time of day is reassigned with
//! [`TimeFrameContext::set_local_time`]. The rise/set solver relies on this to re-evaluate a
//! body at trial instants of the same civil date.
//!
//! ```text
//! local civil time ──(zone + DST)──▶ Greenwich time ──▶ JD(0h), JDE (+ΔT)
//!                                                         │
//!                       ε0, Δψ, Δε ◀──────────────────────┤
//!                                                         ▼
//!                           GMST(0h) ─▶ GMST ─(Δψ cos ε)─▶ GST ─(λ/15)─▶ LST
//! ```
//!
//! ## Clamping
//!
//! The year is clamped to `≤ 3000`, the zone offset to `[-12, 12]` h and the daylight saving
//! offset to `[0, 1]` h. ΔT is resolved with [`resolve_delta_t`] from the local year.

use hifitime::{Epoch, Unit};
use log::{debug, warn};

use crate::angle::mod24;
use crate::constants::{
    Degree, Hour, JulianDay, RADEG, SECONDS_PER_DAY, SOLAR_TO_SIDEREAL,
};
use crate::earth_orientation::{mean_obliquity, nutation};
use crate::observers::ObserverPosition;
use crate::time::{
    days_in_month, julian_centuries, julian_day, mean_sidereal_time_0h, resolve_delta_t,
    CivilDateTime,
};
use crate::visibility_errors::VisibilityError;

/// Latest civil year accepted by the context.
pub const MAX_YEAR: i32 = 3000;

/// Time-dependent quantities derived from the local instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameQuantities {
    /// Greenwich civil date and time (UT)
    pub greenwich: CivilDateTime,
    /// Julian Ephemeris Day of the instant
    pub jde: JulianDay,
    /// Julian Day at 0h UT of the Greenwich date
    pub jd0h: JulianDay,
    /// Mean obliquity of the ecliptic ε0, degrees
    pub mean_obliquity: Degree,
    /// Nutation in longitude Δψ, degrees
    pub nutation_longitude: Degree,
    /// Nutation in obliquity Δε, degrees
    pub nutation_obliquity: Degree,
    /// Greenwich mean sidereal time at 0h UT, hours
    pub mean_sidereal_time_0h: Hour,
    /// Greenwich mean sidereal time of the instant, hours
    pub greenwich_mean_sidereal_time: Hour,
    /// Greenwich apparent sidereal time, hours
    pub greenwich_sidereal_time: Hour,
    /// Local apparent sidereal time, hours
    pub local_sidereal_time: Hour,
}

impl FrameQuantities {
    fn compute(observer: &ObserverPosition, greenwich: CivilDateTime, delta_t: f64) -> Self {
        let jde = julian_day(greenwich.year, greenwich.month, greenwich.day_fraction())
            + delta_t / SECONDS_PER_DAY;
        let jd0h = julian_day(greenwich.year, greenwich.month, greenwich.day as f64);

        let mean_obliquity = mean_obliquity(jde);
        let (dpsi, deps) = nutation(jde);

        let t0 = mean_sidereal_time_0h(jd0h);
        let gmst = mod24(t0 + SOLAR_TO_SIDEREAL * greenwich.hours());
        let equation_of_equinoxes = dpsi * ((mean_obliquity + deps) * RADEG).cos() / 15.0;
        let gst = mod24(gmst + equation_of_equinoxes);
        let lst = mod24(gst + observer.longitude().degrees() / 15.0);

        FrameQuantities {
            greenwich,
            jde,
            jd0h,
            mean_obliquity,
            nutation_longitude: dpsi,
            nutation_obliquity: deps,
            mean_sidereal_time_0h: t0,
            greenwich_mean_sidereal_time: gmst,
            greenwich_sidereal_time: gst,
            local_sidereal_time: lst,
        }
    }
}

/// An observer at a local civil instant, with its derived frame quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFrameContext {
    observer: ObserverPosition,
    local: CivilDateTime,
    zone: i32,
    dst: i32,
    delta_t_input: Option<f64>,
    delta_t: f64,
    frame: FrameQuantities,
}

impl TimeFrameContext {
    /// Build a context and compute its derived quantities.
    ///
    /// Arguments
    /// ---------
    /// * `observer`: the observing site.
    /// * `local`: local civil date and time.
    /// * `zone`: UTC offset of the local time zone in hours (clamped to `[-12, 12]`).
    /// * `dst`: daylight saving offset in hours (clamped to `[0, 1]`).
    /// * `delta_t`: optional TT − UT in seconds, see [`resolve_delta_t`].
    ///
    /// Return
    /// ----------
    /// * The context. A year above 3000 is clamped to 3000 (day of month adjusted if needed).
    pub fn new(
        observer: ObserverPosition,
        local: CivilDateTime,
        zone: i32,
        dst: i32,
        delta_t: Option<f64>,
    ) -> Self {
        let mut local = local;
        if local.year > MAX_YEAR {
            warn!("year {} out of range, clamped to {MAX_YEAR}", local.year);
            local.year = MAX_YEAR;
            local.day = local.day.min(days_in_month(local.year, local.month));
        }
        let clamped_zone = zone.clamp(-12, 12);
        if clamped_zone != zone {
            warn!("time zone {zone} out of [-12, 12], clamped to {clamped_zone}");
        }
        let clamped_dst = dst.clamp(0, 1);
        if clamped_dst != dst {
            warn!("daylight saving offset {dst} out of [0, 1], clamped to {clamped_dst}");
        }

        let delta_t_value = resolve_delta_t(local.year, delta_t);
        let greenwich = local.shifted_by_hours(-(clamped_zone + clamped_dst));
        let frame = FrameQuantities::compute(&observer, greenwich, delta_t_value);

        let context = TimeFrameContext {
            observer,
            local,
            zone: clamped_zone,
            dst: clamped_dst,
            delta_t_input: delta_t,
            delta_t: delta_t_value,
            frame,
        };
        context.log_frame();
        context
    }

    /// Build a context from a UTC epoch, expressed locally with `zone` and `dst`.
    ///
    /// Arguments
    /// ---------
    /// * `observer`: the observing site.
    /// * `epoch`: instant, read in the UTC scale.
    /// * `zone`, `dst`: local offsets in hours.
    /// * `delta_t`: optional TT − UT in seconds.
    pub fn from_utc_epoch(
        observer: ObserverPosition,
        epoch: Epoch,
        zone: i32,
        dst: i32,
        delta_t: Option<f64>,
    ) -> Self {
        let offset = zone.clamp(-12, 12) + dst.clamp(0, 1);
        let local = CivilDateTime::from_epoch(epoch + Unit::Hour * f64::from(offset));
        Self::new(observer, local, zone, dst, delta_t)
    }

    /// Reassign the local time of day (same civil date) and recompute the derived quantities.
    ///
    /// Errors
    /// ----------
    /// * [`VisibilityError::InvalidDate`] for an hour above 23 or a minute above 59.
    pub fn set_local_time(&mut self, hour: u32, minute: u32) -> Result<(), VisibilityError> {
        self.local = self.local.with_time(hour, minute, 0.0)?;
        self.delta_t = resolve_delta_t(self.local.year, self.delta_t_input);
        let greenwich = self.local.shifted_by_hours(-(self.zone + self.dst));
        self.frame = FrameQuantities::compute(&self.observer, greenwich, self.delta_t);
        self.log_frame();
        Ok(())
    }

    /// Copy of this context at another local time of day.
    pub fn with_local_time(&self, hour: u32, minute: u32) -> Result<Self, VisibilityError> {
        let mut context = self.clone();
        context.set_local_time(hour, minute)?;
        Ok(context)
    }

    fn log_frame(&self) {
        debug!(
            "frame at {} local ({} UT): JDE = {:.6}, ε0 = {:.6}°, Δψ = {:.3}\", Δε = {:.3}\", \
             LST = {:.6} h",
            self.local,
            self.frame.greenwich,
            self.frame.jde,
            self.frame.mean_obliquity,
            self.frame.nutation_longitude * 3600.0,
            self.frame.nutation_obliquity * 3600.0,
            self.frame.local_sidereal_time
        );
    }

    pub fn observer(&self) -> &ObserverPosition {
        &self.observer
    }

    pub fn local(&self) -> CivilDateTime {
        self.local
    }

    /// UTC offset of the local zone in hours.
    pub fn zone(&self) -> i32 {
        self.zone
    }

    /// Daylight saving offset in hours.
    pub fn dst(&self) -> i32 {
        self.dst
    }

    /// Resolved ΔT in seconds.
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    pub fn frame(&self) -> &FrameQuantities {
        &self.frame
    }

    pub fn jde(&self) -> JulianDay {
        self.frame.jde
    }

    /// Julian centuries from J2000.0 of the Julian Ephemeris Day.
    pub fn centuries(&self) -> f64 {
        julian_centuries(self.frame.jde)
    }

    /// True obliquity `ε0 + Δε`, degrees.
    pub fn true_obliquity(&self) -> Degree {
        self.frame.mean_obliquity + self.frame.nutation_obliquity
    }

    /// Equation of the equinoxes `Δψ cos ε / 15`, hours.
    pub fn equation_of_equinoxes(&self) -> Hour {
        self.frame.nutation_longitude * (self.true_obliquity() * RADEG).cos() / 15.0
    }

    pub fn local_sidereal_time(&self) -> Hour {
        self.frame.local_sidereal_time
    }
}

#[cfg(test)]
mod time_frame_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn greenwich_site() -> ObserverPosition {
        ObserverPosition::new("Greenwich", (0, 0, 0.0), (51, 28, 38.0), 0.0, None, None).unwrap()
    }

    #[test]
    fn test_sidereal_time_1987_april_10() {
        let local = CivilDateTime::new(1987, 4, 10, 19, 21, 0.0).unwrap();
        let ctx = TimeFrameContext::new(greenwich_site(), local, 0, 0, None);
        let frame = ctx.frame();

        // 8h34m57.0896s mean, 8h34m56.853s apparent
        assert_abs_diff_eq!(
            frame.greenwich_mean_sidereal_time,
            8.0 + 34.0 / 60.0 + 57.0896 / 3600.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            frame.greenwich_sidereal_time,
            8.0 + 34.0 / 60.0 + 56.853 / 3600.0,
            epsilon = 2e-5
        );
        assert_abs_diff_eq!(frame.local_sidereal_time, frame.greenwich_sidereal_time);
    }

    #[test]
    fn test_greenwich_time_rolls_back_over_new_year() {
        let local = CivilDateTime::new(2024, 1, 1, 0, 30, 0.0).unwrap();
        let ctx = TimeFrameContext::new(greenwich_site(), local, 1, 1, Some(69.0));
        let greenwich = ctx.frame().greenwich;
        assert_eq!((greenwich.year, greenwich.month, greenwich.day), (2023, 12, 31));
        assert_eq!((greenwich.hour, greenwich.minute), (22, 30));
        assert_abs_diff_eq!(ctx.frame().jd0h, 2460309.5);
        assert_abs_diff_eq!(
            ctx.jde(),
            2460309.5 + 22.5 / 24.0 + 69.0 / 86400.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_clamped_offsets_and_year() {
        let local = CivilDateTime::new(3200, 2, 29, 12, 0, 0.0).unwrap();
        let ctx = TimeFrameContext::new(greenwich_site(), local, 15, 3, Some(50.0));
        assert_eq!(ctx.zone(), 12);
        assert_eq!(ctx.dst(), 1);
        assert_eq!(ctx.local().year, 3000);
        assert_eq!(ctx.local().day, 28);
        // outside 1950..=2100
        assert_eq!(ctx.delta_t(), 0.0);
    }

    #[test]
    fn test_set_local_time_recomputes() {
        let local = CivilDateTime::new(2023, 6, 21, 12, 0, 0.0).unwrap();
        let base = TimeFrameContext::new(greenwich_site(), local, 0, 0, None);
        let later = base.with_local_time(13, 0).unwrap();

        assert_abs_diff_eq!(later.jde() - base.jde(), 1.0 / 24.0, epsilon = 1e-9);
        let advance = mod24(later.local_sidereal_time() - base.local_sidereal_time());
        assert_abs_diff_eq!(advance, SOLAR_TO_SIDEREAL, epsilon = 1e-6);

        let rebuilt = TimeFrameContext::new(
            greenwich_site(),
            CivilDateTime::new(2023, 6, 21, 13, 0, 0.0).unwrap(),
            0,
            0,
            None,
        );
        assert_eq!(later.frame(), rebuilt.frame());
        assert!(base.with_local_time(24, 0).is_err());
    }

    #[test]
    fn test_from_utc_epoch() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 7, 14, 10, 0, 0);
        let ctx = TimeFrameContext::from_utc_epoch(greenwich_site(), epoch, 1, 1, None);
        assert_eq!((ctx.local().hour, ctx.local().day), (12, 14));
        assert_eq!(ctx.frame().greenwich.hour, 10);
    }

    #[test]
    fn test_local_sidereal_time_east_longitude() {
        let paris =
            ObserverPosition::new("Paris", (2, 20, 55.0), (48, 51, 12.0), 0.0, None, None).unwrap();
        let local = CivilDateTime::new(2024, 1, 1, 12, 0, 0.0).unwrap();
        let ctx = TimeFrameContext::new(paris.clone(), local, 1, 0, None);
        let lst = ctx.local_sidereal_time();
        let gst = ctx.frame().greenwich_sidereal_time;
        assert_abs_diff_eq!(mod24(lst - gst), paris.longitude().degrees() / 15.0, epsilon = 1e-12);
    }
}

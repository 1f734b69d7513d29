//! # Iterative rise and set
//!
//! The non-iterative rise/set chain evaluates the body's position at the requested instant,
//! whereas the body keeps moving until it actually crosses the horizon. This module refines
//! each crossing separately: the whole pipeline (fresh Sun included) is recomputed at the
//! estimated local time until the estimate stops moving.
//!
//! ## Overview
//!
//! 1. Seed with the non-iterative estimate of the crossing.
//! 2. Recompute the body at that local time; from the 6th iteration on, accept the second
//!    UT solution near 0h.
//! 3. A jump of more than 20 h means the crossing does not exist on that date: the crossing
//!    becomes [`ALWAYS_INVISIBLE`](crate::constants::ALWAYS_INVISIBLE).
//! 4. Stop once two estimates agree within 59 s, or after 10 iterations.
//!
//! Both crossings are then spliced into the record computed at the requested instant.

use log::{debug, warn};

use crate::bodies::{CelestialBody, HorizonEvent, RiseSet, Target};
use crate::constants::Hour;
use crate::time::LocalTime;
use crate::time_frame::TimeFrameContext;
use crate::visibility_errors::VisibilityError;

/// Maximum number of recomputations per crossing.
pub const MAX_ITERATIONS: u32 = 10;

/// Iteration from which the alternate UT solution is used.
pub const ALTERNATE_FROM_ITERATION: u32 = 6;

/// Agreement between two successive estimates ending the iteration, hours.
pub const CONVERGENCE_HOURS: Hour = 59.0 / 3600.0;

/// Jump between two successive estimates treated as a missing crossing, hours.
pub const DIVERGENCE_HOURS: Hour = 20.0;

/// Which horizon crossing is refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Rise,
    Set,
}

impl Boundary {
    fn pick(self, rise_set: &RiseSet) -> HorizonEvent {
        match self {
            Boundary::Rise => rise_set.rise,
            Boundary::Set => rise_set.set,
        }
    }
}

/// Outcome of comparing two successive estimates of a crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// The estimate jumped by more than [`DIVERGENCE_HOURS`].
    Diverged,
    /// Two estimates agree within [`CONVERGENCE_HOURS`].
    Converged,
    /// Keep iterating.
    Moving(Hour),
}

/// Compare the local time of a trial with the crossing it produced.
pub fn assess_step(trial: LocalTime, estimate: LocalTime) -> Step {
    let precision = (estimate.hours() - trial.hours()).abs();
    if precision > DIVERGENCE_HOURS {
        Step::Diverged
    } else if precision <= CONVERGENCE_HOURS {
        Step::Converged
    } else {
        Step::Moving(precision)
    }
}

/// Refine one crossing.
///
/// Arguments
/// ---------
/// * `target`: the body.
/// * `ctx`: the requested instant; only its date is kept for the trial instants.
/// * `boundary`: rise or set.
/// * `seed`: non-iterative estimate of the crossing.
///
/// Return
/// ----------
/// * The refined crossing and whether it converged. A sentinel met on the way ends the
///   iteration and is returned as is.
///
/// Errors
/// ----------
/// * Any error of [`Target::compute`].
pub fn refine_boundary(
    target: &Target,
    ctx: &TimeFrameContext,
    boundary: Boundary,
    seed: HorizonEvent,
) -> Result<(HorizonEvent, bool), VisibilityError> {
    let mut event = seed;
    let mut iteration = 0;

    while let Some(trial) = event.local_time {
        let trial_ctx = ctx.with_local_time(trial.hour, trial.minute)?;
        let body = target.compute(&trial_ctx, iteration >= ALTERNATE_FROM_ITERATION)?;
        let next = boundary.pick(&body.rise_set);
        iteration += 1;

        let Some(estimate) = next.local_time else {
            return Ok((next, true));
        };

        let step = assess_step(trial, estimate);
        debug!(
            "{} {boundary:?} iteration {iteration}: {trial} -> {estimate} ({step:?})",
            target.name()
        );

        match step {
            Step::Diverged => return Ok((HorizonEvent::always_invisible(), true)),
            Step::Converged => return Ok((next, true)),
            Step::Moving(_) => event = next,
        }
        if iteration >= MAX_ITERATIONS {
            warn!(
                "{} {boundary:?}: no convergence after {iteration} iterations, kept {estimate}",
                target.name()
            );
            return Ok((event, false));
        }
    }

    Ok((event, true))
}

/// Compute a body with iteratively refined rise and set times.
///
/// Arguments
/// ---------
/// * `target`: the body.
/// * `ctx`: observer and requested instant.
///
/// Return
/// ----------
/// * The body at `ctx` with both crossings refined, and `true` when both converged. The last
///   estimate is kept even when the flag is `false`.
///
/// Errors
/// ----------
/// * Any error of [`Target::compute`].
///
/// See also
/// ------------
/// * [`Target::compute`] – The non-iterative computation.
pub fn solve_rise_set(
    target: &Target,
    ctx: &TimeFrameContext,
) -> Result<(CelestialBody, bool), VisibilityError> {
    let mut body = target.compute(ctx, false)?;
    let (rise, rise_converged) = refine_boundary(target, ctx, Boundary::Rise, body.rise_set.rise)?;
    let (set, set_converged) = refine_boundary(target, ctx, Boundary::Set, body.rise_set.set)?;

    body.rise_set = RiseSet { rise, set };
    Ok((body, rise_converged && set_converged))
}

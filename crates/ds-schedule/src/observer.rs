//! Scheduler-level observer hooks.

use ds_core::SimTime;

use crate::EventRecord;

/// Callbacks invoked by [`Scheduler::advance`][crate::Scheduler::advance].
///
/// Both receive the simulation context mutably so an adapter can drain
/// whatever the handlers left in it (see `ds-sim`).  Default methods do
/// nothing.
pub trait ClockObserver<C> {
    /// The clock moved to `now`: once per distinct event time, and once more
    /// when the advance free-runs to its target.
    fn on_time_advanced(&mut self, _now: SimTime, _ctx: &mut C) {}

    /// A handler has just run.
    fn on_event_processed(&mut self, _event: &EventRecord, _ctx: &mut C) {}
}

/// A [`ClockObserver`] that ignores everything.
pub struct NoClockObserver;

impl<C> ClockObserver<C> for NoClockObserver {}

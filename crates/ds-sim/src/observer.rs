//! Simulation observer trait for progress reporting and data collection.

use ds_agent::Activity;
use ds_core::{SimTime, TravellerId};
use ds_schedule::{ClockObserver, EventRecord};
use tracing::info;

use crate::{Fault, Notice, World};

/// Callbacks invoked by [`Sim::advance`][crate::Sim::advance] and
/// [`Sim::tick`][crate::Sim::tick] as the run progresses.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Journeys(u32);
///
/// impl SimObserver for Journeys {
///     fn on_journey_complete(&mut self, _id: TravellerId, deliveries: u32, _now: SimTime) {
///         self.0 += deliveries;
///     }
/// }
/// ```
pub trait SimObserver {
    /// The clock moved to `now`.
    fn on_time_advanced(&mut self, _now: SimTime) {}

    /// A Spawn event created traveller `id`.
    fn on_traveller_spawned(&mut self, _id: TravellerId, _now: SimTime) {}

    fn on_activity_changed(&mut self, _id: TravellerId, _from: Activity, _to: Activity, _now: SimTime) {}

    /// Traveller `id` finished after `deliveries` deliveries.
    fn on_journey_complete(&mut self, _id: TravellerId, _deliveries: u32, _now: SimTime) {}

    /// A handler hit a recoverable error.
    fn on_fault(&mut self, _fault: &Fault) {}

    /// Every box is delivered and no traveller is still active.  Called once
    /// per run (again after a reset or a restock that reopens the run).
    fn on_complete(&mut self, _now: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

// ── Relay ─────────────────────────────────────────────────────────────────────

/// Bridges scheduler callbacks to a [`SimObserver`]: drains the notices
/// handlers left in the world, keeps faults, and detects completion.
pub(crate) struct Relay<'a, O: SimObserver> {
    pub observer:     &'a mut O,
    pub faults:       &'a mut Vec<Fault>,
    pub completed_at: &'a mut Option<SimTime>,
}

impl<O: SimObserver> Relay<'_, O> {
    fn drain(&mut self, world: &mut World, now: SimTime) {
        for notice in world.notices.drain(..) {
            match notice {
                Notice::Spawned { id, at } => self.observer.on_traveller_spawned(id, at),
                Notice::ActivityChanged { id, from, to, at } => {
                    self.observer.on_activity_changed(id, from, to, at)
                }
                Notice::JourneyComplete { id, deliveries, at } => {
                    self.observer.on_journey_complete(id, deliveries, at)
                }
                Notice::Completed { at } => self.observer.on_complete(at),
                Notice::Fault(fault) => {
                    self.observer.on_fault(&fault);
                    self.faults.push(fault);
                }
            }
        }
        if self.completed_at.is_none() && world.is_complete() {
            *self.completed_at = Some(now);
            info!(%now, delivered = world.delivered.len(), "all boxes delivered");
            self.observer.on_complete(now);
        }
    }
}

impl<O: SimObserver> ClockObserver<World> for Relay<'_, O> {
    fn on_time_advanced(&mut self, now: SimTime, world: &mut World) {
        self.observer.on_time_advanced(now);
        self.drain(world, now);
    }

    fn on_event_processed(&mut self, event: &EventRecord, world: &mut World) {
        self.drain(world, event.time);
    }
}

//! Traveller workflow, one function per event kind.
//!
//! ```text
//! Spawn            → Starting;          StartMove at now
//! StartMove        → MovingToPickup;    reserve head box; ReachWaypoint after leg / hops
//!                    (pool empty: FinishJourney at now)
//! ReachWaypoint    → intermediate hop:  next ReachWaypoint
//!                    at pickup:         PickingUp (or Waiting for a bay); PickupComplete after dwell
//!                    at delivery:       Delivering; DeliveryComplete after dwell
//! PickupComplete   → MovingToDelivery;  claim box, free bay; ReachWaypoint after leg / hops
//! DeliveryComplete → Returning;         StartMove after return delay
//!                    (pool empty: FinishJourney at now)
//! FinishJourney    → Finished;          retire traveller
//! ```
//!
//! Every handler looks its traveller up first.  A miss means the traveller
//! was removed while the event was pending: the handler reports
//! `UnknownTraveller` and does nothing else.  Any error a step returns is
//! reported as a fault by the dispatching closure; the run carries on.

use ds_agent::{Activity, Traveller};
use ds_core::TravellerId;
use ds_schedule::{EventKind, EventPayload, Handler, Scheduling, handler};
use tracing::{debug, info, warn};

use crate::world::Timings;
use crate::{Notice, SimError, SimResult, World};

/// The self-scheduled workflow events (everything but `Spawn`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    StartMove,
    ReachWaypoint,
    PickupComplete,
    DeliveryComplete,
    FinishJourney,
}

impl Step {
    pub fn kind(self) -> EventKind {
        match self {
            Step::StartMove        => EventKind::StartMove,
            Step::ReachWaypoint    => EventKind::ReachWaypoint,
            Step::PickupComplete   => EventKind::PickupComplete,
            Step::DeliveryComplete => EventKind::DeliveryComplete,
            Step::FinishJourney    => EventKind::FinishJourney,
        }
    }
}

// ── Handler construction ──────────────────────────────────────────────────────

/// Handler that creates traveller `id` when it fires.
pub fn spawn_handler(id: TravellerId, name: String) -> Handler<World> {
    handler(move |world: &mut World, s: &mut Scheduling<'_, World>| {
        if let Err(err) = spawn(world, s, id, name) {
            world.report(s.now(), err);
        }
    })
}

/// Handler that runs `step` for traveller `id` when it fires.
pub fn step_handler(step: Step, id: TravellerId) -> Handler<World> {
    handler(move |world: &mut World, s: &mut Scheduling<'_, World>| {
        let result = match step {
            Step::StartMove        => start_move(world, s, id),
            Step::ReachWaypoint    => reach_waypoint(world, s, id),
            Step::PickupComplete   => pickup_complete(world, s, id),
            Step::DeliveryComplete => delivery_complete(world, s, id),
            Step::FinishJourney    => finish_journey(world, s, id),
        };
        if let Err(err) = result {
            world.report(s.now(), err);
        }
    })
}

/// Queue `step` for `id`, `delay` seconds from the handler's current time.
fn schedule_step(
    s:     &mut Scheduling<'_, World>,
    delay: f64,
    step:  Step,
    id:    TravellerId,
) -> SimResult<u64> {
    let seq = s.schedule_after(delay, step.kind(), EventPayload::Traveller(id), step_handler(step, id))?;
    Ok(seq)
}

fn active(world: &mut World, id: TravellerId) -> SimResult<&mut Traveller> {
    world.travellers.get_mut(id).ok_or(SimError::UnknownTraveller(id))
}

/// Seconds per hop when the leg time is split evenly over the route.
fn hop_time(leg_duration: f64, traveller: &Traveller) -> f64 {
    leg_duration / traveller.route().len().max(1) as f64
}

// ── Steps ─────────────────────────────────────────────────────────────────────

fn spawn(world: &mut World, s: &mut Scheduling<'_, World>, id: TravellerId, name: String) -> SimResult<()> {
    let now = s.now();
    let traveller = Traveller::spawn(id, name, world.layout.start, now);
    info!(traveller = %id, name = %traveller.name, %now, "traveller spawned");
    world.travellers.insert(traveller);
    world.notices.push(Notice::Spawned { id, at: now });
    schedule_step(s, 0.0, Step::StartMove, id)?;
    Ok(())
}

fn start_move(world: &mut World, s: &mut Scheduling<'_, World>, id: TravellerId) -> SimResult<()> {
    let now = s.now();
    active(world, id)?;

    // Another traveller may have taken the last box since this one decided
    // to go round again.
    if world.pool.is_empty() {
        debug!(traveller = %id, %now, "no boxes left at departure");
        schedule_step(s, 0.0, Step::FinishJourney, id)?;
        return Ok(());
    }

    world.change(id, Activity::MovingToPickup, now)?;
    let item = match world.pool.dequeue() {
        Ok(item) => item,
        Err(err) => {
            schedule_step(s, 0.0, Step::FinishJourney, id)?;
            return Err(err.into());
        }
    };
    let box_id = item.id;

    let route = world.layout.pickup_route();
    let traveller = world.travellers.get_mut(id).ok_or(SimError::UnknownTraveller(id))?;
    if let Some(stale) = traveller.reserve(item) {
        world.pool.enqueue(stale);
    }
    traveller.begin_leg(route);
    let hop = hop_time(world.timings.leg_duration, traveller);
    debug!(traveller = %id, %box_id, remaining = world.pool.len(), "box reserved");
    schedule_step(s, hop, Step::ReachWaypoint, id)?;
    Ok(())
}

fn reach_waypoint(world: &mut World, s: &mut Scheduling<'_, World>, id: TravellerId) -> SimResult<()> {
    let now = s.now();
    let Timings { leg_duration, dwell_delay: dwell, .. } = world.timings;
    let traveller = active(world, id)?;
    let activity = traveller.activity();

    // A bay was handed over while this traveller waited.
    if activity == Activity::Waiting {
        world.change(id, Activity::PickingUp, now)?;
        schedule_step(s, dwell, Step::PickupComplete, id)?;
        return Ok(());
    }

    let Some(point) = traveller.reach_waypoint() else {
        return Err(SimError::UnexpectedEvent { id, kind: EventKind::ReachWaypoint, activity });
    };
    if !traveller.leg_complete() {
        let hop = hop_time(leg_duration, traveller);
        debug!(traveller = %id, %point, %now, "waypoint reached");
        schedule_step(s, hop, Step::ReachWaypoint, id)?;
        return Ok(());
    }

    match activity {
        Activity::MovingToPickup => {
            let granted = world.bays.as_mut().is_none_or(|bays| bays.acquire(id));
            if granted {
                world.change(id, Activity::PickingUp, now)?;
                schedule_step(s, dwell, Step::PickupComplete, id)?;
            } else {
                world.change(id, Activity::Waiting, now)?;
                if let Some(bays) = world.bays.as_ref() {
                    debug!(
                        traveller = %id,
                        capacity = bays.capacity(),
                        queued = bays.waiting().count(),
                        %now,
                        "all bays busy"
                    );
                }
            }
        }
        Activity::MovingToDelivery => {
            world.change(id, Activity::Delivering, now)?;
            schedule_step(s, dwell, Step::DeliveryComplete, id)?;
        }
        activity => {
            return Err(SimError::UnexpectedEvent { id, kind: EventKind::ReachWaypoint, activity });
        }
    }
    Ok(())
}

fn pickup_complete(world: &mut World, s: &mut Scheduling<'_, World>, id: TravellerId) -> SimResult<()> {
    let now = s.now();
    let traveller = active(world, id)?;
    let activity = traveller.activity();
    if activity != Activity::PickingUp {
        return Err(SimError::UnexpectedEvent { id, kind: EventKind::PickupComplete, activity });
    }
    let Some(box_id) = traveller.pick_up() else {
        schedule_step(s, 0.0, Step::FinishJourney, id)?;
        return Err(SimError::MissingBox(id));
    };
    debug!(traveller = %id, %box_id, %now, "box picked up");

    if let Some(next) = world.bays.as_mut().and_then(|bays| bays.release(id)) {
        debug!(from = %id, to = %next, %now, "bay handed over");
        schedule_step(s, 0.0, Step::ReachWaypoint, next)?;
    }

    world.change(id, Activity::MovingToDelivery, now)?;
    let route = world.layout.delivery_route();
    let leg_duration = world.timings.leg_duration;
    let traveller = active(world, id)?;
    traveller.begin_leg(route);
    let hop = hop_time(leg_duration, traveller);
    schedule_step(s, hop, Step::ReachWaypoint, id)?;
    Ok(())
}

fn delivery_complete(world: &mut World, s: &mut Scheduling<'_, World>, id: TravellerId) -> SimResult<()> {
    let now = s.now();
    let traveller = active(world, id)?;
    let activity = traveller.activity();
    if activity != Activity::Delivering {
        return Err(SimError::UnexpectedEvent { id, kind: EventKind::DeliveryComplete, activity });
    }
    let Some(item) = traveller.drop_off() else {
        schedule_step(s, 0.0, Step::FinishJourney, id)?;
        return Err(SimError::MissingBox(id));
    };
    let box_id = item.id;
    world.delivered.deliver(item, world.layout.delivery, now);
    debug!(
        traveller = %id,
        %box_id,
        delivered = world.delivered.len(),
        total = world.total_boxes,
        %now,
        "box delivered"
    );

    if world.pool.is_empty() {
        schedule_step(s, 0.0, Step::FinishJourney, id)?;
    } else {
        world.change(id, Activity::Returning, now)?;
        schedule_step(s, world.timings.return_delay, Step::StartMove, id)?;
    }
    Ok(())
}

fn finish_journey(world: &mut World, s: &mut Scheduling<'_, World>, id: TravellerId) -> SimResult<()> {
    let now = s.now();
    let leftovers = active(world, id)?.release_boxes();
    for mut item in leftovers {
        warn!(traveller = %id, box_id = %item.id, "finishing traveller still held a box; returned to pool");
        item.position = world.layout.pickup;
        world.pool.enqueue(item);
    }

    world.change(id, Activity::Finished, now)?;

    if let Some(next) = world.bays.as_mut().and_then(|bays| bays.forget(id)) {
        schedule_step(s, 0.0, Step::ReachWaypoint, next)?;
    }

    let deliveries = world
        .travellers
        .retire(id)
        .map(Traveller::deliveries)
        .unwrap_or_default();
    info!(traveller = %id, deliveries, %now, "journey complete");
    world.notices.push(Notice::JourneyComplete { id, deliveries, at: now });
    Ok(())
}

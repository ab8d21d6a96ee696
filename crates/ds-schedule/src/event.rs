//! Event types: the closed set of kinds, the opaque payload, and the boxed
//! handler bound to each event.

use std::fmt;

use ds_core::{SimTime, TravellerId};

use crate::Scheduling;

// ── EventKind ─────────────────────────────────────────────────────────────────

/// What an event means to the workflow.  The queue itself only orders by
/// time; the kind is carried for observers and logging.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Spawn,
    StartMove,
    ReachWaypoint,
    PickupComplete,
    DeliveryComplete,
    FinishJourney,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Spawn            => "Spawn",
            EventKind::StartMove        => "StartMove",
            EventKind::ReachWaypoint    => "ReachWaypoint",
            EventKind::PickupComplete   => "PickupComplete",
            EventKind::DeliveryComplete => "DeliveryComplete",
            EventKind::FinishJourney    => "FinishJourney",
        };
        f.write_str(name)
    }
}

// ── EventPayload ──────────────────────────────────────────────────────────────

/// Data attached to an event for observers.  Handlers capture what they need
/// themselves; the payload is never interpreted by the queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventPayload {
    #[default]
    None,
    Traveller(TravellerId),
}

// ── Handler ───────────────────────────────────────────────────────────────────

/// Deferred work bound to an event.  Runs exactly once, with mutable access
/// to the simulation context `C` and a handle for scheduling follow-ups.
pub type Handler<C> = Box<dyn FnOnce(&mut C, &mut Scheduling<'_, C>)>;

/// Box a closure as a [`Handler`].  Lets the closure's argument types be
/// inferred from the handler signature.
pub fn handler<C, F>(f: F) -> Handler<C>
where
    F: FnOnce(&mut C, &mut Scheduling<'_, C>) + 'static,
{
    Box::new(f)
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A scheduled unit of work.  Immutable once queued; consumed by [`fire`].
///
/// [`fire`]: Event::fire
pub struct Event<C> {
    time:    SimTime,
    seq:     u64,
    kind:    EventKind,
    payload: EventPayload,
    handler: Handler<C>,
}

impl<C> Event<C> {
    pub(crate) fn new(
        time:    SimTime,
        seq:     u64,
        kind:    EventKind,
        payload: EventPayload,
        handler: Handler<C>,
    ) -> Self {
        Self { time, seq, kind, payload, handler }
    }

    #[inline]
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Position in the global scheduling order.  Unique per queue lifetime.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[inline]
    pub fn payload(&self) -> EventPayload {
        self.payload
    }

    pub fn record(&self) -> EventRecord {
        EventRecord {
            time:    self.time,
            seq:     self.seq,
            kind:    self.kind,
            payload: self.payload,
        }
    }

    /// Run the handler, consuming the event.
    pub(crate) fn fire(self, ctx: &mut C, scheduling: &mut Scheduling<'_, C>) {
        (self.handler)(ctx, scheduling)
    }
}

impl<C> fmt::Debug for Event<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("time", &self.time)
            .field("seq", &self.seq)
            .field("kind", &self.kind)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Handler-free copy of an event's metadata, handed to observers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    pub time:    SimTime,
    pub seq:     u64,
    pub kind:    EventKind,
    pub payload: EventPayload,
}

//! The `Scheduler`: simulation clock + event queue + the advance algorithm.

use ds_core::{DsResult, SimClock, SimTime};
use tracing::{debug, trace, warn};

use crate::{ClockObserver, EventKind, EventPayload, EventQueue, Handler, ScheduleError, ScheduleResult};

// ── Scheduling handle ─────────────────────────────────────────────────────────

/// What a running handler may do with the scheduler: read the time and
/// queue follow-up events.
///
/// Events queued at `now` join the back of the batch currently being drained
/// and run before the clock moves on.
pub struct Scheduling<'a, C> {
    now:   SimTime,
    queue: &'a mut EventQueue<C>,
}

impl<C> Scheduling<'_, C> {
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Queue `handler` at absolute `time`.  See [`Scheduler::schedule`].
    pub fn schedule(
        &mut self,
        time:    SimTime,
        kind:    EventKind,
        payload: EventPayload,
        handler: Handler<C>,
    ) -> ScheduleResult<u64> {
        insert(self.queue, self.now, time, kind, payload, handler)
    }

    /// Queue `handler` `delay` seconds from now.
    pub fn schedule_after(
        &mut self,
        delay:   f64,
        kind:    EventKind,
        payload: EventPayload,
        handler: Handler<C>,
    ) -> ScheduleResult<u64> {
        let time = self.now.after(delay)?;
        self.schedule(time, kind, payload, handler)
    }
}

/// Shared past-time check for both the external and the in-handler path.
fn insert<C>(
    queue:   &mut EventQueue<C>,
    now:     SimTime,
    time:    SimTime,
    kind:    EventKind,
    payload: EventPayload,
    handler: Handler<C>,
) -> ScheduleResult<u64> {
    if time < now {
        warn!(%kind, requested = %time, %now, ?payload, "rejected event scheduled in the past");
        return Err(ScheduleError::PastSchedule { kind, requested: time, now });
    }
    Ok(queue.push(time, kind, payload, handler))
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Owns simulated time and the pending events for a context type `C`.
///
/// `C` is whatever state the handlers mutate.  It is passed into
/// [`advance`][Self::advance] rather than stored, so the owner can keep the
/// scheduler and the context as sibling fields and borrow them disjointly.
pub struct Scheduler<C> {
    clock:     SimClock,
    queue:     EventQueue<C>,
    /// Events run since construction or the last reset.
    processed: u64,
}

impl<C> Scheduler<C> {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            queue:     EventQueue::new(),
            processed: 0,
        }
    }

    // ── Observers ─────────────────────────────────────────────────────────

    #[inline]
    pub fn current_time(&self) -> SimTime {
        self.clock.current_time()
    }

    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.clock.time_scale()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn queue(&self) -> &EventQueue<C> {
        &self.queue
    }

    /// Number of events still waiting.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    // ── Commands ──────────────────────────────────────────────────────────

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn set_time_scale(&mut self, scale: f64) -> DsResult<()> {
        self.clock.set_time_scale(scale)
    }

    pub fn set_max_step(&mut self, max_step: f64) -> DsResult<()> {
        self.clock.set_max_step(max_step)
    }

    /// Queue `handler` at `time`.
    ///
    /// Fails with [`ScheduleError::PastSchedule`] (and logs a warning) when
    /// `time` is earlier than the current time; the queue is left untouched.
    /// Returns the event's sequence number.
    pub fn schedule(
        &mut self,
        time:    SimTime,
        kind:    EventKind,
        payload: EventPayload,
        handler: Handler<C>,
    ) -> ScheduleResult<u64> {
        insert(&mut self.queue, self.clock.current_time(), time, kind, payload, handler)
    }

    /// Drop all pending events and rewind to time zero.
    ///
    /// Time scale and the running gate are left as they are.
    pub fn reset(&mut self) {
        let dropped = self.queue.len();
        self.queue.clear();
        self.clock.reset();
        self.processed = 0;
        debug!(dropped, "scheduler reset");
    }

    /// Advance simulated time by `delta` seconds, running every event due on
    /// the way.
    ///
    /// Event times are visited in ascending order; at each one the clock is
    /// set to that time, the observer is told, and every event due then runs
    /// in FIFO order.  Events a handler queues for the same time run in the
    /// same batch; later ones are picked up by the loop if they fall within
    /// `delta`.  Once nothing else is due the clock free-runs to the target.
    ///
    /// Returns the number of events run.
    pub fn advance<O>(&mut self, delta: f64, ctx: &mut C, observer: &mut O) -> ScheduleResult<usize>
    where
        O: ClockObserver<C>,
    {
        let target = self.clock.current_time().after(delta)?;
        let mut ran = 0usize;

        while let Some(next) = self.queue.next_time() {
            if next > target {
                break;
            }
            self.clock.advance_to(next);
            trace!(now = %next, "time advanced to event");
            observer.on_time_advanced(next, ctx);

            while let Some(event) = self.queue.pop_due(next) {
                let record = event.record();
                debug!(now = %next, kind = %record.kind, seq = record.seq, payload = ?record.payload, "event");
                let mut scheduling = Scheduling { now: next, queue: &mut self.queue };
                event.fire(ctx, &mut scheduling);
                ran += 1;
                observer.on_event_processed(&record, ctx);
            }
        }

        if self.clock.current_time() < target {
            self.clock.advance_to(target);
            trace!(now = %target, "time advanced to target");
            observer.on_time_advanced(target, ctx);
        }

        self.processed += ran as u64;
        Ok(ran)
    }

    /// Per-frame driver: scale `elapsed_wall` by the time scale, clamp it to
    /// the clock's max step, and [`advance`][Self::advance].
    ///
    /// Does nothing while paused or at zero scale.  The clamp bounds how much
    /// work one tick can do; events beyond it wait for later ticks.
    pub fn tick<O>(&mut self, elapsed_wall: f64, ctx: &mut C, observer: &mut O) -> ScheduleResult<usize>
    where
        O: ClockObserver<C>,
    {
        match self.clock.scaled_step(elapsed_wall) {
            Some(delta) => self.advance(delta, ctx, observer),
            None        => Ok(0),
        }
    }
}

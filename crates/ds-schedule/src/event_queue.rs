//! `EventQueue` — time-ordered store of pending events.
//!
//! # Ordering
//!
//! Events are keyed by their scheduled `SimTime`.  Events sharing a time live
//! in one `VecDeque` in insertion order, so iterating keys ascending and each
//! deque front-to-back gives the processing order: earlier time first, then
//! first-scheduled first.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert and pop where W = number of distinct
//! pending times.  With a handful of travellers W stays in the tens.

use std::collections::{BTreeMap, VecDeque};

use ds_core::SimTime;

use crate::{Event, EventKind, EventPayload, Handler};

/// A priority queue mapping simulation times → events due at that time.
pub struct EventQueue<C> {
    inner:    BTreeMap<SimTime, VecDeque<Event<C>>>,
    /// Cached total event count for O(1) `len()`.
    total:    usize,
    /// Sequence number handed to the next pushed event.
    next_seq: u64,
}

impl<C> Default for EventQueue<C> {
    fn default() -> Self {
        Self {
            inner:    BTreeMap::new(),
            total:    0,
            next_seq: 0,
        }
    }
}

impl<C> EventQueue<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event at `time` behind any already queued at that time.
    ///
    /// The queue does not know the current time; callers (see
    /// [`Scheduler`][crate::Scheduler]) reject past times before pushing.
    /// Returns the event's sequence number.
    pub fn push(
        &mut self,
        time:    SimTime,
        kind:    EventKind,
        payload: EventPayload,
        handler: Handler<C>,
    ) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner
            .entry(time)
            .or_default()
            .push_back(Event::new(time, seq, kind, payload, handler));
        self.total += 1;
        seq
    }

    /// Remove and return the first event due at or before `limit`.
    ///
    /// Returns `None` when the queue is empty or its earliest event is later
    /// than `limit`.
    pub fn pop_due(&mut self, limit: SimTime) -> Option<Event<C>> {
        let mut entry = self.inner.first_entry()?;
        if *entry.key() > limit {
            return None;
        }
        let event = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        if event.is_some() {
            self.total -= 1;
        }
        event
    }

    /// The earliest time with at least one queued event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Pending events in processing order.
    pub fn iter(&self) -> impl Iterator<Item = &Event<C>> {
        self.inner.values().flatten()
    }

    /// Drop every pending event.  Sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }

    /// Total number of pending events across all times.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct pending times.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}

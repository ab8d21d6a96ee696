//! The `Sim` controller: external commands in, time and timelines out.

use ds_agent::TravellerStore;
use ds_core::{DsError, Layout, SimConfig, SimTime, TravellerId};
use ds_pool::{BoxPool, Delivered};
use ds_schedule::{EventKind, EventPayload, Scheduler};
use tracing::{debug, info, warn};

use crate::observer::Relay;
use crate::workflow::{self, Step};
use crate::{Fault, LoadingBays, Notice, SimError, SimObserver, SimResult, TravellerView, World};

/// The simulation controller.
///
/// Owns the scheduler (clock + event queue) and the [`World`] its handlers
/// mutate as sibling fields, so `advance` can lend the world to handlers
/// while the scheduler drives them.  Nothing here polls travellers: every
/// state change happens inside an event handler.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:       SimConfig,
    pub(crate) scheduler:    Scheduler<World>,
    pub(crate) world:        World,
    /// Handler faults not yet taken by the caller.
    pub(crate) faults:       Vec<Fault>,
    /// Time the run was first seen complete.
    pub(crate) completed_at: Option<SimTime>,
}

impl Sim {
    // ── Commands ──────────────────────────────────────────────────────────

    /// Schedule a new traveller to appear at the current time.
    ///
    /// The id is allocated immediately; the traveller itself exists once the
    /// Spawn event runs on the next `advance`/`tick`.
    pub fn spawn_traveller(&mut self) -> SimResult<TravellerId> {
        let (id, name) = self.world.travellers.allocate();
        let now = self.scheduler.current_time();
        self.scheduler.schedule(
            now,
            EventKind::Spawn,
            EventPayload::Traveller(id),
            workflow::spawn_handler(id, name),
        )?;
        debug!(traveller = %id, %now, "spawn scheduled");
        Ok(id)
    }

    pub(crate) fn spawn_starting(&mut self) -> SimResult<()> {
        for _ in 0..self.config.starting_travellers {
            self.spawn_traveller()?;
        }
        Ok(())
    }

    /// Back to time zero with a full pool and the starting travellers
    /// scheduled.  Pending events are dropped; time scale and pause state
    /// are kept.
    pub fn reset(&mut self) -> SimResult<()> {
        self.scheduler.reset();
        self.world.reset(&self.config);
        self.faults.clear();
        self.completed_at = None;
        info!(
            boxes      = self.config.starting_boxes,
            travellers = self.config.starting_travellers,
            "simulation reset"
        );
        self.spawn_starting()
    }

    /// Validate `config`, adopt it (including its time scale and max step),
    /// then [`reset`][Self::reset].
    pub fn reset_with(&mut self, config: SimConfig) -> SimResult<()> {
        config.validate()?;
        self.scheduler.set_time_scale(config.time_scale)?;
        self.scheduler.set_max_step(config.max_step)?;
        self.config = config;
        self.reset()
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
        debug!(now = %self.current_time(), "paused");
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
        debug!(now = %self.current_time(), "resumed");
    }

    /// Simulated seconds per wall-clock second.  0 stops `tick` without
    /// touching the pause gate.
    pub fn set_time_scale(&mut self, scale: f64) -> SimResult<()> {
        self.scheduler.set_time_scale(scale)?;
        self.config.time_scale = scale;
        debug!(scale, "time scale changed");
        Ok(())
    }

    /// Append `count` fresh boxes to the pool and raise the delivery target.
    /// Travellers that already finished stay finished.
    pub fn add_boxes(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        self.world.pool.fill(count, self.world.layout.pickup);
        self.world.total_boxes += count;
        self.completed_at = None;
        self.world.notices.retain(|n| !matches!(n, Notice::Completed { .. }));
        info!(
            added = count,
            pooled = self.world.pool.len(),
            total = self.world.total_boxes,
            "boxes restocked"
        );
    }

    /// Despawn an active traveller.
    ///
    /// Any box it reserved or carried goes back to the tail of the pool and
    /// any bay it held passes to the next in line.  Its pending events stay
    /// queued and are skipped as `UnknownTraveller` faults when they fire.
    ///
    /// If that leaves every box delivered and nobody active, the run is
    /// complete as of now; observers hear of it on the next advance.
    pub fn remove_traveller(&mut self, id: TravellerId) -> SimResult<()> {
        let mut traveller = self
            .world
            .travellers
            .remove(id)
            .ok_or(SimError::UnknownTraveller(id))?;

        let returned = traveller.release_boxes();
        let count = returned.len();
        for mut item in returned {
            item.position = self.world.layout.pickup;
            self.world.pool.enqueue(item);
        }

        if let Some(next) = self.world.bays.as_mut().and_then(|bays| bays.forget(id)) {
            let now = self.scheduler.current_time();
            self.scheduler.schedule(
                now,
                EventKind::ReachWaypoint,
                EventPayload::Traveller(next),
                workflow::step_handler(Step::ReachWaypoint, next),
            )?;
        }

        let now = self.current_time();
        info!(traveller = %id, returned = count, %now, "traveller removed");

        if self.completed_at.is_none() && self.world.is_complete() {
            self.completed_at = Some(now);
            self.world.notices.push(Notice::Completed { at: now });
            info!(%now, delivered = self.world.delivered.len(), "all boxes delivered");
        }
        Ok(())
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Per-frame driver: advance by `elapsed_wall × time_scale`, clamped to
    /// the configured max step.  Does nothing while paused or at scale 0.
    ///
    /// Returns the number of events run.
    pub fn tick<O: SimObserver>(&mut self, elapsed_wall: f64, observer: &mut O) -> SimResult<usize> {
        let mut relay = Relay {
            observer,
            faults:       &mut self.faults,
            completed_at: &mut self.completed_at,
        };
        Ok(self.scheduler.tick(elapsed_wall, &mut self.world, &mut relay)?)
    }

    /// Advance simulated time by exactly `delta` seconds, ignoring the time
    /// scale, the pause gate and the max step.
    pub fn advance<O: SimObserver>(&mut self, delta: f64, observer: &mut O) -> SimResult<usize> {
        let mut relay = Relay {
            observer,
            faults:       &mut self.faults,
            completed_at: &mut self.completed_at,
        };
        Ok(self.scheduler.advance(delta, &mut self.world, &mut relay)?)
    }

    /// Advance in `step`-second increments until the run completes or the
    /// clock reaches `max_time`.
    ///
    /// Returns the time of completion (the moment the last traveller
    /// finished), or `None` if `max_time` came first.
    pub fn run_until_complete<O: SimObserver>(
        &mut self,
        step:     f64,
        max_time: f64,
        observer: &mut O,
    ) -> SimResult<Option<SimTime>> {
        if !step.is_finite() || step <= 0.0 {
            return Err(DsError::Config(format!("run step must be > 0, got {step}")).into());
        }
        if !max_time.is_finite() || max_time < 0.0 {
            return Err(DsError::Config(format!("max time must be finite and >= 0, got {max_time}")).into());
        }
        while self.completed_at.is_none() {
            let now = self.current_time().secs();
            if now >= max_time {
                warn!(max_time, delivered = self.world.delivered.len(), "time limit reached before completion");
                return Ok(None);
            }
            self.advance(step.min(max_time - now), observer)?;
        }
        Ok(self.completed_at)
    }

    // ── Observers ─────────────────────────────────────────────────────────

    #[inline]
    pub fn current_time(&self) -> SimTime {
        self.scheduler.current_time()
    }

    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.scheduler.time_scale()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Events still queued.
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    /// Events run since build or the last reset.
    pub fn processed(&self) -> u64 {
        self.scheduler.processed()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.world.layout
    }

    pub fn pool(&self) -> &BoxPool {
        &self.world.pool
    }

    pub fn delivered(&self) -> &Delivered {
        &self.world.delivered
    }

    pub fn total_boxes(&self) -> u32 {
        self.world.total_boxes
    }

    pub fn store(&self) -> &TravellerStore {
        &self.world.travellers
    }

    pub fn bays(&self) -> Option<&LoadingBays> {
        self.world.bays.as_ref()
    }

    /// Active travellers (ascending id) then finished ones (finishing order).
    pub fn travellers(&self) -> Vec<TravellerView> {
        self.world.travellers.iter().map(TravellerView::from).collect()
    }

    pub fn traveller(&self, id: TravellerId) -> Option<TravellerView> {
        self.world
            .travellers
            .iter()
            .find(|t| t.id == id)
            .map(TravellerView::from)
    }

    /// Every box delivered and no traveller still active.
    pub fn is_complete(&self) -> bool {
        self.world.is_complete()
    }

    pub fn completed_at(&self) -> Option<SimTime> {
        self.completed_at
    }

    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Hand over and clear the buffered faults.
    pub fn take_faults(&mut self) -> Vec<Fault> {
        std::mem::take(&mut self.faults)
    }
}

//! Everything event handlers mutate, owned by the controller next to its
//! scheduler.

use ds_agent::{Activity, TravellerStore};
use ds_core::{Layout, SimConfig, SimTime, TravellerId};
use ds_pool::{BoxPool, Delivered};
use tracing::{debug, error, warn};

use crate::{Fault, LoadingBays, SimError, SimResult};

/// Something a handler did that observers should hear about.  Handlers
/// append; the controller's observer relay drains after every event.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Spawned { id: TravellerId, at: SimTime },
    ActivityChanged { id: TravellerId, from: Activity, to: Activity, at: SimTime },
    JourneyComplete { id: TravellerId, deliveries: u32, at: SimTime },
    /// The run completed outside any handler (a removal).
    Completed { at: SimTime },
    Fault(Fault),
}

/// Workflow timings copied out of `SimConfig`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Timings {
    pub leg_duration: f64,
    pub dwell_delay:  f64,
    pub return_delay: f64,
}

impl From<&SimConfig> for Timings {
    fn from(config: &SimConfig) -> Self {
        Self {
            leg_duration: config.leg_duration,
            dwell_delay:  config.dwell_delay,
            return_delay: config.return_delay,
        }
    }
}

pub struct World {
    pub timings:     Timings,
    pub layout:      Layout,
    pub pool:        BoxPool,
    pub delivered:   Delivered,
    pub travellers:  TravellerStore,
    /// Boxes this run is expected to deliver (starting boxes plus restocks).
    pub total_boxes: u32,
    pub bays:        Option<LoadingBays>,
    pub notices:     Vec<Notice>,
}

impl World {
    pub fn new(config: &SimConfig, layout: Layout) -> Self {
        Self {
            timings:     Timings::from(config),
            pool:        BoxPool::with_boxes(config.starting_boxes, layout.pickup),
            delivered:   Delivered::new(),
            travellers:  TravellerStore::new(),
            total_boxes: config.starting_boxes,
            bays:        config.pickup_bays.map(LoadingBays::new),
            notices:     Vec::new(),
            layout,
        }
    }

    /// Put the world back in its starting state under `config`.  The layout
    /// is kept.
    pub fn reset(&mut self, config: &SimConfig) {
        self.timings = Timings::from(config);
        self.pool.clear();
        self.pool.fill(config.starting_boxes, self.layout.pickup);
        self.delivered.clear();
        self.travellers.clear();
        self.total_boxes = config.starting_boxes;
        self.bays = config.pickup_bays.map(LoadingBays::new);
        self.notices.clear();
    }

    /// Every box delivered and nobody still working.
    pub fn is_complete(&self) -> bool {
        self.delivered.len() == self.total_boxes as usize && self.travellers.active_count() == 0
    }

    /// Move traveller `id` to `to` at `now`, logging and noting the change.
    pub fn change(&mut self, id: TravellerId, to: Activity, now: SimTime) -> SimResult<Activity> {
        let traveller = self.travellers.get_mut(id).ok_or(SimError::UnknownTraveller(id))?;
        let from = traveller.transition(to, now)?;
        debug!(traveller = %id, %from, %to, %now, "activity changed");
        self.notices.push(Notice::ActivityChanged { id, from, to, at: now });
        Ok(from)
    }

    /// Log a handler error and queue it as a fault notice.
    pub fn report(&mut self, now: SimTime, err: SimError) {
        match &err {
            SimError::UnknownTraveller(id) => {
                warn!(traveller = %id, %now, "event for unknown traveller skipped");
            }
            other => error!(%now, error = %other, "workflow fault"),
        }
        self.notices.push(Notice::Fault(Fault { time: now, error: err }));
    }
}

//! Fluent builder for constructing a [`Sim`].

use ds_core::{Layout, SimConfig};
use ds_schedule::Scheduler;
use tracing::info;

use crate::{Sim, SimResult, World};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default             |
/// |----------------|---------------------|
/// | `.layout(l)`   | `Layout::default()` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig { starting_boxes: 3, ..Default::default() })
///     .layout(layout)
///     .build()?;
/// sim.run_until_complete(0.25, 60.0, &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    layout: Option<Layout>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, layout: None }
    }

    /// Supply the depot layout (spawn, pickup and delivery points, optional
    /// via waypoints).
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Validate the configuration, fill the pool, and schedule the starting
    /// travellers' Spawn events at time zero.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let clock = self.config.make_clock()?;
        let layout = self.layout.unwrap_or_default();
        let world = World::new(&self.config, layout);

        let mut sim = Sim {
            scheduler:    Scheduler::new(clock),
            config:       self.config,
            world,
            faults:       Vec::new(),
            completed_at: None,
        };
        sim.spawn_starting()?;

        info!(
            boxes      = sim.config.starting_boxes,
            travellers = sim.config.starting_travellers,
            bays       = ?sim.config.pickup_bays,
            "simulation built"
        );
        Ok(sim)
    }
}

//! Top-level simulation configuration.

use crate::{DsError, DsResult, SimClock};

/// Numbers the controller needs to build or reset a run.
///
/// Typically built in code or loaded from JSON by the application crate
/// (with the `serde` feature) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Boxes placed in the pool at start and on every reset.
    pub starting_boxes: u32,

    /// Travellers spawned at start and on every reset.
    pub starting_travellers: u32,

    /// Simulated seconds one leg (start/delivery → pickup, pickup → delivery)
    /// takes.  Must be `> 0`.
    pub leg_duration: f64,

    /// Handling time at the pickup and the delivery point.  Must be `>= 0`.
    pub dwell_delay: f64,

    /// Pause between finishing a delivery and starting the next pickup leg.
    pub return_delay: f64,

    /// Initial simulated seconds per wall-clock second.
    pub time_scale: f64,

    /// Largest simulated step one external tick may advance.
    pub max_step: f64,

    /// Concurrent pickups allowed at the pickup point.  `None` = unlimited.
    pub pickup_bays: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_boxes:      10,
            starting_travellers: 1,
            leg_duration:        2.0,
            dwell_delay:         0.5,
            return_delay:        0.0,
            time_scale:          1.0,
            max_step:            0.25,
            pickup_bays:         None,
        }
    }
}

impl SimConfig {
    /// Check every numeric field against its allowed range.
    pub fn validate(&self) -> DsResult<()> {
        if !self.leg_duration.is_finite() || self.leg_duration <= 0.0 {
            return Err(DsError::Config(format!(
                "leg_duration must be > 0, got {}",
                self.leg_duration
            )));
        }
        for (name, value) in [
            ("dwell_delay", self.dwell_delay),
            ("return_delay", self.return_delay),
            ("time_scale", self.time_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DsError::Config(format!("{name} must be >= 0, got {value}")));
            }
        }
        if !self.max_step.is_finite() || self.max_step <= 0.0 {
            return Err(DsError::Config(format!("max_step must be > 0, got {}", self.max_step)));
        }
        if self.pickup_bays == Some(0) {
            return Err(DsError::Config("pickup_bays must be at least 1 when set".into()));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> DsResult<SimClock> {
        SimClock::new(self.time_scale, self.max_step)
    }

    /// Time from spawn to the end of the last delivery for one traveller
    /// working through `boxes` boxes alone.
    pub fn solo_makespan(&self, boxes: u32) -> f64 {
        if boxes == 0 {
            return 0.0;
        }
        let cycle = 2.0 * (self.leg_duration + self.dwell_delay);
        boxes as f64 * cycle + (boxes - 1) as f64 * self.return_delay
    }
}

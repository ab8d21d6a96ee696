//! Simulation time model.
//!
//! # Design
//!
//! Time is a real-valued count of simulated seconds wrapped in `SimTime`.
//! Unlike a raw `f64`, `SimTime` is totally ordered (via `f64::total_cmp`) so
//! it can key a `BTreeMap`, and its constructors reject NaN, infinities and
//! negative values so the ordering is also the numeric one.
//!
//! `SimClock` holds the current time plus the pacing state used by the
//! per-tick driver: the time scale (simulated seconds per wall second), the
//! running gate, and the maximum simulated step one tick may cover.

use std::cmp::Ordering;
use std::fmt;

use crate::{DsError, DsResult};

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulation time in seconds.  Always finite and `>= 0`.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Build a time from seconds, rejecting NaN, infinities and negatives.
    pub fn try_from_secs(secs: f64) -> DsResult<SimTime> {
        if secs.is_finite() && secs >= 0.0 {
            // `+ 0.0` folds -0.0 into 0.0 so total_cmp agrees with `==`.
            Ok(SimTime(secs + 0.0))
        } else {
            Err(DsError::InvalidTime(secs))
        }
    }

    /// Build a time from seconds.
    ///
    /// # Panics
    /// Panics in debug mode if `secs` is not finite and non-negative; release
    /// builds clamp to zero.
    #[inline]
    pub fn from_secs(secs: f64) -> SimTime {
        debug_assert!(secs.is_finite() && secs >= 0.0, "invalid SimTime {secs}");
        if secs.is_finite() && secs > 0.0 { SimTime(secs) } else { SimTime::ZERO }
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// The time `delta` seconds after `self`.  Negative or non-finite deltas
    /// are rejected.
    pub fn after(self, delta: f64) -> DsResult<SimTime> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(DsError::InvalidTime(delta));
        }
        SimTime::try_from_secs(self.0 + delta)
    }

    /// Seconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Current simulated time plus the pacing controls of the per-tick driver.
///
/// Only the advance algorithm moves `current_time` forward; only `reset`
/// moves it back.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    current_time: SimTime,
    /// Simulated seconds per wall-clock second.  0 pauses the driver.
    time_scale: f64,
    /// Gate toggled by pause/resume; independent of `time_scale`.
    running: bool,
    /// Upper bound on simulated seconds covered by one external tick.
    max_step: f64,
}

impl SimClock {
    /// Create a running clock at time zero.
    pub fn new(time_scale: f64, max_step: f64) -> DsResult<Self> {
        let mut clock = Self {
            current_time: SimTime::ZERO,
            time_scale:   1.0,
            running:      true,
            max_step:     1.0,
        };
        clock.set_time_scale(time_scale)?;
        clock.set_max_step(max_step)?;
        Ok(clock)
    }

    #[inline]
    pub fn current_time(&self) -> SimTime {
        self.current_time
    }

    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    pub fn set_time_scale(&mut self, scale: f64) -> DsResult<()> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(DsError::Config(format!("time_scale must be finite and >= 0, got {scale}")));
        }
        self.time_scale = scale;
        Ok(())
    }

    pub fn set_max_step(&mut self, max_step: f64) -> DsResult<()> {
        if !max_step.is_finite() || max_step <= 0.0 {
            return Err(DsError::Config(format!("max_step must be finite and > 0, got {max_step}")));
        }
        self.max_step = max_step;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Simulated seconds one tick of `elapsed_wall` seconds should cover.
    ///
    /// Returns `None` when the clock is paused, the scale is zero, or no wall
    /// time elapsed.  The result is clamped to `max_step`.
    pub fn scaled_step(&self, elapsed_wall: f64) -> Option<f64> {
        if !self.running || self.time_scale == 0.0 {
            return None;
        }
        if !elapsed_wall.is_finite() || elapsed_wall <= 0.0 {
            return None;
        }
        Some((elapsed_wall * self.time_scale).min(self.max_step))
    }

    /// Move the clock forward to `time`.  Earlier times are ignored.
    #[inline]
    pub fn advance_to(&mut self, time: SimTime) {
        debug_assert!(time >= self.current_time, "clock moved backwards: {time} < {}", self.current_time);
        self.current_time = self.current_time.max(time);
    }

    /// Rewind to time zero.  Scale, running gate and max step are untouched.
    pub fn reset(&mut self) {
        self.current_time = SimTime::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.running { "running" } else { "paused" };
        write!(f, "{} (x{} {state})", self.current_time, self.time_scale)
    }
}

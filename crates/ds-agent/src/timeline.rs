//! Append-only per-traveller activity log.
//!
//! # Invariants
//!
//! - Segments are contiguous: `segments[i].end == Some(segments[i + 1].start)`.
//! - Only the last segment may be open (`end == None`).
//! - A closed segment never ends before it starts.
//!
//! An open end means "still going".  Readers that need a number substitute
//! the current clock time via [`TravellerSegment::display_end`]; that value
//! is never written back.

use ds_core::SimTime;

use crate::Activity;

/// One interval of a single activity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravellerSegment {
    pub activity: Activity,
    pub start:    SimTime,
    /// `None` while the activity is ongoing.
    pub end:      Option<SimTime>,
}

impl TravellerSegment {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// End time for display: the stored end, or `now` while open.
    pub fn display_end(&self, now: SimTime) -> SimTime {
        self.end.unwrap_or(now).max(self.start)
    }

    /// Length in seconds, measuring an open segment up to `now`.
    pub fn duration(&self, now: SimTime) -> f64 {
        self.display_end(now) - self.start
    }
}

/// The ordered segments of one traveller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    segments: Vec<TravellerSegment>,
}

impl Timeline {
    /// A timeline whose first segment opens at `at`.
    pub fn starting(activity: Activity, at: SimTime) -> Self {
        let mut timeline = Self::default();
        timeline.open(activity, at);
        timeline
    }

    /// Close the open segment (if any) at `at` and open one for `activity`.
    pub fn open(&mut self, activity: Activity, at: SimTime) {
        let start = match self.close(at) {
            Some(end) => end,
            None      => at,
        };
        self.segments.push(TravellerSegment { activity, start, end: None });
    }

    /// Close the open segment at `at` (never before its start).
    ///
    /// Returns the end time written, or `None` if nothing was open.
    pub fn close(&mut self, at: SimTime) -> Option<SimTime> {
        let last = self.segments.last_mut().filter(|s| s.is_open())?;
        let end = at.max(last.start);
        last.end = Some(end);
        Some(end)
    }

    pub fn segments(&self) -> &[TravellerSegment] {
        &self.segments
    }

    /// The open segment, if the traveller is still going.
    pub fn current(&self) -> Option<&TravellerSegment> {
        self.segments.last().filter(|s| s.is_open())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total seconds spent in `activity`, counting an open segment up to `now`.
    pub fn time_in(&self, activity: Activity, now: SimTime) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.activity == activity)
            .fold(0.0, |total, s| total + s.duration(now))
    }

    /// Check the invariants listed in the module docs.
    pub fn is_contiguous(&self) -> bool {
        let pairs_ok = self
            .segments
            .windows(2)
            .all(|w| w[0].end == Some(w[1].start));
        let ends_ok = self
            .segments
            .iter()
            .all(|s| s.end.is_none_or(|end| end >= s.start));
        let open_ok = self
            .segments
            .iter()
            .rev()
            .skip(1)
            .all(|s| !s.is_open());
        pairs_ok && ends_ok && open_ok
    }
}

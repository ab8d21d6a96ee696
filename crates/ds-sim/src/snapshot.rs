//! Read-only views of travellers for visualization and export.

use ds_agent::{Activity, Traveller, TravellerSegment};
use ds_core::{BoxId, Point, SimTime, TravellerId};

/// One timeline entry.  `end` stays `None` while the activity is ongoing;
/// use [`display_end`][Self::display_end] for a drawable value.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentView {
    pub activity: Activity,
    pub start:    SimTime,
    pub end:      Option<SimTime>,
}

impl SegmentView {
    pub fn display_end(&self, now: SimTime) -> SimTime {
        self.end.unwrap_or(now).max(self.start)
    }
}

impl From<&TravellerSegment> for SegmentView {
    fn from(seg: &TravellerSegment) -> Self {
        Self { activity: seg.activity, start: seg.start, end: seg.end }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravellerView {
    pub id:         TravellerId,
    pub name:       String,
    pub activity:   Activity,
    pub position:   Point,
    pub carrying:   Option<BoxId>,
    pub deliveries: u32,
    pub timeline:   Vec<SegmentView>,
}

impl From<&Traveller> for TravellerView {
    fn from(t: &Traveller) -> Self {
        Self {
            id:         t.id,
            name:       t.name.clone(),
            activity:   t.activity(),
            position:   t.position(),
            carrying:   t.carried_box_id(),
            deliveries: t.deliveries(),
            timeline:   t.timeline().segments().iter().map(SegmentView::from).collect(),
        }
    }
}

//! Per-traveller workflow state.

use ds_core::{BoxId, Point, SimTime, TravellerId};
use ds_pool::DeliveryBox;

use crate::{Activity, AgentError, AgentResult, Timeline};

/// One agent fetching and delivering boxes.
///
/// A traveller owns at most two boxes at once, in separate slots: the box it
/// reserved when it set off for the pickup point, and the box it carries
/// after picking up.  `has_box()` is derived from the carried slot, so the
/// "carrying" flag and the carried id cannot disagree.
#[derive(Debug)]
pub struct Traveller {
    pub id:   TravellerId,
    pub name: String,

    activity:       Activity,
    /// Last waypoint reached (or the spawn point).
    position:       Point,
    /// Waypoints of the current leg only.
    route:          Vec<Point>,
    /// Index into `route` of the next waypoint to reach.
    waypoint_index: usize,
    reserved:       Option<DeliveryBox>,
    carried:        Option<DeliveryBox>,
    deliveries:     u32,
    timeline:       Timeline,
}

impl Traveller {
    /// A traveller in `Starting` at `at`, its first timeline segment open
    /// from `now`.
    pub fn spawn(id: TravellerId, name: String, at: Point, now: SimTime) -> Self {
        Self {
            id,
            name,
            activity:       Activity::Starting,
            position:       at,
            route:          Vec::new(),
            waypoint_index: 0,
            reserved:       None,
            carried:        None,
            deliveries:     0,
            timeline:       Timeline::starting(Activity::Starting, now),
        }
    }

    // ── Observers ─────────────────────────────────────────────────────────

    #[inline]
    pub fn activity(&self) -> Activity {
        self.activity
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn route(&self) -> &[Point] {
        &self.route
    }

    #[inline]
    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    /// All waypoints of the current leg have been reached.
    #[inline]
    pub fn leg_complete(&self) -> bool {
        self.waypoint_index >= self.route.len()
    }

    #[inline]
    pub fn has_box(&self) -> bool {
        self.carried.is_some()
    }

    pub fn carried_box_id(&self) -> Option<BoxId> {
        self.carried.as_ref().map(|b| b.id)
    }

    pub fn reserved_box_id(&self) -> Option<BoxId> {
        self.reserved.as_ref().map(|b| b.id)
    }

    pub fn deliveries(&self) -> u32 {
        self.deliveries
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Move to `to`, closing the open timeline segment at `now` and opening
    /// one for `to` (none for `Finished`).  Returns the previous activity.
    pub fn transition(&mut self, to: Activity, now: SimTime) -> AgentResult<Activity> {
        let from = self.activity;
        if !from.can_transition_to(to) {
            return Err(AgentError::InvalidTransition { id: self.id, from, to });
        }
        if to.is_finished() {
            self.timeline.close(now);
        } else {
            self.timeline.open(to, now);
        }
        self.activity = to;
        Ok(from)
    }

    /// Install the route of a new leg and rewind the waypoint index.
    pub fn begin_leg(&mut self, route: Vec<Point>) {
        debug_assert!(!route.is_empty(), "a leg needs at least one waypoint");
        self.route = route;
        self.waypoint_index = 0;
    }

    /// Arrive at the next waypoint of the leg.  Returns the point reached,
    /// or `None` if the leg was already complete.
    pub fn reach_waypoint(&mut self) -> Option<Point> {
        let point = *self.route.get(self.waypoint_index)?;
        self.position = point;
        self.waypoint_index += 1;
        Some(point)
    }

    // ── Box handling ──────────────────────────────────────────────────────

    /// Claim `item` for the upcoming pickup.  Returns any box already
    /// reserved, which the caller must put back.
    pub fn reserve(&mut self, item: DeliveryBox) -> Option<DeliveryBox> {
        self.reserved.replace(item)
    }

    /// Turn the reservation into the carried box.  Returns the id picked
    /// up, or `None` if nothing was reserved.
    pub fn pick_up(&mut self) -> Option<BoxId> {
        let mut item = self.reserved.take()?;
        item.position = self.position;
        let id = item.id;
        self.carried = Some(item);
        Some(id)
    }

    /// Hand over the carried box and count the delivery.
    pub fn drop_off(&mut self) -> Option<DeliveryBox> {
        let item = self.carried.take()?;
        self.deliveries += 1;
        Some(item)
    }

    /// Give up every box this traveller holds (reserved first).
    pub fn release_boxes(&mut self) -> Vec<DeliveryBox> {
        self.reserved.take().into_iter().chain(self.carried.take()).collect()
    }
}

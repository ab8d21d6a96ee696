//! Unit tests for ds-agent.

use ds_core::{BoxId, Point, SimTime, TravellerId};
use ds_pool::DeliveryBox;

use crate::{Activity, AgentError, Timeline, Traveller, TravellerStore};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t(secs: f64) -> SimTime {
    SimTime::from_secs(secs)
}

fn traveller(id: u32) -> Traveller {
    Traveller::spawn(TravellerId(id), format!("T{id}"), Point::new(0.0, 0.0), t(0.0))
}

// ── Activity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod activity {
    use super::*;

    #[test]
    fn cycle_transitions_are_legal() {
        use Activity::*;
        let cycle = [Starting, MovingToPickup, PickingUp, MovingToDelivery, Delivering, Returning, MovingToPickup];
        for w in cycle.windows(2) {
            assert!(w[0].can_transition_to(w[1]), "{:?} -> {:?}", w[0], w[1]);
        }
        assert!(MovingToPickup.can_transition_to(Waiting));
        assert!(Waiting.can_transition_to(PickingUp));
    }

    #[test]
    fn anything_can_finish_but_finished_is_terminal() {
        for a in Activity::ALL {
            assert_eq!(a.can_transition_to(Activity::Finished), a != Activity::Finished);
            assert!(!Activity::Finished.can_transition_to(a));
        }
    }

    #[test]
    fn skipping_steps_is_illegal() {
        assert!(!Activity::Starting.can_transition_to(Activity::PickingUp));
        assert!(!Activity::Delivering.can_transition_to(Activity::MovingToPickup));
        assert!(!Activity::Waiting.can_transition_to(Activity::MovingToDelivery));
    }
}

// ── Timeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline {
    use super::*;

    #[test]
    fn open_closes_previous_segment() {
        let mut tl = Timeline::starting(Activity::Starting, t(0.0));
        tl.open(Activity::MovingToPickup, t(0.0));
        tl.open(Activity::PickingUp, t(2.0));

        let segs = tl.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].end, Some(t(0.0)));
        assert_eq!(segs[1].end, Some(t(2.0)));
        assert!(segs[2].is_open());
        assert_eq!(tl.current().unwrap().activity, Activity::PickingUp);
        assert!(tl.is_contiguous());
    }

    #[test]
    fn close_leaves_nothing_open() {
        let mut tl = Timeline::starting(Activity::Delivering, t(1.0));
        assert_eq!(tl.close(t(3.0)), Some(t(3.0)));
        assert!(tl.current().is_none());
        assert_eq!(tl.close(t(4.0)), None);
        assert!(tl.is_contiguous());
    }

    #[test]
    fn close_never_precedes_start() {
        let mut tl = Timeline::starting(Activity::Starting, t(5.0));
        tl.close(t(4.0));
        assert_eq!(tl.segments()[0].end, Some(t(5.0)));
    }

    #[test]
    fn display_end_substitutes_now_for_open_segment() {
        let tl = Timeline::starting(Activity::MovingToPickup, t(1.0));
        let seg = tl.segments()[0];
        assert_eq!(seg.display_end(t(2.5)), t(2.5));
        assert_eq!(seg.duration(t(2.5)), 1.5);
        // Stored value is untouched.
        assert!(tl.segments()[0].is_open());
    }

    #[test]
    fn time_in_sums_matching_segments() {
        let mut tl = Timeline::starting(Activity::MovingToPickup, t(0.0));
        tl.open(Activity::PickingUp, t(2.0));
        tl.open(Activity::MovingToDelivery, t(2.5));
        tl.open(Activity::MovingToPickup, t(4.5));
        assert_eq!(tl.time_in(Activity::MovingToPickup, t(6.0)), 3.5);
        assert_eq!(tl.time_in(Activity::PickingUp, t(6.0)), 0.5);
    }

    #[test]
    fn time_in_unvisited_activity_is_positive_zero() {
        let tl = Timeline::starting(Activity::MovingToPickup, t(0.0));
        let waited = tl.time_in(Activity::Waiting, t(3.0));
        assert_eq!(waited, 0.0);
        assert!(waited.is_sign_positive());
        assert_eq!(format!("{waited:.2}"), "0.00");
    }
}

// ── Traveller ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traveller {
    use super::*;

    #[test]
    fn spawns_starting_with_open_segment() {
        let tr = traveller(0);
        assert_eq!(tr.activity(), Activity::Starting);
        assert_eq!(tr.timeline().len(), 1);
        assert!(tr.timeline().current().is_some());
        assert!(!tr.has_box());
    }

    #[test]
    fn illegal_transition_is_rejected_without_side_effects() {
        let mut tr = traveller(3);
        let err = tr.transition(Activity::Delivering, t(1.0)).unwrap_err();
        assert_eq!(
            err,
            AgentError::InvalidTransition {
                id:   TravellerId(3),
                from: Activity::Starting,
                to:   Activity::Delivering,
            }
        );
        assert_eq!(tr.activity(), Activity::Starting);
        assert_eq!(tr.timeline().len(), 1);
    }

    #[test]
    fn finishing_closes_without_opening() {
        let mut tr = traveller(0);
        tr.transition(Activity::MovingToPickup, t(0.0)).unwrap();
        let prev = tr.transition(Activity::Finished, t(2.0)).unwrap();
        assert_eq!(prev, Activity::MovingToPickup);
        assert_eq!(tr.timeline().len(), 2);
        assert!(tr.timeline().current().is_none());
        assert!(tr.timeline().is_contiguous());
    }

    #[test]
    fn waypoints_advance_until_leg_complete() {
        let mut tr = traveller(0);
        let via = Point::new(5.0, 0.0);
        let end = Point::new(5.0, 5.0);
        tr.begin_leg(vec![via, end]);
        assert!(!tr.leg_complete());
        assert_eq!(tr.reach_waypoint(), Some(via));
        assert_eq!(tr.waypoint_index(), 1);
        assert!(!tr.leg_complete());
        assert_eq!(tr.reach_waypoint(), Some(end));
        assert!(tr.leg_complete());
        assert_eq!(tr.position(), end);
        assert_eq!(tr.reach_waypoint(), None);

        tr.begin_leg(vec![via]);
        assert_eq!(tr.waypoint_index(), 0);
    }

    #[test]
    fn box_moves_reserved_to_carried_to_delivered() {
        let mut tr = traveller(0);
        assert!(tr.reserve(DeliveryBox::new(BoxId(7), Point::new(0.0, 10.0))).is_none());
        assert_eq!(tr.reserved_box_id(), Some(BoxId(7)));
        assert!(!tr.has_box());

        assert_eq!(tr.pick_up(), Some(BoxId(7)));
        assert!(tr.has_box());
        assert_eq!(tr.carried_box_id(), Some(BoxId(7)));
        assert_eq!(tr.reserved_box_id(), None);

        let item = tr.drop_off().unwrap();
        assert_eq!(item.id, BoxId(7));
        assert!(!tr.has_box());
        assert_eq!(tr.carried_box_id(), None);
        assert_eq!(tr.deliveries(), 1);
    }

    #[test]
    fn pick_up_without_reservation_is_none() {
        let mut tr = traveller(0);
        assert_eq!(tr.pick_up(), None);
        assert!(!tr.has_box());
        assert!(tr.drop_off().is_none());
        assert_eq!(tr.deliveries(), 0);
    }

    #[test]
    fn release_boxes_empties_both_slots() {
        let mut tr = traveller(0);
        tr.reserve(DeliveryBox::new(BoxId(1), Point::default()));
        tr.pick_up();
        tr.reserve(DeliveryBox::new(BoxId(2), Point::default()));
        let ids: Vec<BoxId> = tr.release_boxes().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, [BoxId(2), BoxId(1)]);
        assert!(!tr.has_box());
        assert_eq!(tr.reserved_box_id(), None);
    }
}

// ── TravellerStore ────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn allocates_sequential_ids_and_names() {
        let mut store = TravellerStore::new();
        assert_eq!(store.allocate(), (TravellerId(0), "Traveller 1".to_string()));
        assert_eq!(store.allocate(), (TravellerId(1), "Traveller 2".to_string()));
        assert_eq!(store.allocated(), 2);
    }

    #[test]
    fn retire_moves_to_finished() {
        let mut store = TravellerStore::new();
        store.insert(traveller(0));
        store.insert(traveller(1));
        assert_eq!(store.active_count(), 2);

        let retired = store.retire(TravellerId(0)).unwrap();
        assert_eq!(retired.id, TravellerId(0));
        assert!(!store.contains(TravellerId(0)));
        assert_eq!(store.finished_count(), 1);
        assert!(store.retire(TravellerId(0)).is_none());

        let order: Vec<TravellerId> = store.iter().map(|t| t.id).collect();
        assert_eq!(order, [TravellerId(1), TravellerId(0)]);
    }

    #[test]
    fn remove_does_not_record_finished() {
        let mut store = TravellerStore::new();
        store.insert(traveller(4));
        assert!(store.remove(TravellerId(4)).is_some());
        assert_eq!(store.finished_count(), 0);
        assert!(store.get(TravellerId(4)).is_none());
    }

    #[test]
    fn active_iterates_in_id_order() {
        let mut store = TravellerStore::new();
        for id in [2, 0, 1] {
            store.insert(traveller(id));
        }
        let ids: Vec<u32> = store.active().map(|t| t.id.0).collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = TravellerStore::new();
        store.allocate();
        store.insert(traveller(0));
        store.retire(TravellerId(0));
        store.clear();
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.finished_count(), 0);
        assert_eq!(store.allocate().0, TravellerId(0));
    }
}

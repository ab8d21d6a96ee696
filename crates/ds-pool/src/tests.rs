//! Unit tests for ds-pool.

use ds_core::{BoxId, Point, SimTime};

use crate::{BoxPool, Delivered, DeliveryBox, PoolError};

fn pickup() -> Point {
    Point::new(0.0, 10.0)
}

#[cfg(test)]
mod pool {
    use super::*;

    #[test]
    fn dequeues_in_fifo_order() {
        let mut pool = BoxPool::with_boxes(3, pickup());
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.peek(), Some(BoxId(0)));
        assert_eq!(pool.dequeue().unwrap().id, BoxId(0));
        assert_eq!(pool.dequeue().unwrap().id, BoxId(1));
        assert_eq!(pool.dequeue().unwrap().id, BoxId(2));
        assert!(pool.is_empty());
    }

    #[test]
    fn empty_pool_errors() {
        let mut pool = BoxPool::new();
        assert_eq!(pool.dequeue(), Err(PoolError::EmptyPool));
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn fill_continues_ids() {
        let mut pool = BoxPool::with_boxes(2, pickup());
        pool.dequeue().unwrap();
        pool.fill(2, pickup());
        let ids: Vec<BoxId> = pool.iter().map(|b| b.id).collect();
        assert_eq!(ids, [BoxId(1), BoxId(2), BoxId(3)]);
    }

    #[test]
    fn enqueue_appends_at_tail() {
        let mut pool = BoxPool::with_boxes(2, pickup());
        let head = pool.dequeue().unwrap();
        pool.enqueue(head);
        let ids: Vec<BoxId> = pool.iter().map(|b| b.id).collect();
        assert_eq!(ids, [BoxId(1), BoxId(0)]);
    }

    #[test]
    fn boxes_start_at_the_fill_point() {
        let pool = BoxPool::with_boxes(2, pickup());
        assert!(pool.iter().all(|b| b.position == pickup()));
    }

    #[test]
    fn clear_restarts_ids() {
        let mut pool = BoxPool::with_boxes(4, pickup());
        pool.clear();
        assert!(pool.is_empty());
        pool.fill(1, pickup());
        assert_eq!(pool.peek(), Some(BoxId(0)));
    }
}

#[cfg(test)]
mod delivered {
    use super::*;

    #[test]
    fn deliver_moves_box_and_records_time() {
        let end = Point::new(10.0, 10.0);
        let mut delivered = Delivered::new();
        delivered.deliver(DeliveryBox::new(BoxId(5), pickup()), end, SimTime::from_secs(5.0));

        assert_eq!(delivered.len(), 1);
        assert!(delivered.contains(BoxId(5)));
        assert!(!delivered.contains(BoxId(6)));
        let (item, time) = delivered.iter().next().unwrap();
        assert_eq!(item.position, end);
        assert_eq!(time, SimTime::from_secs(5.0));
        assert_eq!(delivered.last_time(), Some(SimTime::from_secs(5.0)));
    }

    #[test]
    fn ids_in_delivery_order() {
        let mut delivered = Delivered::new();
        for (id, at) in [(2, 1.0), (0, 2.0), (1, 3.0)] {
            delivered.deliver(DeliveryBox::new(BoxId(id), pickup()), pickup(), SimTime::from_secs(at));
        }
        let ids: Vec<BoxId> = delivered.ids().collect();
        assert_eq!(ids, [BoxId(2), BoxId(0), BoxId(1)]);
        delivered.clear();
        assert!(delivered.is_empty());
    }
}

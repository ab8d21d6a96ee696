//! `BoxPool` — FIFO of unclaimed boxes.

use std::collections::VecDeque;

use ds_core::{BoxId, Point};

use crate::{DeliveryBox, PoolError, PoolResult};

/// Boxes waiting at the pickup point, head first.  Never reordered.
#[derive(Debug, Default)]
pub struct BoxPool {
    queue:   VecDeque<DeliveryBox>,
    /// Id handed to the next box created by [`fill`][Self::fill].
    next_id: u32,
}

impl BoxPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool holding `count` fresh boxes at `at`, ids `0..count`.
    pub fn with_boxes(count: u32, at: Point) -> Self {
        let mut pool = Self::new();
        pool.fill(count, at);
        pool
    }

    /// Create `count` new boxes at `at` and append them.  Ids continue from
    /// the last box this pool created.
    pub fn fill(&mut self, count: u32, at: Point) {
        self.queue.reserve(count as usize);
        for _ in 0..count {
            let id = BoxId(self.next_id);
            self.next_id += 1;
            self.queue.push_back(DeliveryBox::new(id, at));
        }
    }

    /// Remove and return the head box.
    pub fn dequeue(&mut self) -> PoolResult<DeliveryBox> {
        self.queue.pop_front().ok_or(PoolError::EmptyPool)
    }

    /// Append an existing box at the tail.
    pub fn enqueue(&mut self, item: DeliveryBox) {
        self.queue.push_back(item);
    }

    /// Id of the box the next `dequeue` would return.
    pub fn peek(&self) -> Option<BoxId> {
        self.queue.front().map(|b| b.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeliveryBox> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every box and restart id numbering.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.next_id = 0;
    }
}

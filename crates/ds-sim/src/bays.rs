//! Pickup bays: a bounded number of concurrent pickups with a FIFO waiting
//! line.

use std::collections::{BTreeSet, VecDeque};

use ds_core::TravellerId;

#[derive(Debug, Clone)]
pub struct LoadingBays {
    capacity: u32,
    holders:  BTreeSet<TravellerId>,
    waiting:  VecDeque<TravellerId>,
}

impl LoadingBays {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            holders: BTreeSet::new(),
            waiting: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn busy(&self) -> usize {
        self.holders.len()
    }

    /// Travellers queued for a bay, head first.
    pub fn waiting(&self) -> impl Iterator<Item = TravellerId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn holds(&self, id: TravellerId) -> bool {
        self.holders.contains(&id)
    }

    /// Take a free bay, or join the back of the line.  Returns `true` when a
    /// bay was taken.
    pub fn acquire(&mut self, id: TravellerId) -> bool {
        if self.holders.len() < self.capacity as usize {
            self.holders.insert(id);
            true
        } else {
            self.waiting.push_back(id);
            false
        }
    }

    /// Give up `id`'s bay.  If someone is waiting the bay passes straight to
    /// them and their id is returned.
    pub fn release(&mut self, id: TravellerId) -> Option<TravellerId> {
        if !self.holders.remove(&id) {
            return None;
        }
        let next = self.waiting.pop_front()?;
        self.holders.insert(next);
        Some(next)
    }

    /// Drop `id` wherever it is: out of the line, or out of its bay (which
    /// may pass to the next in line, as with [`release`][Self::release]).
    pub fn forget(&mut self, id: TravellerId) -> Option<TravellerId> {
        self.waiting.retain(|&w| w != id);
        self.release(id)
    }

    pub fn clear(&mut self) {
        self.holders.clear();
        self.waiting.clear();
    }
}

//! Traveller storage: the active set, the finished list, and id allocation.
//!
//! Active travellers are keyed by id in a `BTreeMap` so every iteration
//! (snapshots, spawning order, debug output) is in ascending id order and
//! two identical runs walk them identically.

use std::collections::BTreeMap;

use ds_core::{IdAllocator, TravellerId};

use crate::Traveller;

#[derive(Debug, Default)]
pub struct TravellerStore {
    active:   BTreeMap<TravellerId, Traveller>,
    /// Travellers that reached `Finished`, in finishing order.
    finished: Vec<Traveller>,
    ids:      IdAllocator,
}

impl TravellerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id and its display name.
    pub fn allocate(&mut self) -> (TravellerId, String) {
        let id = self.ids.allocate();
        (id, format!("Traveller {}", id.0 + 1))
    }

    /// Add a traveller to the active set.  Replaces (and returns) any active
    /// traveller with the same id.
    pub fn insert(&mut self, traveller: Traveller) -> Option<Traveller> {
        self.active.insert(traveller.id, traveller)
    }

    pub fn get(&self, id: TravellerId) -> Option<&Traveller> {
        self.active.get(&id)
    }

    pub fn get_mut(&mut self, id: TravellerId) -> Option<&mut Traveller> {
        self.active.get_mut(&id)
    }

    pub fn contains(&self, id: TravellerId) -> bool {
        self.active.contains_key(&id)
    }

    /// Move a traveller from the active set to the finished list.
    pub fn retire(&mut self, id: TravellerId) -> Option<&Traveller> {
        let traveller = self.active.remove(&id)?;
        self.finished.push(traveller);
        self.finished.last()
    }

    /// Drop a traveller from the active set without recording it as
    /// finished.
    pub fn remove(&mut self, id: TravellerId) -> Option<Traveller> {
        self.active.remove(&id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Traveller> {
        self.active.values()
    }

    pub fn finished(&self) -> &[Traveller] {
        &self.finished
    }

    /// Active travellers (ascending id) followed by finished ones (finishing
    /// order).
    pub fn iter(&self) -> impl Iterator<Item = &Traveller> {
        self.active.values().chain(self.finished.iter())
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn finished_count(&self) -> usize {
        self.finished.len()
    }

    /// Ids handed out so far.
    pub fn allocated(&self) -> u32 {
        self.ids.allocated()
    }

    /// Forget every traveller and restart id numbering.
    pub fn clear(&mut self) {
        self.active.clear();
        self.finished.clear();
        self.ids.reset();
    }
}

//! Terminal home of delivered boxes.

use ds_core::{BoxId, Point, SimTime};

use crate::DeliveryBox;

/// Boxes that reached the end point, in delivery order, with the time each
/// one was set down.
#[derive(Debug, Default)]
pub struct Delivered {
    boxes: Vec<(DeliveryBox, SimTime)>,
}

impl Delivered {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `item`, moving it to `at`.
    pub fn deliver(&mut self, mut item: DeliveryBox, at: Point, time: SimTime) {
        item.position = at;
        self.boxes.push((item, time));
    }

    pub fn contains(&self, id: BoxId) -> bool {
        self.boxes.iter().any(|(b, _)| b.id == id)
    }

    /// Delivered box ids in delivery order.
    pub fn ids(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.boxes.iter().map(|(b, _)| b.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DeliveryBox, SimTime)> {
        self.boxes.iter().map(|(b, t)| (b, *t))
    }

    /// Time of the most recent delivery.
    pub fn last_time(&self) -> Option<SimTime> {
        self.boxes.last().map(|(_, t)| *t)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }
}

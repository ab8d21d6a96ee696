//! The deliverable item.

use ds_core::{BoxId, Point};

/// One box.  Deliberately not `Clone`: see the crate docs on ownership.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryBox {
    pub id:       BoxId,
    /// Last place the box was set down.
    pub position: Point,
}

impl DeliveryBox {
    pub fn new(id: BoxId, position: Point) -> Self {
        Self { id, position }
    }
}
